//! Typed notification jobs and the queue seam between sweep and dispatch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contact::Channel;

// ─── NotifyJob ───────────────────────────────────────────────────────────────

/// One unit of asynchronous work: notify one user over one channel.
///
/// Jobs are queue-carried and ephemeral — never persisted. The executing
/// side re-resolves the user and contact, since arbitrary time may pass
/// between enqueue and execution. Retry policy, if any, belongs to the
/// queue that carries the job, not to this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyJob {
  pub user_id: Uuid,
  pub channel: Channel,
}

// ─── JobQueue ────────────────────────────────────────────────────────────────

/// Hand-off point for scheduling dispatch work.
///
/// `enqueue` is a non-blocking submission: nothing about execution is
/// awaited or observed by the caller. Once a job is submitted there is no
/// cancellation path.
pub trait JobQueue: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn enqueue(&self, job: NotifyJob) -> Result<(), Self::Error>;
}
