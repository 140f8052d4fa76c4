//! In-process job queue over a tokio mpsc channel.
//!
//! The sweep holds the sender half; the worker drains the receiver. An
//! external distributed queue can replace this by implementing
//! [`JobQueue`] — the sweep only sees the trait.

use parabens_core::queue::{JobQueue, NotifyJob};
use thiserror::Error;
use tokio::sync::mpsc;

/// Enqueue attempted after every receiver was dropped.
#[derive(Debug, Error)]
#[error("job queue is closed")]
pub struct QueueClosed;

/// Sender half of the in-process queue. Cheap to clone.
#[derive(Clone)]
pub struct MpscQueue {
  tx: mpsc::UnboundedSender<NotifyJob>,
}

/// Receiver half, drained by
/// [`run_worker`](crate::dispatch::run_worker).
pub struct JobReceiver {
  rx: mpsc::UnboundedReceiver<NotifyJob>,
}

/// Build a connected queue pair.
pub fn job_queue() -> (MpscQueue, JobReceiver) {
  let (tx, rx) = mpsc::unbounded_channel();
  (MpscQueue { tx }, JobReceiver { rx })
}

impl JobQueue for MpscQueue {
  type Error = QueueClosed;

  fn enqueue(&self, job: NotifyJob) -> Result<(), QueueClosed> {
    self.tx.send(job).map_err(|_| QueueClosed)
  }
}

impl JobReceiver {
  /// Next job, or `None` once every sender is dropped and the buffer is
  /// drained.
  pub async fn recv(&mut self) -> Option<NotifyJob> { self.rx.recv().await }
}
