//! Execution of one notification job to a terminal outcome.

use parabens_core::{
  contact::Channel, queue::NotifyJob, resolve::resolve_contact,
  store::DirectoryStore,
};
use parabens_notify::{ChannelSet, Context};
use tracing::{info, warn};

use crate::queue::JobReceiver;

/// Subject line of the birthday greeting email.
pub const BIRTHDAY_SUBJECT: &str = "Happy Birthday! 🎉";

/// Template pair rendered for the greeting body.
pub const BIRTHDAY_TEMPLATE: &str = "emails/birthday";

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Terminal result of executing one job.
#[derive(Debug)]
pub enum DispatchOutcome {
  /// The channel backend accepted the message.
  Sent,
  /// Nothing to deliver — the reason says why. Not an error.
  Skipped(&'static str),
  /// The store or the channel backend failed.
  Failed(Box<dyn std::error::Error + Send + Sync>),
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Execute one job.
///
/// The user and contact are re-resolved here rather than trusted from
/// enqueue time — the queue may run the job long after the sweep, and
/// either may have been deactivated in between.
pub async fn dispatch<S>(
  store: &S,
  channels: &ChannelSet,
  job: NotifyJob,
) -> DispatchOutcome
where
  S: DirectoryStore,
{
  let user = match store.get_user(job.user_id).await {
    Ok(Some(user)) => user,
    Ok(None) => return DispatchOutcome::Skipped("user no longer exists"),
    Err(e) => return DispatchOutcome::Failed(Box::new(e)),
  };
  if !user.is_active {
    return DispatchOutcome::Skipped("user is inactive");
  }

  let contacts = match store.contacts_for(job.user_id).await {
    Ok(contacts) => contacts,
    Err(e) => return DispatchOutcome::Failed(Box::new(e)),
  };
  let Some(contact) = resolve_contact(&contacts, job.channel) else {
    return DispatchOutcome::Skipped("no active contact");
  };

  match job.channel {
    Channel::Email => {
      let mut context = Context::new();
      context.insert("user", &user);

      match channels
        .email
        .send(contact, BIRTHDAY_SUBJECT, BIRTHDAY_TEMPLATE, &context)
        .await
      {
        Ok(receipt) => {
          info!(
            user_id = %user.user_id,
            to = %contact.value,
            provider_message = %receipt.message,
            "birthday email sent"
          );
          DispatchOutcome::Sent
        }
        Err(e) => DispatchOutcome::Failed(Box::new(e)),
      }
    }

    Channel::WhatsApp => {
      let greeting = format!("Happy birthday, {}!", user.display_name());
      match channels.whatsapp.send(contact, &greeting).await {
        Ok(()) => DispatchOutcome::Sent,
        Err(e) => DispatchOutcome::Failed(Box::new(e)),
      }
    }

    // The sweep never enqueues phone jobs; there is no SMS backend.
    Channel::Phone => DispatchOutcome::Skipped("no delivery path for phone"),
  }
}

// ─── Worker ──────────────────────────────────────────────────────────────────

/// Totals from draining a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
  pub sent:    usize,
  pub skipped: usize,
  pub failed:  usize,
}

/// Drain `receiver`, executing each job in turn, until every sender is
/// dropped and the buffer is empty.
///
/// Jobs are independent — no ordering is promised to them — so a parallel
/// executor can replace this loop without touching [`dispatch`].
pub async fn run_worker<S>(
  store: &S,
  channels: &ChannelSet,
  mut receiver: JobReceiver,
) -> WorkerReport
where
  S: DirectoryStore,
{
  let mut report = WorkerReport::default();

  while let Some(job) = receiver.recv().await {
    match dispatch(store, channels, job).await {
      DispatchOutcome::Sent => report.sent += 1,
      DispatchOutcome::Skipped(reason) => {
        info!(
          user_id = %job.user_id,
          channel = %job.channel,
          reason,
          "job skipped"
        );
        report.skipped += 1;
      }
      DispatchOutcome::Failed(e) => {
        warn!(
          user_id = %job.user_id,
          channel = %job.channel,
          error = %e,
          "job failed"
        );
        report.failed += 1;
      }
    }
  }

  report
}
