//! The birthday sweep: find today's birthdays and enqueue dispatch jobs.

use chrono::NaiveDate;
use parabens_core::{
  contact::Channel,
  queue::{JobQueue, NotifyJob},
  resolve::eligible_channels,
  store::DirectoryStore,
};
use tracing::{info, warn};

/// Channels the sweep dispatches on. Phone contacts are resolved but never
/// dispatched — there is no SMS path.
const DISPATCH_CHANNELS: [Channel; 2] = [Channel::Email, Channel::WhatsApp];

/// Counts reported by one sweep invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
  pub users_matched: usize,
  pub jobs_enqueued: usize,
  /// Users whose contacts could not be loaded or whose jobs could not all
  /// be enqueued. Their failures never abort the sweep.
  pub users_failed:  usize,
}

/// Scan for active users whose stored birth date equals `today` and
/// enqueue one [`NotifyJob`] per eligible dispatch channel.
///
/// The sweep has no same-day memory: invoking it twice on the same date
/// enqueues every job twice. Run-once-per-day is the scheduler's contract,
/// not this function's.
///
/// Only the initial directory query can fail; everything past it is
/// isolated per user and reported in the counts.
pub async fn run_birthday_sweep<S, Q>(
  store: &S,
  queue: &Q,
  today: NaiveDate,
) -> Result<SweepReport, S::Error>
where
  S: DirectoryStore,
  Q: JobQueue,
{
  let users = store.users_with_birthday(today).await?;

  let mut report = SweepReport {
    users_matched: users.len(),
    ..SweepReport::default()
  };

  for user in users {
    let contacts = match store.contacts_for(user.user_id).await {
      Ok(contacts) => contacts,
      Err(e) => {
        warn!(
          user_id = %user.user_id,
          error = %e,
          "skipping user: failed to load contacts"
        );
        report.users_failed += 1;
        continue;
      }
    };

    let eligible = eligible_channels(&contacts);
    let mut enqueue_failed = false;

    for channel in DISPATCH_CHANNELS {
      if !eligible.contains(&channel) {
        continue;
      }
      match queue.enqueue(NotifyJob { user_id: user.user_id, channel }) {
        Ok(()) => report.jobs_enqueued += 1,
        Err(e) => {
          warn!(
            user_id = %user.user_id,
            %channel,
            error = %e,
            "failed to enqueue job"
          );
          enqueue_failed = true;
        }
      }
    }

    if enqueue_failed {
      report.users_failed += 1;
    }
  }

  info!(
    users_matched = report.users_matched,
    jobs_enqueued = report.jobs_enqueued,
    users_failed = report.users_failed,
    "birthday sweep complete"
  );
  Ok(report)
}
