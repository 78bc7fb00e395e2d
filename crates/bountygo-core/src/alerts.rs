use crate::Result;
use crate::config::AlertsConfig;

/// A dismissible notification banner.
pub trait AlertCloser {
  fn close(&self) -> Result<()>;
}

/// Runs a task once after a delay in
/// milliseconds.
pub trait Scheduler {
  fn schedule(
    &self,
    delay_ms: u32,
    task: Box<dyn FnOnce()>
  );
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct DismissPlan {
  pub delay_ms: u32
}

impl DismissPlan {
  pub fn new(config: &AlertsConfig) -> Self {
    Self {
      delay_ms: config.dismiss_after_ms
    }
  }

  /// Schedules one close per alert. Only
  /// the alerts passed in are covered;
  /// banners inserted later are not
  /// watched for.
  pub fn schedule_all<A, S>(
    &self,
    alerts: impl IntoIterator<Item = A>,
    scheduler: &S
  ) -> usize
  where
    A: AlertCloser + 'static,
    S: Scheduler
  {
    let mut count = 0;
    for alert in alerts {
      scheduler.schedule(
        self.delay_ms,
        Box::new(move || {
          if let Err(error) = alert.close() {
            tracing::warn!(%error, "failed to close alert");
          }
        })
      );
      count += 1;
    }
    tracing::debug!(
      count,
      delay_ms = self.delay_ms,
      "scheduled alert dismissal"
    );
    count
  }
}
