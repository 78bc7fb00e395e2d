use bountygo_core::alerts::DismissPlan;
use bountygo_core::config::UiConfig;
use web_sys::Document;

use crate::dom::{
  self,
  DomAlert,
  TimeoutScheduler
};

/// Only banners present right now are
/// scheduled.
pub fn bind(
  document: &Document,
  config: &UiConfig
) -> usize {
  let alerts = dom::select_all(
    document,
    &config.alerts.selector
  )
  .into_iter()
  .map(DomAlert);

  DismissPlan::new(&config.alerts)
    .schedule_all(alerts, &TimeoutScheduler)
}
