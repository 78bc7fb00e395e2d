/// Phase of the metadata lookup behind
/// the auto-fill trigger.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum FetchPhase {
  #[default]
  Idle,
  Loading
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FetchSignal {
  /// Trigger pressed with a non-empty
  /// URL.
  Activate,
  /// Request finished, whatever the
  /// result.
  Settle
}

impl FetchPhase {
  /// Returns the next phase, or `None`
  /// when the signal does not apply.
  pub fn next(
    self,
    signal: FetchSignal
  ) -> Option<FetchPhase> {
    match (self, signal) {
      | (
        FetchPhase::Idle,
        FetchSignal::Activate
      ) => Some(FetchPhase::Loading),
      | (
        FetchPhase::Loading,
        FetchSignal::Settle
      ) => Some(FetchPhase::Idle),
      | (
        FetchPhase::Loading,
        FetchSignal::Activate
      )
      | (
        FetchPhase::Idle,
        FetchSignal::Settle
      ) => None
    }
  }
}
