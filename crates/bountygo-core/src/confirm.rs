use std::fmt;

use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::Result;
use crate::config::{
  ConfirmClassConfig,
  ConfirmConfig
};

/// The actions that only go through
/// after an explicit confirmation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ActionClass {
  Delete,
  Done
}

impl ActionClass {
  pub const ALL: [ActionClass; 2] =
    [ActionClass::Delete, ActionClass::Done];

  pub fn label(self) -> &'static str {
    match self {
      | ActionClass::Delete => "delete",
      | ActionClass::Done => "done"
    }
  }

  pub fn config(
    self,
    config: &ConfirmConfig
  ) -> &ConfirmClassConfig {
    match self {
      | ActionClass::Delete => {
        &config.delete
      }
      | ActionClass::Done => &config.done
    }
  }
}

impl fmt::Display for ActionClass {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

pub trait Submittable {
  fn submit(&self) -> Result<()>;
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ConfirmOutcome {
  Submitted,
  NothingPending,
  Failed
}

/// Holds the form a trigger click picked
/// for one action class until the
/// confirmation control is pressed.
///
/// Every trigger click replaces the
/// selection, including a click outside
/// any form, which leaves nothing
/// pending. Dismissing the dialog does
/// not touch the selection, so a later
/// confirmation still submits it.
pub struct ConfirmationGate<F> {
  class:   ActionClass,
  pending: Option<F>
}

impl<F: Submittable> ConfirmationGate<F> {
  pub fn new(class: ActionClass) -> Self {
    Self {
      class,
      pending: None
    }
  }

  pub fn select(&mut self, form: Option<F>) {
    match (&self.pending, &form) {
      | (Some(_), Some(_)) => {
        debug!(
          class = %self.class,
          "replacing pending form"
        );
      }
      | (_, None) => {
        warn!(
          class = %self.class,
          "trigger outside any form; \
           nothing pending"
        );
      }
      | (None, Some(_)) => {}
    }
    self.pending = form;
  }

  /// Submits the pending form, if any,
  /// and clears it.
  pub fn confirm_and_submit(
    &mut self
  ) -> ConfirmOutcome {
    let Some(form) = self.pending.take()
    else {
      debug!(
        class = %self.class,
        "confirmation with nothing \
         pending"
      );
      return ConfirmOutcome::NothingPending;
    };

    match form.submit() {
      | Ok(()) => {
        info!(
          class = %self.class,
          "submitting confirmed form"
        );
        ConfirmOutcome::Submitted
      }
      | Err(err) => {
        error!(class = %self.class, error = %err, "confirmed form failed to submit");
        ConfirmOutcome::Failed
      }
    }
  }
}

/// One gate per action class. Selecting
/// or confirming in one class never
/// touches the other.
pub struct ConfirmGates<F> {
  delete: ConfirmationGate<F>,
  done:   ConfirmationGate<F>
}

impl<F: Submittable> Default
  for ConfirmGates<F>
{
  fn default() -> Self {
    Self {
      delete: ConfirmationGate::new(
        ActionClass::Delete
      ),
      done:   ConfirmationGate::new(
        ActionClass::Done
      )
    }
  }
}

impl<F: Submittable> ConfirmGates<F> {
  fn gate_mut(
    &mut self,
    class: ActionClass
  ) -> &mut ConfirmationGate<F> {
    match class {
      | ActionClass::Delete => {
        &mut self.delete
      }
      | ActionClass::Done => &mut self.done
    }
  }

  pub fn select(
    &mut self,
    class: ActionClass,
    form: Option<F>
  ) {
    self.gate_mut(class).select(form);
  }

  pub fn confirm(
    &mut self,
    class: ActionClass
  ) -> ConfirmOutcome {
    self.gate_mut(class).confirm_and_submit()
  }
}
