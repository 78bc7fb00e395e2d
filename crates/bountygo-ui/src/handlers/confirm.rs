use std::cell::RefCell;
use std::rc::Rc;

use bountygo_core::config::UiConfig;
use bountygo_core::confirm::{
  ActionClass,
  ConfirmGates
};
use gloo::events::EventListener;
use web_sys::Document;

use crate::dom::{
  self,
  DomForm
};

type SharedGates =
  Rc<RefCell<ConfirmGates<DomForm>>>;

pub fn bind(
  document: &Document,
  config: &UiConfig
) -> Vec<EventListener> {
  let gates: SharedGates =
    Rc::new(RefCell::new(
      ConfirmGates::default()
    ));

  ActionClass::ALL
    .into_iter()
    .flat_map(|class| {
      bind_class(
        document, config, &gates, class
      )
    })
    .collect()
}

fn bind_class(
  document: &Document,
  config: &UiConfig,
  gates: &SharedGates,
  class: ActionClass
) -> Vec<EventListener> {
  let selectors =
    class.config(&config.confirm);

  let mut listeners =
    dom::select_all(
      document,
      &selectors.trigger_selector
    )
    .into_iter()
    .map(|trigger| {
      let gates = Rc::clone(gates);
      let source = trigger.clone();
      EventListener::new(
        &trigger,
        "click",
        move |_| {
          gates.borrow_mut().select(
            class,
            DomForm::enclosing(&source)
          );
        }
      )
    })
    .collect::<Vec<_>>();

  let triggers = listeners.len();

  if let Some(confirm) = dom::element_by_id(
    document,
    &selectors.confirm_button
  ) {
    let gates = Rc::clone(gates);
    listeners.push(EventListener::new(
      &confirm,
      "click",
      move |_| {
        gates.borrow_mut().confirm(class);
      }
    ));
  }

  tracing::info!(
    %class,
    triggers,
    "confirmation gate bound"
  );
  listeners
}
