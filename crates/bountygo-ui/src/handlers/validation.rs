use bountygo_core::config::UiConfig;
use bountygo_core::validation::{
  ActionMatcher,
  Verdict,
  check_form
};
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlFormElement
};

use crate::dom::{
  self,
  DomForm
};

/// Guards every order and edit-bounty
/// form on the page.
pub fn bind(
  document: &Document,
  config: &UiConfig
) -> Vec<EventListener> {
  let matcher =
    ActionMatcher::new(&config.validation);

  dom::select_all(document, "form")
    .into_iter()
    .filter(|form| {
      matcher.matches(
        &form
          .get_attribute("action")
          .unwrap_or_default()
      )
    })
    .filter_map(|form| {
      form.dyn_into::<HtmlFormElement>().ok()
    })
    .map(|form| {
      let validation =
        config.validation.clone();
      let message = config
        .messages
        .negative_amount
        .clone();
      let guarded = DomForm(form.clone());

      tracing::debug!(
        action = %form.action(),
        "guarding form amounts"
      );

      EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          if let Verdict::Reject {
            price,
            reward
          } = check_form(&guarded, &validation)
          {
            tracing::info!(price, reward, "blocked submit with negative amount");
            event.prevent_default();
            gloo::dialogs::alert(&message);
          }
        }
      )
    })
    .collect()
}
