use std::rc::Rc;

use bountygo_core::autofill::AutoFillController;
use bountygo_core::config::UiConfig;
use gloo::events::EventListener;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::api::HttpMetadataSource;
use crate::dom::{
  self,
  DomAutoFillView
};

pub fn bind(
  document: &Document,
  config: &UiConfig
) -> Option<EventListener> {
  let trigger = dom::element_by_id(
    document,
    &config.autofill.trigger
  )?;

  let controller =
    Rc::new(AutoFillController::new(
      DomAutoFillView::lookup(
        document,
        &config.autofill
      ),
      HttpMetadataSource::new(
        &config.autofill.endpoint
      ),
      config
    ));

  tracing::info!(
    trigger = %config.autofill.trigger,
    "auto-fill bound"
  );

  Some(EventListener::new(
    &trigger,
    "click",
    move |_| {
      let controller =
        Rc::clone(&controller);
      spawn_local(async move {
        let outcome =
          controller.activate().await;
        tracing::debug!(?outcome, "auto-fill finished");
      });
    }
  ))
}
