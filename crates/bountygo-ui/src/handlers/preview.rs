use bountygo_core::config::UiConfig;
use bountygo_core::preview::mirror_input;
use gloo::events::EventListener;
use web_sys::{
  Document,
  HtmlImageElement,
  HtmlInputElement
};

use crate::dom::{
  self,
  DomPreviewImage
};

/// Needs both the input and the image;
/// binds nothing otherwise.
pub fn bind(
  document: &Document,
  config: &UiConfig
) -> Option<EventListener> {
  let input = dom::by_id::<HtmlInputElement>(
    document,
    &config.preview.input
  )?;
  let image = DomPreviewImage(dom::by_id::<
    HtmlImageElement,
  >(
    document,
    &config.preview.image
  )?);

  let source = input.clone();
  Some(EventListener::new(
    &input,
    "input",
    move |_| {
      mirror_input(&image, &source.value());
    }
  ))
}
