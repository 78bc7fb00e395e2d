/// What the preview image should show for
/// the current value of the image-URL
/// input. The value is used verbatim; a
/// broken source is left to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
  pub src:     String,
  pub visible: bool
}

impl PreviewState {
  pub fn from_input(value: &str) -> Self {
    Self {
      src:     value.to_string(),
      visible: !value.is_empty()
    }
  }
}

pub trait PreviewImage {
  fn show(&self, state: &PreviewState);
}

/// Mirrors one input change into the
/// preview image.
pub fn mirror_input<I: PreviewImage>(
  image: &I,
  value: &str
) -> PreviewState {
  let state =
    PreviewState::from_input(value);
  tracing::trace!(
    visible = state.visible,
    "updating image preview"
  );
  image.show(&state);
  state
}
