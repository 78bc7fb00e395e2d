//! Calls into the Bootstrap bundle the
//! templates load as `window.bootstrap`.

use js_sys::{
  Array,
  Function,
  Reflect
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::Element;

fn property(
  target: &JsValue,
  name: &str
) -> Result<JsValue, JsValue> {
  let value = Reflect::get(
    target,
    &JsValue::from_str(name)
  )?;
  if value.is_undefined() || value.is_null()
  {
    return Err(JsValue::from_str(
      &format!("missing `{name}`")
    ));
  }
  Ok(value)
}

/// `new bootstrap.Alert(element).close()`
pub fn close_alert(
  element: &Element
) -> Result<(), JsValue> {
  let window = web_sys::window()
    .ok_or_else(|| {
      JsValue::from_str("no window")
    })?;
  let bootstrap =
    property(&window, "bootstrap")?;
  let constructor = property(
    &bootstrap, "Alert"
  )?
  .dyn_into::<Function>()?;

  let alert = Reflect::construct(
    &constructor,
    &Array::of1(element)
  )?;
  let close = property(&alert, "close")?
    .dyn_into::<Function>()?;
  close.call0(&alert)?;
  Ok(())
}
