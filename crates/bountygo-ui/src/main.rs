mod api;
mod bootstrap;
mod dom;
mod handlers;

use bountygo_core::config::UiConfig;
use gloo::events::EventListener;

const UI_CONFIG_TOML: &str =
  include_str!("../assets/bountygo.toml");

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting Bountygo page script"
  );

  let Some(document) = web_sys::window()
    .and_then(|window| window.document())
  else {
    tracing::error!(
      "no document; page script idle"
    );
    return;
  };

  if document.ready_state()
    == "loading"
  {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      |_| bind_page()
    )
    .forget();
  } else {
    bind_page();
  }
}

/// Binds every page behavior once. The
/// listeners live as long as the page.
fn bind_page() {
  let Some(document) = web_sys::window()
    .and_then(|window| window.document())
  else {
    return;
  };

  let config = UiConfig::load_embedded(
    UI_CONFIG_TOML
  );

  let mut listeners = Vec::new();
  listeners.extend(
    handlers::autofill::bind(
      &document, &config
    )
  );
  listeners.extend(
    handlers::preview::bind(
      &document, &config
    )
  );
  listeners.extend(
    handlers::validation::bind(
      &document, &config
    )
  );
  let alerts = handlers::alerts::bind(
    &document, &config
  );
  listeners.extend(
    handlers::confirm::bind(
      &document, &config
    )
  );

  tracing::info!(
    listeners = listeners.len(),
    alerts,
    "page behaviors bound"
  );
  for listener in listeners {
    listener.forget();
  }
}
