use bountygo_core::alerts::{
  AlertCloser,
  Scheduler
};
use bountygo_core::autofill::{
  AutoFillView,
  FillPlan,
  ImagePlan
};
use bountygo_core::confirm::Submittable;
use bountygo_core::config::AutoFillConfig;
use bountygo_core::preview::{
  PreviewImage,
  PreviewState
};
use bountygo_core::validation::AmountForm;
use bountygo_core::{
  Error,
  Result
};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlButtonElement,
  HtmlElement,
  HtmlFormElement,
  HtmlImageElement,
  HtmlInputElement,
  HtmlTextAreaElement
};

use crate::bootstrap;

/// Optional page element; absence is
/// normal on pages without the feature.
pub fn element_by_id(
  document: &Document,
  id: &str
) -> Option<Element> {
  let element =
    document.get_element_by_id(id);
  if element.is_none() {
    tracing::debug!(
      id,
      "element not on page"
    );
  }
  element
}

pub fn by_id<T: JsCast>(
  document: &Document,
  id: &str
) -> Option<T> {
  let element =
    element_by_id(document, id)?;
  match element.dyn_into::<T>() {
    | Ok(typed) => Some(typed),
    | Err(_) => {
      tracing::warn!(
        id,
        "element has unexpected type"
      );
      None
    }
  }
}

/// First id of `candidates` present on
/// the page.
pub fn first_by_ids(
  document: &Document,
  candidates: &[String]
) -> Option<Element> {
  let found = candidates
    .iter()
    .find_map(|id| {
      document.get_element_by_id(id)
    });
  if found.is_none() {
    tracing::debug!(
      ?candidates,
      "no candidate element on page"
    );
  }
  found
}

pub fn select_all(
  root: &Document,
  selector: &str
) -> Vec<Element> {
  let Ok(nodes) =
    root.query_selector_all(selector)
  else {
    tracing::warn!(
      selector,
      "invalid selector"
    );
    return vec![];
  };
  (0..nodes.length())
    .filter_map(|index| nodes.get(index))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// `.value` of an input or textarea.
pub fn control_value(
  element: &Element
) -> Option<String> {
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    Some(input.value())
  } else if let Some(area) =
    element.dyn_ref::<HtmlTextAreaElement>()
  {
    Some(area.value())
  } else {
    tracing::warn!(
      id = %element.id(),
      "element is not a form control"
    );
    None
  }
}

pub fn set_control_value(
  element: &Element,
  value: &str
) {
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    input.set_value(value);
  } else if let Some(area) =
    element.dyn_ref::<HtmlTextAreaElement>()
  {
    area.set_value(value);
  } else {
    tracing::warn!(
      id = %element.id(),
      "element is not a form control"
    );
  }
}

fn set_disabled(
  element: &Element,
  disabled: bool
) {
  if let Some(button) =
    element.dyn_ref::<HtmlButtonElement>()
  {
    button.set_disabled(disabled);
  } else if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    input.set_disabled(disabled);
  } else {
    let result = if disabled {
      element.set_attribute("disabled", "")
    } else {
      element.remove_attribute("disabled")
    };
    if let Err(error) = result {
      tracing::warn!(?error, "failed to toggle disabled");
    }
  }
}

fn set_display(
  element: &HtmlElement,
  visible: bool
) {
  let value =
    if visible { "block" } else { "none" };
  if let Err(error) = element
    .style()
    .set_property("display", value)
  {
    tracing::warn!(?error, "failed to set display");
  }
}

fn toggle_hidden(
  element: &Element,
  class: &str,
  hidden: bool
) {
  let classes = element.class_list();
  let result = if hidden {
    classes.add_1(class)
  } else {
    classes.remove_1(class)
  };
  if let Err(error) = result {
    tracing::warn!(?error, class, "failed to toggle class");
  }
}

/// Auto-fill elements, looked up once at
/// bind time. Any of them may be absent.
pub struct DomAutoFillView {
  trigger:         Option<Element>,
  label:           Option<Element>,
  spinner:         Option<Element>,
  url_input:       Option<Element>,
  name_field:      Option<Element>,
  description_field: Option<Element>,
  image_url_field: Option<Element>,
  preview:         Option<HtmlImageElement>,
  hidden_class:    String
}

impl DomAutoFillView {
  pub fn lookup(
    document: &Document,
    config: &AutoFillConfig
  ) -> Self {
    Self {
      trigger:           element_by_id(
        document,
        &config.trigger
      ),
      label:             element_by_id(
        document,
        &config.label
      ),
      spinner:           element_by_id(
        document,
        &config.spinner
      ),
      url_input:         element_by_id(
        document,
        &config.url_input
      ),
      name_field:        first_by_ids(
        document,
        &config.name_fields
      ),
      description_field: first_by_ids(
        document,
        &config.description_fields
      ),
      image_url_field:   first_by_ids(
        document,
        &config.image_url_fields
      ),
      preview:           by_id(
        document,
        &config.preview_image
      ),
      hidden_class:      config
        .hidden_class
        .clone()
    }
  }
}

impl AutoFillView for DomAutoFillView {
  fn url_value(&self) -> String {
    self
      .url_input
      .as_ref()
      .and_then(control_value)
      .unwrap_or_default()
  }

  fn set_loading(&self, loading: bool) {
    if let Some(trigger) = &self.trigger {
      set_disabled(trigger, loading);
    }
    if let Some(label) = &self.label {
      toggle_hidden(
        label,
        &self.hidden_class,
        loading
      );
    }
    if let Some(spinner) = &self.spinner {
      toggle_hidden(
        spinner,
        &self.hidden_class,
        !loading
      );
    }
  }

  fn alert(&self, message: &str) {
    gloo::dialogs::alert(message);
  }

  fn apply(&self, plan: &FillPlan) {
    if let Some(name) = &self.name_field {
      set_control_value(name, &plan.name);
    }
    if let Some(description) =
      &self.description_field
    {
      set_control_value(
        description,
        &plan.description
      );
    }

    let Some(preview) = &self.preview
    else {
      return;
    };
    let stored = match &plan.image {
      | ImagePlan::Show(url) => {
        preview.set_src(url);
        set_display(preview, true);
        url
      }
      | ImagePlan::Reset { placeholder } => {
        set_display(preview, false);
        preview.set_src("");
        placeholder
      }
    };
    if let Some(field) =
      &self.image_url_field
    {
      set_control_value(field, stored);
    }
  }
}

pub struct DomPreviewImage(
  pub HtmlImageElement
);

impl PreviewImage for DomPreviewImage {
  fn show(&self, state: &PreviewState) {
    self.0.set_src(&state.src);
    set_display(&self.0, state.visible);
  }
}

pub struct DomForm(pub HtmlFormElement);

impl DomForm {
  /// Form enclosing `element`, if any.
  pub fn enclosing(
    element: &Element
  ) -> Option<Self> {
    element
      .closest("form")
      .ok()
      .flatten()
      .and_then(|form| {
        form
          .dyn_into::<HtmlFormElement>()
          .ok()
      })
      .map(DomForm)
  }
}

impl Submittable for DomForm {
  fn submit(&self) -> Result<()> {
    self.0.submit().map_err(|error| {
      Error::Submit(format!("{error:?}"))
    })
  }
}

impl AmountForm for DomForm {
  fn field_value(
    &self,
    name: &str
  ) -> Option<String> {
    self
      .0
      .query_selector(&format!(
        "input[name=\"{name}\"]"
      ))
      .ok()
      .flatten()
      .and_then(|element| {
        element
          .dyn_into::<HtmlInputElement>()
          .ok()
      })
      .map(|input| input.value())
  }
}

pub struct DomAlert(pub Element);

impl AlertCloser for DomAlert {
  fn close(&self) -> Result<()> {
    bootstrap::close_alert(&self.0)
      .map_err(|error| {
        Error::Script(format!("{error:?}"))
      })
  }
}

/// Schedules on the browser's timer
/// queue; timers are never cancelled.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
  fn schedule(
    &self,
    delay_ms: u32,
    task: Box<dyn FnOnce()>
  ) {
    Timeout::new(delay_ms, task).forget();
  }
}
