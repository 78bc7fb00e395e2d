use std::cell::Cell;

use bountygo_shared::FetchedMetadata;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::Result;
use crate::config::{
  Messages,
  UiConfig
};
use crate::fetch::{
  FetchPhase,
  FetchSignal
};

/// Looks up title, description and image
/// for a product URL.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
  async fn fetch(
    &self,
    url: &str
  ) -> Result<FetchedMetadata>;
}

/// The form elements the auto-fill
/// controller reads and writes. Missing
/// elements are the implementor's
/// concern and must be no-ops.
pub trait AutoFillView {
  fn url_value(&self) -> String;

  fn set_loading(&self, loading: bool);

  fn alert(&self, message: &str);

  fn apply(&self, plan: &FillPlan);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePlan {
  /// Show the preview with this source
  /// and store it in the image field.
  Show(String),
  /// Hide and clear the preview, put the
  /// placeholder path in the image
  /// field.
  Reset { placeholder: String }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
  pub name:        String,
  pub description: String,
  pub image:       ImagePlan
}

impl FillPlan {
  /// `None` when the record cannot fill
  /// the form; the fields must then be
  /// left alone.
  pub fn from_metadata(
    meta: &FetchedMetadata,
    placeholder: &str
  ) -> Option<Self> {
    if !meta.is_usable() {
      return None;
    }

    let image = match meta.image() {
      | Some(url) => {
        ImagePlan::Show(url.to_string())
      }
      | None => ImagePlan::Reset {
        placeholder: placeholder
          .to_string()
      }
    };

    Some(Self {
      name: meta
        .title()
        .unwrap_or_default()
        .to_string(),
      description: meta
        .description()
        .to_string(),
      image
    })
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AutoFillOutcome {
  MissingUrl,
  Busy,
  Filled,
  FillManually,
  Failed
}

pub struct AutoFillController<V, S> {
  view:        V,
  source:      S,
  messages:    Messages,
  placeholder: String,
  phase:       Cell<FetchPhase>
}

impl<V, S> AutoFillController<V, S>
where
  V: AutoFillView,
  S: MetadataSource
{
  pub fn new(
    view: V,
    source: S,
    config: &UiConfig
  ) -> Self {
    Self {
      view,
      source,
      messages: config.messages.clone(),
      placeholder: config
        .autofill
        .placeholder_image
        .clone(),
      phase: Cell::new(FetchPhase::Idle)
    }
  }

  pub fn phase(&self) -> FetchPhase {
    self.phase.get()
  }

  /// Runs one trigger activation: read
  /// the URL, look it up, fill the form.
  /// The loading state is always cleared
  /// before this returns, and also if the
  /// future is dropped mid-request.
  #[tracing::instrument(skip(self))]
  pub async fn activate(
    &self
  ) -> AutoFillOutcome {
    let raw = self.view.url_value();
    let url = raw.trim();
    if url.is_empty() {
      debug!("auto-fill without url");
      self
        .view
        .alert(&self.messages.missing_url);
      return AutoFillOutcome::MissingUrl;
    }

    let Some(_loading) =
      LoadingGuard::enter(
        &self.phase,
        &self.view
      )
    else {
      warn!(
        "auto-fill already in flight; \
         ignoring activation"
      );
      return AutoFillOutcome::Busy;
    };

    match self.source.fetch(url).await {
      | Ok(meta) => {
        match FillPlan::from_metadata(
          &meta,
          &self.placeholder
        ) {
          | Some(plan) => {
            info!(
              title = %plan.name,
              has_image = matches!(plan.image, ImagePlan::Show(_)),
              "filling form from metadata"
            );
            self.view.apply(&plan);
            AutoFillOutcome::Filled
          }
          | None => {
            info!(
              has_error = meta.has_error(),
              "metadata had no usable \
               title"
            );
            self.view.alert(
              &self.messages.fill_manually
            );
            AutoFillOutcome::FillManually
          }
        }
      }
      | Err(err) => {
        error!(error = %err, url, "metadata lookup failed");
        self
          .view
          .alert(&self.messages.fetch_failed);
        AutoFillOutcome::Failed
      }
    }
  }
}

struct LoadingGuard<'a, V: AutoFillView> {
  phase: &'a Cell<FetchPhase>,
  view:  &'a V
}

impl<'a, V: AutoFillView> LoadingGuard<'a, V> {
  fn enter(
    phase: &'a Cell<FetchPhase>,
    view: &'a V
  ) -> Option<Self> {
    let next = phase
      .get()
      .next(FetchSignal::Activate)?;
    phase.set(next);
    view.set_loading(true);
    Some(Self { phase, view })
  }
}

impl<V: AutoFillView> Drop
  for LoadingGuard<'_, V>
{
  fn drop(&mut self) {
    if let Some(next) = self
      .phase
      .get()
      .next(FetchSignal::Settle)
    {
      self.phase.set(next);
    }
    self.view.set_loading(false);
  }
}
