use anyhow::Context;
use bountygo_shared::FETCH_URL_ENDPOINT;
use serde::Deserialize;

/// Element ids, selectors, messages and
/// timings the page handlers bind to.
#[derive(
  Debug,
  Clone,
  Default,
  Deserialize,
  PartialEq,
)]
#[serde(default)]
pub struct UiConfig {
  pub autofill:   AutoFillConfig,
  pub preview:    PreviewConfig,
  pub validation: ValidationConfig,
  pub confirm:    ConfirmConfig,
  pub alerts:     AlertsConfig,
  pub messages:   Messages
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct AutoFillConfig {
  pub endpoint:           String,
  pub trigger:            String,
  pub label:              String,
  pub spinner:            String,
  pub url_input:          String,
  pub hidden_class:       String,
  /// Candidate ids, first one present
  /// on the page wins.
  pub name_fields:        Vec<String>,
  pub description_fields: Vec<String>,
  pub image_url_fields:   Vec<String>,
  pub preview_image:      String,
  pub placeholder_image:  String
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct PreviewConfig {
  pub input: String,
  pub image: String
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct ValidationConfig {
  pub exact_actions:   Vec<String>,
  pub action_prefixes: Vec<String>,
  pub price_field:     String,
  pub reward_field:    String
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct ConfirmConfig {
  pub delete: ConfirmClassConfig,
  pub done:   ConfirmClassConfig
}

/// Missing keys stay blank here and are
/// filled per class during sanitizing.
#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
pub struct ConfirmClassConfig {
  #[serde(default)]
  pub trigger_selector: String,
  #[serde(default)]
  pub confirm_button:   String
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct AlertsConfig {
  pub selector:         String,
  pub dismiss_after_ms: u32
}

#[derive(
  Debug, Clone, Deserialize, PartialEq,
)]
#[serde(default)]
pub struct Messages {
  pub missing_url:     String,
  pub fetch_failed:    String,
  pub fill_manually:   String,
  pub negative_amount: String
}

pub const DEFAULT_DISMISS_AFTER_MS: u32 =
  3_000;

pub const DEFAULT_PLACEHOLDER_IMAGE:
  &str = "/static/Bountygo.png";

fn strings(items: &[&str]) -> Vec<String> {
  items
    .iter()
    .map(|item| item.to_string())
    .collect()
}

impl Default for AutoFillConfig {
  fn default() -> Self {
    Self {
      endpoint:           FETCH_URL_ENDPOINT
        .to_string(),
      trigger:            "btn_fetch"
        .to_string(),
      label:              "btn_text"
        .to_string(),
      spinner:            "btn_spinner"
        .to_string(),
      url_input:          "url_input"
        .to_string(),
      hidden_class:       "d-none"
        .to_string(),
      name_fields:        strings(&[
        "item_name",
        "title"
      ]),
      description_fields: strings(&[
        "item_description",
        "description"
      ]),
      image_url_fields:   strings(&[
        "img_url_input",
        "img_url_hidden"
      ]),
      preview_image:      "item_image"
        .to_string(),
      placeholder_image:
        DEFAULT_PLACEHOLDER_IMAGE
          .to_string()
    }
  }
}

impl Default for PreviewConfig {
  fn default() -> Self {
    Self {
      input: "img_url_input".to_string(),
      image: "item_image".to_string()
    }
  }
}

impl Default for ValidationConfig {
  fn default() -> Self {
    Self {
      exact_actions:   strings(&[
        "/order"
      ]),
      action_prefixes: strings(&[
        "/edit_bounty"
      ]),
      price_field:     "price".to_string(),
      reward_field:    "reward"
        .to_string()
    }
  }
}

impl Default for ConfirmConfig {
  fn default() -> Self {
    Self {
      delete: ConfirmClassConfig {
        trigger_selector:
          ".btn-delete-trigger"
            .to_string(),
        confirm_button:
          "confirmDeleteBtn".to_string()
      },
      done:   ConfirmClassConfig {
        trigger_selector:
          ".btn-done-trigger".to_string(),
        confirm_button:
          "confirmdoneBtn".to_string()
      }
    }
  }
}

impl Default for AlertsConfig {
  fn default() -> Self {
    Self {
      selector:         ".alert-dismissible"
        .to_string(),
      dismiss_after_ms:
        DEFAULT_DISMISS_AFTER_MS
    }
  }
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      missing_url:     "Please paste the \
                        URL."
        .to_string(),
      fetch_failed:    "Failed to \
                        retrieve data."
        .to_string(),
      fill_manually:   "Could not \
                        retrieve data. \
                        Please fill \
                        manually."
        .to_string(),
      negative_amount: "Price and reward \
                        must be \
                        non-negative \
                        numbers."
        .to_string()
    }
  }
}

impl UiConfig {
  #[tracing::instrument(skip(raw))]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<UiConfig>(raw)
        .context(
          "failed to parse ui \
           configuration"
        )?;
    config.sanitize();
    Ok(config)
  }

  /// Parses the configuration bundled
  /// with the page script, falling back
  /// to defaults when it is malformed.
  pub fn load_embedded(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        tracing::info!(
          endpoint = %config.autofill.endpoint,
          dismiss_after_ms = config.alerts.dismiss_after_ms,
          "loaded ui config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(error = %format!("{error:#}"), "failed parsing ui config; using defaults");
        UiConfig::default()
      }
    }
  }

  fn sanitize(&mut self) {
    let defaults = UiConfig::default();

    let autofill = &mut self.autofill;
    let fallback = defaults.autofill;
    keep_or(
      &mut autofill.endpoint,
      fallback.endpoint
    );
    keep_or(
      &mut autofill.trigger,
      fallback.trigger
    );
    keep_or(
      &mut autofill.label,
      fallback.label
    );
    keep_or(
      &mut autofill.spinner,
      fallback.spinner
    );
    keep_or(
      &mut autofill.url_input,
      fallback.url_input
    );
    keep_or(
      &mut autofill.hidden_class,
      fallback.hidden_class
    );
    keep_list_or(
      &mut autofill.name_fields,
      fallback.name_fields
    );
    keep_list_or(
      &mut autofill.description_fields,
      fallback.description_fields
    );
    keep_list_or(
      &mut autofill.image_url_fields,
      fallback.image_url_fields
    );
    keep_or(
      &mut autofill.preview_image,
      fallback.preview_image
    );
    keep_or(
      &mut autofill.placeholder_image,
      fallback.placeholder_image
    );

    keep_or(
      &mut self.preview.input,
      defaults.preview.input
    );
    keep_or(
      &mut self.preview.image,
      defaults.preview.image
    );

    let validation = &mut self.validation;
    if validation.exact_actions.is_empty()
      && validation
        .action_prefixes
        .is_empty()
    {
      validation.exact_actions =
        defaults.validation.exact_actions;
      validation.action_prefixes = defaults
        .validation
        .action_prefixes;
    }
    keep_or(
      &mut validation.price_field,
      defaults.validation.price_field
    );
    keep_or(
      &mut validation.reward_field,
      defaults.validation.reward_field
    );

    for (class, fallback) in [
      (
        &mut self.confirm.delete,
        defaults.confirm.delete
      ),
      (
        &mut self.confirm.done,
        defaults.confirm.done
      ),
    ] {
      keep_or(
        &mut class.trigger_selector,
        fallback.trigger_selector
      );
      keep_or(
        &mut class.confirm_button,
        fallback.confirm_button
      );
    }

    keep_or(
      &mut self.alerts.selector,
      defaults.alerts.selector
    );
    if self.alerts.dismiss_after_ms == 0 {
      tracing::warn!(
        "alerts.dismiss_after_ms was \
         zero; using default delay"
      );
      self.alerts.dismiss_after_ms =
        DEFAULT_DISMISS_AFTER_MS;
    }

    let messages = &mut self.messages;
    let fallback = defaults.messages;
    keep_or(
      &mut messages.missing_url,
      fallback.missing_url
    );
    keep_or(
      &mut messages.fetch_failed,
      fallback.fetch_failed
    );
    keep_or(
      &mut messages.fill_manually,
      fallback.fill_manually
    );
    keep_or(
      &mut messages.negative_amount,
      fallback.negative_amount
    );
  }
}

fn keep_or(
  value: &mut String,
  fallback: String
) {
  if value.trim().is_empty() {
    *value = fallback;
  }
}

fn keep_list_or(
  values: &mut Vec<String>,
  fallback: Vec<String>
) {
  values.retain(|value| {
    !value.trim().is_empty()
  });
  if values.is_empty() {
    *values = fallback;
  }
}
