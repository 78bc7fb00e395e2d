use serde::{
  Deserialize,
  Serialize
};
use serde_json::Value;

pub const FETCH_URL_ENDPOINT: &str =
  "/fetch_url";

pub const FETCH_URL_QUERY_KEY: &str =
  "url";

/// Body returned by `GET /fetch_url`.
///
/// Fields are kept as raw JSON values
/// because the server is loose about
/// types; the accessors apply the
/// truthiness rules the form relies on.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct FetchedMetadata {
  #[serde(default)]
  pub title:       Option<Value>,
  #[serde(default)]
  pub description: Option<Value>,
  #[serde(default)]
  pub image:       Option<Value>,
  #[serde(default)]
  pub error:       Option<Value>
}

impl FetchedMetadata {
  pub fn title(&self) -> Option<&str> {
    non_empty_str(self.title.as_ref())
  }

  /// Missing or non-string
  /// descriptions read as empty.
  pub fn description(&self) -> &str {
    non_empty_str(
      self.description.as_ref()
    )
    .unwrap_or("")
  }

  pub fn image(&self) -> Option<&str> {
    non_empty_str(self.image.as_ref())
  }

  pub fn has_error(&self) -> bool {
    self
      .error
      .as_ref()
      .is_some_and(is_truthy)
  }

  /// A record can fill the form only
  /// when it carries no error and a
  /// non-empty title.
  pub fn is_usable(&self) -> bool {
    !self.has_error()
      && self.title().is_some()
  }
}

fn non_empty_str(
  value: Option<&Value>
) -> Option<&str> {
  match value {
    | Some(Value::String(text))
      if !text.is_empty() =>
    {
      Some(text.as_str())
    }
    | _ => None
  }
}

/// JavaScript truthiness of a JSON
/// value.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    | Value::Null => false,
    | Value::Bool(flag) => *flag,
    | Value::Number(number) => number
      .as_f64()
      .is_some_and(|n| {
        n != 0.0 && !n.is_nan()
      }),
    | Value::String(text) => {
      !text.is_empty()
    }
    | Value::Array(_)
    | Value::Object(_) => true
  }
}

/// Builds `endpoint?url=<encoded>` for
/// the metadata lookup.
pub fn fetch_url_path(
  endpoint: &str,
  raw_url: &str
) -> String {
  format!(
    "{endpoint}?{FETCH_URL_QUERY_KEY}={}",
    urlencoding::encode(raw_url)
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn decode(
    body: Value
  ) -> FetchedMetadata {
    serde_json::from_value(body)
      .expect("metadata should decode")
  }

  #[test]
  fn full_record_is_usable() {
    let meta = decode(json!({
      "title": "Foo",
      "description": "Bar",
      "image": "http://x/y.png"
    }));

    assert!(meta.is_usable());
    assert_eq!(meta.title(), Some("Foo"));
    assert_eq!(meta.description(), "Bar");
    assert_eq!(
      meta.image(),
      Some("http://x/y.png")
    );
  }

  #[test]
  fn truthy_error_blocks_usable_title()
  {
    let meta = decode(json!({
      "title": "Foo",
      "error": "upstream timeout"
    }));

    assert!(meta.has_error());
    assert!(!meta.is_usable());
  }

  #[test]
  fn falsy_error_values_are_ignored() {
    for error in [
      json!(null),
      json!(false),
      json!(0),
      json!("")
    ] {
      let meta = decode(json!({
        "title": "Foo",
        "error": error
      }));
      assert!(
        meta.is_usable(),
        "error {:?} should be falsy",
        meta.error
      );
    }
  }

  #[test]
  fn missing_or_empty_title_is_unusable()
  {
    assert!(
      !decode(json!({})).is_usable()
    );
    assert!(
      !decode(json!({ "title": "" }))
        .is_usable()
    );
    assert!(
      !decode(json!({ "title": 42 }))
        .is_usable()
    );
  }

  #[test]
  fn empty_image_counts_as_absent() {
    let meta = decode(json!({
      "title": "Foo",
      "image": ""
    }));
    assert_eq!(meta.image(), None);
    assert_eq!(meta.description(), "");
  }

  #[test]
  fn unknown_fields_are_tolerated() {
    let meta = decode(json!({
      "title": "Foo",
      "price": "12.00"
    }));
    assert!(meta.is_usable());
  }

  #[test]
  fn fetch_path_percent_encodes_url() {
    let path = fetch_url_path(
      FETCH_URL_ENDPOINT,
      "https://shop.example/item?id=7&q=a b"
    );
    assert_eq!(
      path,
      "/fetch_url?url=https%3A%2F%2Fshop.example%2Fitem%3Fid%3D7%26q%3Da%20b"
    );
  }
}
