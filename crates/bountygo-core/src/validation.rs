use crate::config::ValidationConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
  Allow,
  Reject { price: f64, reward: f64 }
}

/// Decides which forms carry the price
/// and reward check, by their `action`
/// attribute.
#[derive(Debug, Clone)]
pub struct ActionMatcher {
  exact:    Vec<String>,
  prefixes: Vec<String>
}

impl ActionMatcher {
  pub fn new(
    config: &ValidationConfig
  ) -> Self {
    Self {
      exact:    config.exact_actions.clone(),
      prefixes: config
        .action_prefixes
        .clone()
    }
  }

  pub fn matches(
    &self,
    action: &str
  ) -> bool {
    self
      .exact
      .iter()
      .any(|exact| exact == action)
      || self.prefixes.iter().any(
        |prefix| {
          action.starts_with(prefix.as_str())
        }
      )
  }
}

/// Reads a form value the way the page
/// always has: the longest numeric
/// prefix after leading whitespace, and
/// zero for anything unparsable.
pub fn parse_amount(raw: &str) -> f64 {
  let value = numeric_prefix(raw)
    .unwrap_or(f64::NAN);
  if value.is_nan() || value == 0.0 {
    0.0
  } else {
    value
  }
}

fn numeric_prefix(raw: &str) -> Option<f64> {
  let text = raw.trim_start();
  let bytes = text.as_bytes();
  let mut end = 0;

  if matches!(
    bytes.first(),
    Some(b'+' | b'-')
  ) {
    end += 1;
  }

  if text[end..].starts_with("Infinity") {
    return text[..end + 8].parse().ok();
  }

  let digits_from = end;
  while end < bytes.len()
    && bytes[end].is_ascii_digit()
  {
    end += 1;
  }
  let mut mantissa_digits =
    end - digits_from;

  if end < bytes.len() && bytes[end] == b'.'
  {
    let fraction_from = end + 1;
    let mut cursor = fraction_from;
    while cursor < bytes.len()
      && bytes[cursor].is_ascii_digit()
    {
      cursor += 1;
    }
    mantissa_digits +=
      cursor - fraction_from;
    if mantissa_digits > 0 {
      end = cursor;
    }
  }

  if mantissa_digits == 0 {
    return None;
  }

  if end < bytes.len()
    && matches!(bytes[end], b'e' | b'E')
  {
    let mut cursor = end + 1;
    if matches!(
      bytes.get(cursor),
      Some(b'+' | b'-')
    ) {
      cursor += 1;
    }
    let exponent_from = cursor;
    while cursor < bytes.len()
      && bytes[cursor].is_ascii_digit()
    {
      cursor += 1;
    }
    if cursor > exponent_from {
      end = cursor;
    }
  }

  text[..end].parse().ok()
}

/// Both values must be non-negative.
/// Range and precision are not checked.
pub fn check_amounts(
  price: &str,
  reward: &str
) -> Verdict {
  let price = parse_amount(price);
  let reward = parse_amount(reward);
  if price < 0.0 || reward < 0.0 {
    tracing::debug!(
      price,
      reward,
      "rejecting negative amount"
    );
    Verdict::Reject { price, reward }
  } else {
    Verdict::Allow
  }
}

/// The fields a submit handler needs from
/// the form it guards.
pub trait AmountForm {
  fn field_value(
    &self,
    name: &str
  ) -> Option<String>;
}

/// Applies the amount check to a form
/// being submitted. Forms missing either
/// field are allowed through.
pub fn check_form<F: AmountForm>(
  form: &F,
  config: &ValidationConfig
) -> Verdict {
  match (
    form.field_value(&config.price_field),
    form.field_value(&config.reward_field)
  ) {
    | (Some(price), Some(reward)) => {
      check_amounts(&price, &reward)
    }
    | _ => Verdict::Allow
  }
}
