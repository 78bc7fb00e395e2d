//! DOM-free behavior behind the listing
//! form: every element the handlers touch
//! is reached through a trait so the
//! browser crate can supply web-sys
//! adapters and tests can supply fakes.

pub mod alerts;
pub mod autofill;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fetch;
pub mod preview;
pub mod validation;

pub use error::{
  Error,
  Result
};
