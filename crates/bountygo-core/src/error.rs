use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("request failed: {0}")]
  Transport(String),

  #[error(
    "metadata endpoint answered with \
     status {0}"
  )]
  Status(u16),

  #[error(
    "failed to decode metadata: {0}"
  )]
  Decode(String),

  #[error("form submission failed: {0}")]
  Submit(String),

  #[error("page script call failed: {0}")]
  Script(String)
}

pub type Result<T> =
  std::result::Result<T, Error>;
