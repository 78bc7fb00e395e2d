use bountygo_core::autofill::MetadataSource;
use bountygo_core::{
  Error,
  Result
};
use bountygo_shared::{
  FetchedMetadata,
  fetch_url_path
};
use gloo::net::http::Request;

/// Metadata lookup against the site's own
/// `/fetch_url` endpoint. No timeout and
/// no cancellation.
pub struct HttpMetadataSource {
  endpoint: String
}

impl HttpMetadataSource {
  pub fn new(endpoint: &str) -> Self {
    Self {
      endpoint: endpoint.to_string()
    }
  }
}

impl MetadataSource for HttpMetadataSource {
  async fn fetch(
    &self,
    url: &str
  ) -> Result<FetchedMetadata> {
    let path =
      fetch_url_path(&self.endpoint, url);
    tracing::debug!(%path, "requesting metadata");

    let response = Request::get(&path)
      .send()
      .await
      .map_err(|e| {
        Error::Transport(e.to_string())
      })?;

    if !response.ok() {
      return Err(Error::Status(
        response.status()
      ));
    }

    response
      .json::<FetchedMetadata>()
      .await
      .map_err(|e| Error::Decode(e.to_string()))
  }
}
