use anyhow::Context;
use des_core::decay::{DecayDataSource, DecayTable, decay_search_url, parse_decay_document};
use des_core::domain::{DesError, DesResult, IsotopeId};
use tracing::info;

/// Blocking client for the NNDC decay-search page. One GET per run, no retries.
pub(super) struct NndcClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NndcClient {
    pub(super) fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("des-spectrum/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl DecayDataSource for NndcClient {
    fn fetch(&self, isotope: &IsotopeId) -> DesResult<DecayTable> {
        let url = decay_search_url(&self.base_url, isotope);
        info!(%url, "fetching decay data");

        let unavailable = |detail: String| {
            DesError::data_unavailable(
                "DATA.DECAY_FETCH",
                format!("failed to fetch decay data for {isotope} from '{url}': {detail}"),
            )
        };

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|source| unavailable(source.to_string()))?;
        let body = response
            .text()
            .map_err(|source| unavailable(source.to_string()))?;

        Ok(parse_decay_document(&body)?)
    }
}
