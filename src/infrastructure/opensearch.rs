// src/infrastructure/opensearch.rs
use crate::application::error::IndexError;
use crate::application::ports::sinks::SearchIndex;
use async_trait::async_trait;
use reqwest::{Client, Url};

/// Writes documents through the OpenSearch REST API
/// (`PUT /<index>/_doc/<id>`), which creates or replaces by id.
#[derive(Clone)]
pub struct OpenSearchIndex {
    client: Client,
    base_url: Url,
    index: String,
}

impl OpenSearchIndex {
    /// # Errors
    ///
    /// Returns [`IndexError::Request`] when `base_url` is not an absolute base URL.
    pub fn new(base_url: &str, index: impl Into<String>) -> Result<Self, IndexError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| IndexError::request(format!("invalid opensearch url `{base_url}`: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(IndexError::request(format!(
                "opensearch url `{base_url}` cannot be a base"
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|err| IndexError::request(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            index: index.into(),
        })
    }

    /// # Errors
    ///
    /// Returns [`IndexError::Request`] when the base URL cannot take path segments.
    pub fn document_url(&self, id: &str) -> Result<Url, IndexError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IndexError::request(format!("`{}` cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend([self.index.as_str(), "_doc", id]);
        Ok(url)
    }
}

#[async_trait]
impl SearchIndex for OpenSearchIndex {
    async fn upsert(&self, id: &str, document: &serde_json::Value) -> Result<(), IndexError> {
        let url = self.document_url(id)?;
        let response = self
            .client
            .put(url)
            .json(document)
            .send()
            .await
            .map_err(|err| IndexError::request(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
