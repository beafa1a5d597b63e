// src/infrastructure/s3.rs
use crate::application::error::ArchiveError;
use crate::application::ports::sinks::ObjectStore;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, config::Region, error::DisplayErrorContext, primitives::ByteStream};

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    /// Custom endpoint (LocalStack, MinIO). `None` uses the provider default.
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    pub bucket: String,
}

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    #[must_use]
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default credential chain plus `settings`.
    pub async fn connect(settings: &S3Settings) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region.clone()));
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(settings.force_path_style)
            .build();

        tracing::info!(
            bucket = %settings.bucket,
            region = %settings.region,
            endpoint = settings.endpoint.as_deref().unwrap_or("default"),
            "s3 client configured"
        );

        Self::new(Client::from_conf(config), settings.bucket.clone())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ArchiveError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| ArchiveError::request(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }
}
