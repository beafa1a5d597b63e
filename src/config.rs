// src/config.rs
use crate::application::writer::ArchiveFormat;
use crate::infrastructure::s3::S3Settings;
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    kafka_brokers: String,
    kafka_topic: String,
    kafka_group_id: String,
    schema_path: PathBuf,
    opensearch_url: String,
    opensearch_index: String,
    // Object store
    s3_endpoint: Option<String>,
    s3_region: String,
    s3_bucket: String,
    s3_key_prefix: String,
    s3_force_path_style: bool,
    archive_format: ArchiveFormat,
    read_retry_delay: Duration,
    status_addr: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_read_retry_delay_ms() -> u64 {
    500
}

impl AppConfig {
    /// Build configuration from environment variables. Every value has a
    /// default matching the local docker-compose stack.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is empty or unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is empty or unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| -> Result<String, ConfigError> {
            let value = lookup(key).unwrap_or_else(|| default.to_string());
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(ConfigError::Invalid(format!("{key} must not be empty")))
            } else {
                Ok(value)
            }
        };

        let s3_endpoint = match lookup("S3_ENDPOINT") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some("http://localhost:4566".to_string()),
        };

        let s3_force_path_style = match lookup("S3_FORCE_PATH_STYLE") {
            Some(v) => parse_bool("S3_FORCE_PATH_STYLE", &v)?,
            None => true,
        };

        let archive_format = match lookup("ARCHIVE_FORMAT") {
            Some(v) => v.parse::<ArchiveFormat>().map_err(ConfigError::Invalid)?,
            None => ArchiveFormat::default(),
        };

        let read_retry_delay_ms = match lookup("READ_RETRY_DELAY_MS") {
            Some(v) => v.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("READ_RETRY_DELAY_MS must be an integer, got `{v}`"))
            })?,
            None => default_read_retry_delay_ms(),
        };

        let status_addr = lookup("STATUS_ADDR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            kafka_brokers: text("KAFKA_BROKERS", "localhost:9092")?,
            kafka_topic: text("KAFKA_TOPIC", "audit-events")?,
            kafka_group_id: text("KAFKA_GROUP_ID", "audit-consumer-group")?,
            schema_path: PathBuf::from(text("SCHEMA_PATH", "schema/audit_event.avsc")?),
            opensearch_url: text("OPENSEARCH_URL", "http://localhost:9200")?,
            opensearch_index: text("OPENSEARCH_INDEX", "audit-events")?,
            s3_endpoint,
            s3_region: text("S3_REGION", "us-east-1")?,
            s3_bucket: text("S3_BUCKET", "audit-poc")?,
            s3_key_prefix: lookup("S3_KEY_PREFIX")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| "audit-events".to_string()),
            s3_force_path_style,
            archive_format,
            read_retry_delay: Duration::from_millis(read_retry_delay_ms),
            status_addr,
        })
    }

    #[must_use]
    pub fn kafka_brokers(&self) -> &str {
        &self.kafka_brokers
    }

    #[must_use]
    pub fn kafka_topic(&self) -> &str {
        &self.kafka_topic
    }

    #[must_use]
    pub fn kafka_group_id(&self) -> &str {
        &self.kafka_group_id
    }

    #[must_use]
    pub fn schema_path(&self) -> &PathBuf {
        &self.schema_path
    }

    #[must_use]
    pub fn opensearch_url(&self) -> &str {
        &self.opensearch_url
    }

    #[must_use]
    pub fn opensearch_index(&self) -> &str {
        &self.opensearch_index
    }

    #[must_use]
    pub fn s3_settings(&self) -> S3Settings {
        S3Settings {
            region: self.s3_region.clone(),
            endpoint: self.s3_endpoint.clone(),
            force_path_style: self.s3_force_path_style,
            bucket: self.s3_bucket.clone(),
        }
    }

    /// Prefix for archive object keys; may be empty.
    #[must_use]
    pub fn s3_key_prefix(&self) -> &str {
        &self.s3_key_prefix
    }

    #[must_use]
    pub fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    #[must_use]
    pub fn read_retry_delay(&self) -> Duration {
        self.read_retry_delay
    }

    /// Address for the status server; `None` disables it.
    #[must_use]
    pub fn status_addr(&self) -> Option<&str> {
        self.status_addr.as_deref()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{key} must be a boolean, got `{other}`"
        ))),
    }
}
