use anyhow::Result;
use audit_relay::application::{
    pipeline::{PipelineContext, PipelineDriver, PipelineStats},
    ports::{
        codec::EventCodec,
        log::LogReader,
        sinks::{ObjectStore, SearchIndex},
    },
    writer::DualSinkWriter,
};
use audit_relay::config::AppConfig;
use audit_relay::infrastructure::{
    codec::AvroEventCodec, kafka::KafkaLogReader, opensearch::OpenSearchIndex,
    s3::S3ObjectStore, schema::AuditSchema,
};
use audit_relay::presentation::http::{self, state::HttpState};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let schema = Arc::new(AuditSchema::load(config.schema_path())?);
    tracing::info!(path = %config.schema_path().display(), "loaded audit event schema");

    let codec: Arc<dyn EventCodec> = Arc::new(AvroEventCodec::new(Arc::clone(&schema)));
    let index: Arc<dyn SearchIndex> = Arc::new(OpenSearchIndex::new(
        config.opensearch_url(),
        config.opensearch_index(),
    )?);
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::connect(&config.s3_settings()).await);
    let reader: Arc<dyn LogReader> = Arc::new(KafkaLogReader::new(
        config.kafka_brokers(),
        config.kafka_group_id(),
        config.kafka_topic(),
    )?);

    let writer = Arc::new(DualSinkWriter::new(
        Arc::clone(&index),
        Arc::clone(&store),
        Arc::clone(&codec),
        config.archive_format(),
        config.s3_key_prefix(),
    ));
    let stats = Arc::new(PipelineStats::new());

    let driver = PipelineDriver::new(PipelineContext {
        reader,
        codec,
        writer,
        stats: Arc::clone(&stats),
        read_retry_delay: config.read_retry_delay(),
    });

    let status_listener = match config.status_addr() {
        Some(addr) => Some(http::bind(addr).await?),
        None => None,
    };

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    let status_server = status_listener.map(|listener| {
        let state = HttpState {
            stats: Arc::clone(&stats),
        };
        http::spawn(listener, state, cancel.clone())
    });

    tracing::info!(archive_format = %config.archive_format(), "audit relay started");
    driver.run(cancel.clone()).await;
    cancel.cancel();

    if let Some(handle) = status_server {
        handle.await??;
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").ok().unwrap_or_else(|| {
        "info,rdkafka=warn,aws_config=warn,aws_smithy_runtime=warn".to_string()
    });

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => return,
    }
    tracing::info!("shutdown signal received");
    cancel.cancel();
}
