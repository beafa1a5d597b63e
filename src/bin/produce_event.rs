// src/bin/produce_event.rs
//
// Publish a single audit event to the log, encoded with the shared schema.
use anyhow::Result;
use audit_relay::application::{
    ports::{codec::EventCodec, log::EventPublisher, time::Clock},
    producer::{AuditEventProducer, NewAuditEvent},
};
use audit_relay::config::AppConfig;
use audit_relay::infrastructure::{
    codec::AvroEventCodec, kafka::KafkaEventPublisher, schema::AuditSchema, time::SystemClock,
};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "produce_event", about = "Publish one audit event to the audit log")]
struct Args {
    /// Event id; a random `evt-<uuid>` is generated when omitted.
    #[arg(long)]
    id: Option<String>,

    #[arg(long, default_value = "edited")]
    action: String,

    #[arg(long, env = "AUDIT_CONTACT_ID")]
    contact_id: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        tracing::error!(error = %err, "failed to publish audit event");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    init_tracing();
    let config = AppConfig::from_env()?;

    let schema = Arc::new(AuditSchema::load(config.schema_path())?);
    let codec: Arc<dyn EventCodec> = Arc::new(AvroEventCodec::new(schema));
    let publisher: Arc<dyn EventPublisher> = Arc::new(KafkaEventPublisher::new(
        config.kafka_brokers(),
        config.kafka_topic(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let producer = AuditEventProducer::new(codec, publisher, clock);
    let event = producer
        .emit(NewAuditEvent {
            id: args.id,
            action: args.action,
            contact_id: args.contact_id,
        })
        .await?;

    println!("{}", serde_json::to_string(&event)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,rdkafka=warn".to_string());

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
