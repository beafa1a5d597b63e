// src/application/ports/mod.rs
pub mod codec;
pub mod log;
pub mod sinks;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type EventCodecPort = dyn codec::EventCodec;
pub type LogReaderPort = dyn log::LogReader;
pub type EventPublisherPort = dyn log::EventPublisher;
pub type SearchIndexPort = dyn sinks::SearchIndex;
pub type ObjectStorePort = dyn sinks::ObjectStore;
pub type ClockPort = dyn time::Clock;
