// tests/support/mocks/mod.rs
//! In-memory doubles for every pipeline port.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod log;
pub mod sinks;
pub mod util;

pub use log::{RecordingPublisher, ScriptedLogReader};
pub use sinks::{Journal, RecordingIndex, RecordingStore};
pub use time::fixed_now;
pub use util::DummyClock;
