//! Consume → decode → fan-out loop.
//!
//! One message at a time: read from the log, decode against the schema,
//! write to both sinks, acknowledge, repeat. Per-message failures are
//! classified by [`StageError::disposition`] and never stop the loop.

mod driver;
mod policy;
mod stats;

pub use driver::{MessageOutcome, PipelineContext, PipelineDriver};
pub use policy::{Disposition, StageError};
pub use stats::{PipelineStats, StatsSnapshot};
