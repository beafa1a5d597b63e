// src/presentation/http/state.rs
use crate::application::pipeline::PipelineStats;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub stats: Arc<PipelineStats>,
}
