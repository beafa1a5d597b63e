pub mod error;
pub mod pipeline;
pub mod ports;
pub mod producer;
pub mod writer;
