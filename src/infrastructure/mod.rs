pub mod codec;
pub mod kafka;
pub mod opensearch;
pub mod s3;
pub mod schema;
pub mod time;
