pub mod entity;


pub use entity::AuditEvent;
