//! PostgreSQL repository implementations.

pub mod press_link;
