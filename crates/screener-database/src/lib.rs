//! # screener-database
//!
//! Persistence for press links. [`PressLinkStore`] is the collaborator
//! contract the services consume; [`PgPressLinkStore`] backs it with
//! PostgreSQL and [`MemoryPressLinkStore`] keeps everything in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryPressLinkStore;
pub use repositories::press_link::PgPressLinkStore;
pub use store::{LinkQuery, PressLinkStore, ViewAppend};
