//! Process-local store implementation.

pub mod store;

pub use store::MemoryPressLinkStore;
