//! Core type definitions used across the screener workspace.

pub mod id;

pub use id::PressLinkId;
