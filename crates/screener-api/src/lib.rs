//! # screener-api
//!
//! HTTP API layer for the press screener service built on Axum.
//!
//! Provides the admin and public press link endpoints, middleware (CORS,
//! request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
