//! # screener-entity
//!
//! Domain entity models for the press screener service. Every struct in
//! this crate represents either a stored press link row or a value object
//! derived from one. Stored entities additionally derive `sqlx::FromRow`.
//!
//! Wire format is camelCase JSON with instants as epoch milliseconds.

pub mod press;
