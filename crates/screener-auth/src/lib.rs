//! # screener-auth
//!
//! Credentials and identities for press link access.
//!
//! ## Modules
//!
//! - `password`: SHA-256 hashing and constant-time verification of link passwords
//! - `identity`: the bearer identity collaborator contract
//! - `jwt`: HS256 implementation of that contract
//! - `admin`: the admin authorization policy

pub mod admin;
pub mod identity;
pub mod jwt;
pub mod password;

pub use admin::AdminPolicy;
pub use identity::{IdentityVerifier, VerifiedIdentity};
pub use jwt::{Claims, JwtIdentityVerifier};
pub use password::PasswordHasher;
