//! HS256 bearer token verification.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::JwtIdentityVerifier;
