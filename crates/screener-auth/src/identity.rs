//! Bearer identity verification contract.

use async_trait::async_trait;

use screener_core::result::AppResult;

/// A principal whose bearer credential has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable subject identifier issued by the identity provider.
    pub subject: String,
    /// Email address, when the provider includes one.
    pub email: Option<String>,
}

/// Turns an opaque bearer token into a verified identity.
///
/// Implementations return an `Unauthorized` error for any token they cannot
/// verify.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verify `token` and return the identity it carries.
    async fn verify(&self, token: &str) -> AppResult<VerifiedIdentity>;
}
