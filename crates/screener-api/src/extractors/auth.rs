//! `AdminUser` extractor: pulls the bearer token from the Authorization
//! header, verifies it, applies the admin policy, and injects the context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;

use screener_core::error::AppError;
use screener_service::context::AdminContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted admin context available in handlers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminContext);

impl AdminUser {
    /// Returns the inner `AdminContext`.
    pub fn context(&self) -> &AdminContext {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = AdminContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing or invalid authorization token"))?;

        let identity = state.identity_verifier.verify(token).await.map_err(|e| {
            warn!(reason = %e.message, "Rejected admin bearer token");
            AppError::unauthorized("Invalid authorization token")
        })?;

        let Some(email) = state.admin_policy.admin_email(&identity) else {
            warn!(subject = %identity.subject, "Non-admin identity on admin route");
            return Err(AppError::forbidden(
                "Unauthorized access - admin privileges required",
            )
            .into());
        };

        Ok(AdminUser(AdminContext::new(
            identity.subject.clone(),
            email.to_string(),
        )))
    }
}
