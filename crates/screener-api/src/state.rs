//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use screener_auth::{AdminPolicy, IdentityVerifier, JwtIdentityVerifier, PasswordHasher};
use screener_core::config::AppConfig;
use screener_core::traits::Clock;
use screener_database::PressLinkStore;
use screener_service::{AccessService, PressLinkService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Press link store (PostgreSQL or in-memory)
    pub store: Arc<dyn PressLinkStore>,
    /// Time source for derived link status
    pub clock: Arc<dyn Clock>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    /// Admin authorization policy
    pub admin_policy: Arc<AdminPolicy>,

    // ── Services ─────────────────────────────────────────────
    /// Admin press link service
    pub press_service: Arc<PressLinkService>,
    /// Public token access service
    pub access_service: Arc<AccessService>,
}

impl AppState {
    /// Wires services over `store` and `clock` using `config`.
    ///
    /// Admin bearer tokens are verified as HS256 JWTs signed with
    /// `auth.jwt_secret`.
    pub fn new(config: AppConfig, store: Arc<dyn PressLinkStore>, clock: Arc<dyn Clock>) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let identity_verifier: Arc<dyn IdentityVerifier> =
            Arc::new(JwtIdentityVerifier::new(&config.auth));
        let admin_policy = Arc::new(AdminPolicy::from_config(&config.auth));

        let press_service = Arc::new(PressLinkService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&clock),
            config.press.clone(),
        ));
        let access_service = Arc::new(AccessService::new(
            Arc::clone(&store),
            hasher,
            Arc::clone(&clock),
        ));

        Self {
            config: Arc::new(config),
            store,
            clock,
            identity_verifier,
            admin_policy,
            press_service,
            access_service,
        }
    }

    /// Public base URL for watch links.
    pub fn base_url(&self) -> &str {
        &self.config.press.public_base_url
    }
}
