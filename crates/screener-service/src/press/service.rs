//! Admin press link management: create, list, inspect, update and deactivate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use screener_auth::PasswordHasher;
use screener_core::config::PressConfig;
use screener_core::error::{AppError, ErrorKind};
use screener_core::result::AppResult;
use screener_core::traits::Clock;
use screener_core::types::PressLinkId;
use screener_database::{LinkQuery, PressLinkStore};
use screener_entity::press::{NewPressLink, Patch, PressLink, PressLinkPatch, StatusFilter, watch_url};

use super::link::TokenIssuer;
use super::validity::safe_expiration;
use crate::context::AdminContext;

/// How many freshly minted tokens are tried before giving up on a create.
const MAX_TOKEN_ATTEMPTS: usize = 3;

/// Upper bound for the admin listing page size.
pub const MAX_LIST_LIMIT: usize = 500;

/// Message returned when a create request lacks a required field.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: videoId, movieId, movieTitle, recipientEmail, recipientName, expiresAt";

/// Input for creating a press link.
#[derive(Debug, Clone)]
pub struct CreatePressLink {
    /// Hosted video reference.
    pub video_id: String,
    /// Catalog movie reference.
    pub movie_id: i64,
    /// Movie title.
    pub movie_title: String,
    /// Recipient email.
    pub recipient_email: String,
    /// Recipient name.
    pub recipient_name: String,
    /// Recipient organization.
    pub organization: Option<String>,
    /// Requested expiration; capped before storing.
    pub expires_at: DateTime<Utc>,
    /// Plaintext access password.
    pub password: Option<String>,
    /// Admin notes.
    pub notes: Option<String>,
}

impl CreatePressLink {
    fn check_required(&self) -> AppResult<()> {
        let blank = [
            &self.video_id,
            &self.movie_title,
            &self.recipient_email,
            &self.recipient_name,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if blank || self.movie_id == 0 {
            return Err(AppError::validation(MISSING_FIELDS_MESSAGE));
        }
        Ok(())
    }
}

/// Input for updating a press link. Absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct UpdatePressLink {
    /// New recipient email.
    pub recipient_email: Patch<String>,
    /// New recipient name.
    pub recipient_name: Patch<String>,
    /// New organization; blank means no change.
    pub organization: Patch<String>,
    /// New requested expiration; capped before storing.
    pub expires_at: Patch<DateTime<Utc>>,
    /// New plaintext password; blank means no change.
    pub password: Patch<String>,
    /// New active flag.
    pub active: Patch<bool>,
    /// New notes; blank means no change.
    pub notes: Patch<String>,
}

/// A newly created link with the URL to hand to the recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPressLink {
    /// The stored link.
    pub link: PressLink,
    /// Public watch URL.
    pub url: String,
    /// The link token.
    pub token: String,
}

/// One page of the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressLinkList {
    /// Matching links, newest first.
    pub links: Vec<PressLink>,
    /// Number of links in `links`.
    pub total: usize,
}

/// Manages press links on behalf of admins.
#[derive(Debug, Clone)]
pub struct PressLinkService {
    /// Press link store.
    store: Arc<dyn PressLinkStore>,
    /// Token issuer for new links.
    issuer: TokenIssuer,
    /// Password hasher for gated links.
    hasher: Arc<PasswordHasher>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Public URL and listing settings.
    config: PressConfig,
}

impl PressLinkService {
    /// Creates a new press link service.
    pub fn new(
        store: Arc<dyn PressLinkStore>,
        hasher: Arc<PasswordHasher>,
        clock: Arc<dyn Clock>,
        config: PressConfig,
    ) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(Arc::clone(&clock)),
            hasher,
            clock,
            config,
        }
    }

    /// Creates a press link and returns it with its watch URL.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        req: CreatePressLink,
    ) -> AppResult<CreatedPressLink> {
        req.check_required()?;

        let now = self.clock.now();
        let base = NewPressLink {
            token: String::new(),
            video_id: req.video_id,
            movie_id: req.movie_id,
            movie_title: req.movie_title,
            created_by: ctx.email.clone(),
            created_at: now,
            recipient_email: req.recipient_email,
            recipient_name: req.recipient_name,
            organization: non_blank(req.organization),
            notes: non_blank(req.notes),
            expires_at: safe_expiration(req.expires_at, now),
            password_hash: non_blank(req.password).map(|p| self.hasher.hash_password(&p)),
        };

        let mut attempt = 1;
        let link = loop {
            let candidate = NewPressLink {
                token: self.issuer.generate_token(),
                ..base.clone()
            };
            match self.store.insert(candidate).await {
                Ok(link) => break link,
                Err(e) if e.kind == ErrorKind::Conflict && attempt < MAX_TOKEN_ATTEMPTS => {
                    warn!(attempt, "Press link token collision, minting a new token");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            admin = %ctx.email,
            link_id = %link.id,
            movie_id = link.movie_id,
            password_protected = link.requires_password(),
            expires_at = %link.expires_at,
            "Press link created"
        );

        Ok(CreatedPressLink {
            url: watch_url(&self.config.public_base_url, &link.token),
            token: link.token.clone(),
            link,
        })
    }

    /// Lists links newest first, filtered by derived status.
    ///
    /// `limit` defaults to the configured page size and is clamped to
    /// `1..=500`. It bounds the store read, so time-based filters may return
    /// fewer links than the limit.
    pub async fn list(
        &self,
        ctx: &AdminContext,
        status: StatusFilter,
        limit: Option<usize>,
    ) -> AppResult<PressLinkList> {
        let limit = limit
            .unwrap_or(self.config.default_list_limit)
            .clamp(1, MAX_LIST_LIMIT);
        let query = LinkQuery {
            active: status.active_flag(),
            limit,
        };

        let now = self.clock.now();
        let links: Vec<PressLink> = self
            .store
            .list(query)
            .await?
            .into_iter()
            .filter(|link| status.matches(link, now))
            .collect();

        info!(admin = %ctx.email, status = ?status, count = links.len(), "Listed press links");

        Ok(PressLinkList {
            total: links.len(),
            links,
        })
    }

    /// Fetches one link.
    pub async fn get(&self, _ctx: &AdminContext, id: PressLinkId) -> AppResult<PressLink> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Press link not found"))
    }

    /// Applies a partial update and returns the updated link.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        id: PressLinkId,
        req: UpdatePressLink,
    ) -> AppResult<PressLink> {
        let now = self.clock.now();
        let patch = PressLinkPatch {
            recipient_email: req.recipient_email,
            recipient_name: req.recipient_name,
            organization: req.organization.ignore_blank(),
            notes: req.notes.ignore_blank(),
            expires_at: req.expires_at.map(|at| safe_expiration(at, now)),
            password_hash: req
                .password
                .ignore_blank()
                .map(|p| self.hasher.hash_password(&p)),
            active: req.active,
        };

        if patch.is_empty() {
            return Err(AppError::validation("No update data provided"));
        }
        let fields = patch.changed_fields();

        let link = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Press link not found"))?;

        info!(admin = %ctx.email, link_id = %id, fields = ?fields, "Press link updated");
        Ok(link)
    }

    /// Soft-deletes a link by clearing its active flag.
    pub async fn deactivate(&self, ctx: &AdminContext, id: PressLinkId) -> AppResult<PressLink> {
        let link = self
            .store
            .update(id, PressLinkPatch::deactivate())
            .await?
            .ok_or_else(|| AppError::not_found("Press link not found"))?;

        info!(admin = %ctx.email, link_id = %id, "Press link deactivated");
        Ok(link)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
