//! The press link store contract.

use async_trait::async_trait;

use screener_core::result::AppResult;
use screener_core::types::PressLinkId;
use screener_entity::press::{NewPressLink, PressLink, PressLinkPatch, PressLinkView};

/// Equality conditions and limit for listing press links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkQuery {
    /// Only links whose `active` flag equals this value.
    pub active: Option<bool>,
    /// Maximum number of links returned.
    pub limit: usize,
}

impl LinkQuery {
    /// Every link, newest first, up to `limit`.
    pub fn all(limit: usize) -> Self {
        Self {
            active: None,
            limit,
        }
    }
}

/// Result of a conditional view append.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAppend {
    /// The view was recorded. Holds the updated link.
    Recorded(PressLink),
    /// The link was deactivated or expired at the view's timestamp. Holds
    /// the link as stored, unchanged.
    Refused(PressLink),
    /// No link has this id.
    Missing,
}

/// Document-store style persistence for press links.
///
/// Implementations must guarantee that `token` is unique and that
/// [`append_view`](Self::append_view) is atomic with respect to concurrent
/// calls on the same link.
#[async_trait]
pub trait PressLinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a link by its store identifier.
    async fn find_by_id(&self, id: PressLinkId) -> AppResult<Option<PressLink>>;

    /// Fetch the link carrying `token`.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<PressLink>>;

    /// List links newest first.
    async fn list(&self, query: LinkQuery) -> AppResult<Vec<PressLink>>;

    /// Insert a link and return it with its generated identifier.
    ///
    /// Fails with a `Conflict` error if the token is already taken.
    async fn insert(&self, link: NewPressLink) -> AppResult<PressLink>;

    /// Apply a partial update. Returns `None` if no link has this id.
    async fn update(&self, id: PressLinkId, patch: PressLinkPatch)
    -> AppResult<Option<PressLink>>;

    /// Atomically append a view, bump the counter and the view timestamps,
    /// provided the link is active and unexpired at `view.timestamp`.
    ///
    /// The usability check and the write happen in the same atomic step.
    async fn append_view(&self, id: PressLinkId, view: PressLinkView) -> AppResult<ViewAppend>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
