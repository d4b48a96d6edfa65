//! In-process press link store backed by `DashMap`.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use screener_core::error::AppError;
use screener_core::result::AppResult;
use screener_core::types::PressLinkId;
use screener_entity::press::{
    LinkStatus, NewPressLink, PressLink, PressLinkPatch, PressLinkView,
};

use crate::store::{LinkQuery, PressLinkStore, ViewAppend};

/// Press link store that lives for the lifetime of the process.
///
/// `links` holds the records; `tokens` is the unique token index. Per-entry
/// locks on `links` serialize concurrent view appends on the same link.
#[derive(Debug, Default)]
pub struct MemoryPressLinkStore {
    links: DashMap<PressLinkId, PressLink>,
    tokens: DashMap<String, PressLinkId>,
}

impl MemoryPressLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links, active or not.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl PressLinkStore for MemoryPressLinkStore {
    async fn find_by_id(&self, id: PressLinkId) -> AppResult<Option<PressLink>> {
        Ok(self.links.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<PressLink>> {
        let Some(id) = self.tokens.get(token).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn list(&self, query: LinkQuery) -> AppResult<Vec<PressLink>> {
        let mut links: Vec<PressLink> = self
            .links
            .iter()
            .filter(|entry| query.active.is_none_or(|active| entry.active == active))
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links.truncate(query.limit);
        Ok(links)
    }

    async fn insert(&self, data: NewPressLink) -> AppResult<PressLink> {
        match self.tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Press link token already exists")),
            Entry::Vacant(slot) => {
                let id = PressLinkId::new();
                let link = data.into_link(id);
                self.links.insert(id, link.clone());
                slot.insert(id);
                debug!(link_id = %id, "Inserted press link");
                Ok(link)
            }
        }
    }

    async fn update(
        &self,
        id: PressLinkId,
        patch: PressLinkPatch,
    ) -> AppResult<Option<PressLink>> {
        let Some(mut entry) = self.links.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(entry.value_mut());
        Ok(Some(entry.value().clone()))
    }

    async fn append_view(
        &self,
        id: PressLinkId,
        view: PressLinkView,
    ) -> AppResult<ViewAppend> {
        let Some(mut entry) = self.links.get_mut(&id) else {
            return Ok(ViewAppend::Missing);
        };
        if entry.status_at(view.timestamp) != LinkStatus::Active {
            return Ok(ViewAppend::Refused(entry.value().clone()));
        }
        entry.value_mut().apply_view(view);
        Ok(ViewAppend::Recorded(entry.value().clone()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
