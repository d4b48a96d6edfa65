//! PostgreSQL press link store.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use screener_core::error::{AppError, ErrorKind};
use screener_core::result::AppResult;
use screener_core::types::PressLinkId;
use screener_entity::press::{NewPressLink, Patch, PressLink, PressLinkPatch, PressLinkView};

use crate::store::{LinkQuery, PressLinkStore, ViewAppend};

/// Press link store backed by the `press_links` table.
#[derive(Debug, Clone)]
pub struct PgPressLinkStore {
    pool: PgPool,
}

impl PgPressLinkStore {
    /// Create a new store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PressLinkStore for PgPressLinkStore {
    async fn find_by_id(&self, id: PressLinkId) -> AppResult<Option<PressLink>> {
        sqlx::query_as::<_, PressLink>("SELECT * FROM press_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find press link", e))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<PressLink>> {
        sqlx::query_as::<_, PressLink>("SELECT * FROM press_links WHERE token = $1 LIMIT 1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find press link by token", e)
            })
    }

    async fn list(&self, query: LinkQuery) -> AppResult<Vec<PressLink>> {
        sqlx::query_as::<_, PressLink>(
            "SELECT * FROM press_links WHERE ($1::BOOLEAN IS NULL OR active = $1) \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(query.active)
        .bind(query.limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list press links", e))
    }

    async fn insert(&self, data: NewPressLink) -> AppResult<PressLink> {
        sqlx::query_as::<_, PressLink>(
            "INSERT INTO press_links (token, video_id, movie_id, movie_title, created_by, created_at, \
             recipient_email, recipient_name, organization, notes, expires_at, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(&data.token)
        .bind(&data.video_id)
        .bind(data.movie_id)
        .bind(&data.movie_title)
        .bind(&data.created_by)
        .bind(data.created_at)
        .bind(&data.recipient_email)
        .bind(&data.recipient_name)
        .bind(&data.organization)
        .bind(&data.notes)
        .bind(data.expires_at)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::with_source(ErrorKind::Conflict, "Press link token already exists", e)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create press link", e)
            }
        })
    }

    async fn update(
        &self,
        id: PressLinkId,
        patch: PressLinkPatch,
    ) -> AppResult<Option<PressLink>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE press_links SET ");
        {
            let mut set = builder.separated(", ");
            if let Patch::Set(value) = patch.recipient_email {
                set.push("recipient_email = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.recipient_name {
                set.push("recipient_name = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.organization {
                set.push("organization = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.notes {
                set.push("notes = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.expires_at {
                set.push("expires_at = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.password_hash {
                set.push("password_hash = ").push_bind_unseparated(value);
            }
            if let Patch::Set(value) = patch.active {
                set.push("active = ").push_bind_unseparated(value);
            }
        }
        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<PressLink>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update press link", e)
            })
    }

    async fn append_view(
        &self,
        id: PressLinkId,
        view: PressLinkView,
    ) -> AppResult<ViewAppend> {
        let at = view.timestamp;
        let link = sqlx::query_as::<_, PressLink>(
            "UPDATE press_links SET view_count = view_count + 1, views = views || $2, \
             last_viewed_at = $3, first_viewed_at = COALESCE(first_viewed_at, $3) \
             WHERE id = $1 AND active AND expires_at >= $3 RETURNING *",
        )
        .bind(id)
        .bind(Json(vec![view]))
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record view", e))?;

        debug!(link_id = %id, recorded = link.is_some(), "Appended press link view");
        if let Some(link) = link {
            return Ok(ViewAppend::Recorded(link));
        }

        Ok(match self.find_by_id(id).await? {
            Some(current) => ViewAppend::Refused(current),
            None => ViewAppend::Missing,
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::migration::run_migrations;

    /// Connects to `DATABASE_URL` and applies migrations.
    async fn connect() -> PgPressLinkStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("connect to PostgreSQL");
        run_migrations(&pool).await.expect("migrations");
        PgPressLinkStore::new(pool)
    }

    /// Current instant truncated to what the column round-trips.
    fn now_ms() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap()
    }

    fn new_link(created_at: DateTime<Utc>) -> NewPressLink {
        NewPressLink {
            token: format!("pg-{}", PressLinkId::new()),
            video_id: "vid-7".to_string(),
            movie_id: 7,
            movie_title: "Harbor Lights".to_string(),
            created_by: "lead.developer@studio.test".to_string(),
            created_at,
            recipient_email: "reviewer@outlet.test".to_string(),
            recipient_name: "Reviewer".to_string(),
            organization: None,
            notes: None,
            expires_at: created_at + Duration::days(7),
            password_hash: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn test_append_view_updates_counters_in_order() {
        let store = connect().await;
        let now = now_ms();
        let link = store.insert(new_link(now)).await.unwrap();

        let first = PressLinkView::new(now, "10.0.0.0", "curl", None);
        let later = now + Duration::minutes(5);
        let second = PressLinkView::new(later, "10.0.1.0", "curl", Some(42.5));

        let ViewAppend::Recorded(after_first) = store.append_view(link.id, first).await.unwrap()
        else {
            panic!("first view was not recorded");
        };
        assert_eq!(after_first.view_count, 1);
        assert_eq!(after_first.first_viewed_at, Some(now));

        let ViewAppend::Recorded(after_second) =
            store.append_view(link.id, second.clone()).await.unwrap()
        else {
            panic!("second view was not recorded");
        };
        assert_eq!(after_second.view_count, 2);
        assert_eq!(after_second.views.len(), 2);
        assert_eq!(after_second.views[1], second);
        assert_eq!(after_second.first_viewed_at, Some(now));
        assert_eq!(after_second.last_viewed_at, Some(second.timestamp));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn test_append_view_refuses_deactivated_and_expired() {
        let store = connect().await;
        let now = now_ms();
        let link = store.insert(new_link(now)).await.unwrap();

        let late_at = link.expires_at + Duration::seconds(1);
        let late = PressLinkView::new(late_at, "10.0.0.0", "t", None);
        assert!(matches!(
            store.append_view(link.id, late).await.unwrap(),
            ViewAppend::Refused(_)
        ));

        store
            .update(link.id, PressLinkPatch::deactivate())
            .await
            .unwrap();
        let view = PressLinkView::new(now, "10.0.0.0", "t", None);
        match store.append_view(link.id, view.clone()).await.unwrap() {
            ViewAppend::Refused(current) => {
                assert!(!current.active);
                assert_eq!(current.view_count, 0);
                assert!(current.views.is_empty());
            }
            other => panic!("expected refusal, got {other:?}"),
        }

        assert_eq!(
            store.append_view(PressLinkId::new(), view).await.unwrap(),
            ViewAppend::Missing
        );
    }
}
