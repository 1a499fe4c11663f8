//! Profile repository: opaque analysis documents keyed by (name, owner).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use wealthsync_core::{Error, ProfileRecord, ProfileStore, ProfileSummary, Result};

/// SQLite implementation of the profile persistence collaborator.
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn save(&self, name: &str, owner: &str, data: &JsonValue) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let data_text = data.to_string();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO profiles (name, owner, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(name, owner)
             DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
             RETURNING id",
        )
        .bind(name)
        .bind(owner)
        .bind(&data_text)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "profiles",
            op = "save",
            profile_id = id,
            owner = owner,
            "Profile saved"
        );
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<ProfileRecord> {
        let row = sqlx::query(
            "SELECT id, name, owner, data, created_at, updated_at
             FROM profiles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::ProfileNotFound(id))?;

        record_from_row(&row)
    }

    async fn list(&self, owner: Option<&str>) -> Result<Vec<ProfileSummary>> {
        let rows = match owner {
            Some(owner) => {
                sqlx::query(
                    "SELECT id, name, owner, created_at FROM profiles
                     WHERE owner = ?1 ORDER BY id DESC",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, name, owner, created_at FROM profiles ORDER BY id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(summary_from_row).collect()
    }
}

fn record_from_row(row: &SqliteRow) -> Result<ProfileRecord> {
    let data_text: String = row.try_get("data")?;
    let data: JsonValue = serde_json::from_str(&data_text)?;

    Ok(ProfileRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        owner: row.try_get("owner")?,
        data,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn summary_from_row(row: &SqliteRow) -> Result<ProfileSummary> {
    Ok(ProfileSummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        owner: row.try_get("owner")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Serialization(format!("invalid timestamp '{}': {}", raw, e)))
}
