/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - sid (provider subject) をキーにした find / upsert を提供
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// Local mirror of a provider identity.
///
/// `sid` is the provider's stable subject and the external key; `id` is a
/// surrogate for internal references. `name`/`email` follow the provider's
/// latest claims and carry no local edits.
#[derive(Debug, Clone, FromRow)]
pub struct LocalUser {
    pub id: Uuid,
    pub sid: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage seam for the identity-sync step. Tests substitute an in-memory
/// implementation; `PgUserRepo` is the production one.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_sid(&self, sid: &str) -> RepoResult<Option<LocalUser>>;

    /// Create-or-refresh keyed by `sid`. Must be race-safe: two concurrent
    /// upserts for the same `sid` end up with a single row.
    async fn upsert(&self, sid: &str, name: Option<&str>, email: &str) -> RepoResult<LocalUser>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn find_by_sid(&self, sid: &str) -> RepoResult<Option<LocalUser>> {
        let row = sqlx::query_as::<_, LocalUser>(
            r#"
            SELECT id, sid, name, email, created_at, updated_at
            FROM users
            WHERE sid = $1
            "#,
        )
        .bind(sid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn upsert(&self, sid: &str, name: Option<&str>, email: &str) -> RepoResult<LocalUser> {
        // The unique index on sid turns the concurrent same-subject case into
        // an update instead of a duplicate row.
        let row = sqlx::query_as::<_, LocalUser>(
            r#"
            INSERT INTO users (sid, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (sid) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                updated_at = now()
            RETURNING id, sid, name, email, created_at, updated_at
            "#,
        )
        .bind(sid)
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
