/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (ユーザー本体 + favourites 配列)
 * - UserStore trait で永続化層を差し替え可能にする (テストは in-memory 実装)
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub password_hash: String,
    pub favourites: Vec<String>,
}

/// Persistence seam for users and their favourites.
///
/// Favourites behave as an ordered set: adding an existing item is a no-op.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. A taken `user_name` yields `RepoError::Conflict`.
    async fn create(&self, user_name: &str, password_hash: &str) -> RepoResult<UserRow>;

    async fn find_by_user_name(&self, user_name: &str) -> RepoResult<Option<UserRow>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>>;

    /// Returns the updated list, or `None` when the user is missing or the
    /// list already holds `limit` items and `item` is not one of them.
    async fn add_favourite(
        &self,
        id: Uuid,
        item: &str,
        limit: usize,
    ) -> RepoResult<Option<Vec<String>>>;

    /// Returns the updated list, or `None` when the user is missing.
    async fn remove_favourite(&self, id: Uuid, item: &str) -> RepoResult<Option<Vec<String>>>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user_name: &str, password_hash: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, password_hash)
            VALUES ($1, $2)
            RETURNING id, user_name, password_hash, favourites
            "#,
        )
        .bind(user_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_user_name(&self, user_name: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, password_hash, favourites
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, password_hash, favourites
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn add_favourite(
        &self,
        id: Uuid,
        item: &str,
        limit: usize,
    ) -> RepoResult<Option<Vec<String>>> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);

        // Single statement: the membership check and the append see the same row version.
        let favourites = sqlx::query_scalar::<_, Vec<String>>(
            r#"
            UPDATE users
            SET favourites = CASE
                WHEN $2 = ANY(favourites) THEN favourites
                ELSE array_append(favourites, $2)
            END
            WHERE id = $1
                AND ($2 = ANY(favourites) OR cardinality(favourites) < $3)
            RETURNING favourites
            "#,
        )
        .bind(id)
        .bind(item)
        .bind(limit)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favourites)
    }

    async fn remove_favourite(&self, id: Uuid, item: &str) -> RepoResult<Option<Vec<String>>> {
        let favourites = sqlx::query_scalar::<_, Vec<String>>(
            r#"
            UPDATE users
            SET favourites = array_remove(favourites, $2)
            WHERE id = $1
            RETURNING favourites
            "#,
        )
        .bind(id)
        .bind(item)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favourites)
    }
}
