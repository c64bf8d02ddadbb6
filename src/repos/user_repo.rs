/*
 * Responsibility
 * - token の subject (users."userId") から UserRecord を引く
 * - Postgres 実装と、テスト/開発用のインメモリ実装
 */
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::auth::identity::{LookupError, UserLookup, UserRecord};

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "userName")]
    pub user_name: String,
    #[sqlx(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            subject: row.id.to_string(),
            user_name: row.user_name,
            image_url: row.image_url,
        }
    }
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "userName", "imageUrl"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Users table lookup. Subjects are the users' UUIDs.
#[derive(Clone, Debug)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLookup for PgUserRepo {
    async fn lookup(&self, subject: &str) -> Result<UserRecord, LookupError> {
        // A subject that isn't a UUID can't name any row.
        let user_id = Uuid::parse_str(subject).map_err(|_| LookupError::NotFound)?;

        get(&self.db, user_id)
            .await?
            .map(UserRecord::from)
            .ok_or(LookupError::NotFound)
    }
}

/// Fixed set of users, keyed by subject.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserRepo {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserRepo {
    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.insert(user.subject.clone(), user);
        self
    }
}

#[async_trait]
impl UserLookup for InMemoryUserRepo {
    async fn lookup(&self, subject: &str) -> Result<UserRecord, LookupError> {
        self.users.get(subject).cloned().ok_or(LookupError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_lookup() {
        let repo = InMemoryUserRepo::default().with_user(UserRecord {
            subject: "user-1".to_string(),
            user_name: "alice".to_string(),
            image_url: Some("https://example.com/a.png".to_string()),
        });

        let user = repo.lookup("user-1").await.unwrap();
        assert_eq!(user.user_name, "alice");
        assert!(matches!(
            repo.lookup("user-2").await,
            Err(LookupError::NotFound)
        ));
    }

    #[test]
    fn row_maps_to_record() {
        let id = Uuid::new_v4();
        let record = UserRecord::from(UserRow {
            id,
            user_name: "bob".to_string(),
            image_url: None,
        });
        assert_eq!(record.subject, id.to_string());
        assert_eq!(record.user_name, "bob");
    }
}
