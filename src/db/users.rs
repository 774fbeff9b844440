//! User account queries and mutations
//!
//! Users have no foreign-key relationship to videos or progress; mentor and
//! mentee identities elsewhere in the schema are plain email strings.

use crate::db::models::User;
use crate::error::{Error, Result};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Incoming user payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub mentor: String,
}

/// Partial user update: only `Some` fields are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub logged_in: Option<bool>,
    pub picture: Option<String>,
    pub track: Option<String>,
    pub mentor: Option<String>,
}

/// Insert a new user; a taken email trips the UNIQUE constraint -> Conflict
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, logged_in, picture, track, mentor, created_at)
        VALUES (?, ?, 0, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.picture)
    .bind(&user.track)
    .bind(&user.mentor)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "Email already registered"))?;

    get_user(pool, result.last_insert_rowid()).await
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await?)
}

/// Apply a typed patch to a user; fields left as None are untouched
pub async fn update_user(pool: &SqlitePool, user_id: i64, patch: &UserPatch) -> Result<User> {
    let current = get_user(pool, user_id).await?;

    let name = patch.name.as_deref().unwrap_or(&current.name);
    let email = patch.email.as_deref().unwrap_or(&current.email);
    let logged_in = patch.logged_in.unwrap_or(current.logged_in);
    let picture = patch.picture.as_deref().unwrap_or(&current.picture);
    let track = patch.track.as_deref().unwrap_or(&current.track);
    let mentor = patch.mentor.as_deref().unwrap_or(&current.mentor);

    sqlx::query(
        r#"
        UPDATE users
        SET name = ?, email = ?, logged_in = ?, picture = ?, track = ?, mentor = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(logged_in)
    .bind(picture)
    .bind(track)
    .bind(mentor)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "Email already registered"))?;

    get_user(pool, user_id).await
}

pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    let user = get_user(pool, user_id).await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            picture: String::new(),
            track: "backend".to_string(),
            mentor: "Grace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let pool = test_pool().await;

        let user = create_user(&pool, &new_user("ada@x.com")).await.unwrap();
        assert!(!user.logged_in);
        assert_eq!(user.picture, "");
        assert_eq!(user.track, "backend");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_pool().await;

        create_user(&pool, &new_user("ada@x.com")).await.unwrap();
        let err = create_user(&pool, &new_user("ada@x.com")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_patch_name_only_leaves_rest() {
        let pool = test_pool().await;
        let user = create_user(&pool, &new_user("ada@x.com")).await.unwrap();

        let patch = UserPatch {
            name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        };
        let updated = update_user(&pool, user.id, &patch).await.unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.email, "ada@x.com");
        assert_eq!(updated.track, "backend");
        assert_eq!(updated.mentor, "Grace");
    }

    #[tokio::test]
    async fn test_patch_to_taken_email_conflicts() {
        let pool = test_pool().await;
        create_user(&pool, &new_user("ada@x.com")).await.unwrap();
        let other = create_user(&pool, &new_user("grace@x.com")).await.unwrap();

        let patch = UserPatch {
            email: Some("ada@x.com".to_string()),
            ..Default::default()
        };
        let err = update_user(&pool, other.id, &patch).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_update_delete_missing_not_found() {
        let pool = test_pool().await;

        assert!(matches!(
            get_user(&pool, 9).await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            update_user(&pool, 9, &UserPatch::default()).await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            delete_user(&pool, 9).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let pool = test_pool().await;
        let user = create_user(&pool, &new_user("ada@x.com")).await.unwrap();
        create_user(&pool, &new_user("grace@x.com")).await.unwrap();

        delete_user(&pool, user.id).await.unwrap();

        let users = list_users(&pool).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "grace@x.com");
    }
}
