//! Administrator accounts and credentials

use crate::StorageError;
use numis_core::types::{AuthUser, UserId};
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

/// Create an administrator account
///
/// Emails are stored lowercased and must be unique.
///
/// # Errors
///
/// Returns [`StorageError::Duplicate`] if the email is already registered
pub async fn create(pool: &SqlitePool, email: &str) -> Result<AuthUser> {
    let id = UserId::generate();
    let email = normalize_email(email);

    let result = sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(&email)
        .bind(chrono::Utc::now().timestamp())
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(AuthUser::new(id, email)),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(StorageError::Duplicate(email))
        }
        Err(e) => Err(e.into()),
    }
}

/// Find an administrator by email (case-insensitive)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<AuthUser>> {
    let row = sqlx::query("SELECT id, email FROM users WHERE email = ?")
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| {
        AuthUser::new(
            UserId::new(r.get::<String, _>("id")),
            r.get::<String, _>("email"),
        )
    }))
}

/// Get an administrator by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<AuthUser>> {
    let row = sqlx::query("SELECT id, email FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| {
        AuthUser::new(
            UserId::new(r.get::<String, _>("id")),
            r.get::<String, _>("email"),
        )
    }))
}

/// Get all administrators, ordered by email
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AuthUser>> {
    let rows = sqlx::query("SELECT id, email FROM users ORDER BY email")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| {
            AuthUser::new(
                UserId::new(r.get::<String, _>("id")),
                r.get::<String, _>("email"),
            )
        })
        .collect())
}

/// Get user's password hash for authentication
///
/// Returns `None` if the user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Create or update user credentials
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user_id` - User ID
/// * `password_hash` - Hashed password (already hashed with bcrypt)
pub async fn set_password_hash(
    pool: &SqlitePool,
    user_id: &UserId,
    password_hash: &str,
) -> Result<()> {
    let exists = get_by_id(pool, user_id).await?.is_some();
    if !exists {
        return Err(StorageError::not_found("User", user_id.as_str()));
    }

    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = excluded.updated_at",
    )
    .bind(user_id.as_str())
    .bind(password_hash)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
