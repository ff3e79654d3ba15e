//! User account storage: signup and signin against the SQLite `users` table.
//!
//! Both operations are single statements. Signup relies on the table's
//! UNIQUE constraints for atomicity instead of a check-then-insert pre-query,
//! so two concurrent signups with the same username or email cannot both
//! succeed. A constraint hit is a domain outcome ([`SignupOutcome::Conflict`]),
//! not an error.
//!
//! Passwords are stored and compared as plaintext to match the demo's
//! reference behavior. Do not reuse this module anywhere near real
//! credentials without hashing (see DESIGN.md).

use anyhow::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// A stored account. The password column never leaves this module.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: i64,
}

/// Result of a signup attempt.
#[derive(Debug)]
pub enum SignupOutcome {
    Created(User),
    /// Username or email already taken (case-sensitive exact match).
    Conflict,
}

/// Insert a new account, mapping a unique-constraint violation to
/// [`SignupOutcome::Conflict`].
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<SignupOutcome> {
    let now = chrono::Utc::now().timestamp();

    let res = sqlx::query(
        "INSERT INTO users (username, email, password, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password)
    .bind(now)
    .execute(pool)
    .await;

    match res {
        Ok(done) => Ok(SignupOutcome::Created(User {
            id: done.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: now,
        })),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(SignupOutcome::Conflict),
        Err(e) => Err(e.into()),
    }
}

/// Return the account whose username and password both match exactly,
/// or `None` for a wrong password or an unknown username.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, email, created_at FROM users WHERE username = ? AND password = ?",
    )
    .bind(username)
    .bind(password)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| User {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        created_at: r.get("created_at"),
    }))
}
