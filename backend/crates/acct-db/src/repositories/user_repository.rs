//! User repository for the local mirror of identity-provider accounts.
//!
//! Rows are only ever written after the provider side of an operation has
//! succeeded. The repository itself has no knowledge of the provider.

use crate::{DbError, Result as DbErrorResult};

use acct_core::{NewUser, ProfileUpdate, User};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, firebase_uid, email, password_hash, first_name, last_name, \
                            is_active, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &NewUser) -> DbErrorResult<User> {
        let now = user.created_at.timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    firebase_uid, email, password_hash, first_name, last_name,
                    is_active, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.firebase_uid)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::Initialization {
                message: format!("Inserted user {} could not be read back", id),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Look up a row by id, but only if it belongs to the given provider subject
    pub async fn find_by_id_and_uid(
        &self,
        id: i64,
        firebase_uid: &str,
    ) -> DbErrorResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = ? AND firebase_uid = ?",
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_by_firebase_uid(&self, firebase_uid: &str) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE firebase_uid = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Apply a partial profile update. Returns the updated row, or `None` if
    /// no row has this id.
    pub async fn update_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> DbErrorResult<Option<User>> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE users
                SET first_name = COALESCE(?, first_name),
                    last_name = COALESCE(?, last_name),
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Returns `false` when no row carries this subject identifier.
    pub async fn update_email_by_uid(&self, firebase_uid: &str, email: &str) -> DbErrorResult<bool> {
        let now = Utc::now().timestamp();

        let result = sqlx::query("UPDATE users SET email = ?, updated_at = ? WHERE firebase_uid = ?")
            .bind(email)
            .bind(now)
            .bind(firebase_uid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update_password_hash(&self, id: i64, password_hash: &str) -> DbErrorResult<()> {
        let now = Utc::now().timestamp();

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns `false` when the row was already gone.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[track_caller]
fn row_to_user(row: &SqliteRow) -> DbErrorResult<User> {
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(User {
        id: row.try_get("id")?,
        firebase_uid: row.try_get("firebase_uid")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        is_active: row.try_get("is_active")?,
        created_at: timestamp(created_at, "created_at")?,
        updated_at: timestamp(updated_at, "updated_at")?,
    })
}

#[track_caller]
fn timestamp(seconds: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in users.{}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}
