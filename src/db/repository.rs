//! Repository pattern implementation for data access layer
//!
//! This module provides the Repository pattern for abstracting database operations.

use crate::core::error::{Result, WardenError};
use crate::db::manager::DatabaseManager;
use crate::db::models::User;
use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row};
use std::sync::Arc;

/// Generic repository trait for CRUD operations
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find an entity by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<()>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<()>;

    /// Delete an entity by its ID
    async fn delete(&self, id: &str) -> Result<()>;
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, roles, is_active, created_at, last_login_at";

/// Roles granted to the first user in an empty store
const BOOTSTRAP_ADMIN_ROLES: &str = "admin,user";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        roles: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        last_login_at: row.get(7)?,
    })
}

/// Repository for User entities
pub struct UserRepository {
    db: Arc<DatabaseManager>,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
                    [&email],
                    user_from_row,
                )
                .optional()
                .map_err(WardenError::DatabaseError)
            })
            .await
    }

    /// Insert a user, granting the admin role when the store is still empty.
    ///
    /// The role decision is part of the INSERT itself, so two racing first
    /// registrations cannot both come out as admin. Returns the user with
    /// the roles that were actually stored.
    pub async fn create_bootstrapped(&self, user: User) -> Result<User> {
        let mut user = user;
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO users (id, email, name, password_hash, roles, is_active, created_at) \
                     VALUES (?1, ?2, ?3, ?4, \
                             CASE WHEN (SELECT COUNT(*) FROM users) = 0 THEN ?5 ELSE ?6 END, \
                             ?7, ?8)",
                    rusqlite::params![
                        &user.id,
                        &user.email,
                        &user.name,
                        &user.password_hash,
                        BOOTSTRAP_ADMIN_ROLES,
                        &user.roles,
                        user.is_active,
                        &user.created_at,
                    ],
                )
                .map_err(WardenError::DatabaseError)?;

                let roles: String = conn
                    .query_row("SELECT roles FROM users WHERE id = ?", [&user.id], |row| {
                        row.get(0)
                    })
                    .map_err(WardenError::DatabaseError)?;
                user.roles = roles;

                Ok(user)
            })
            .await
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
                    .map_err(WardenError::DatabaseError)
            })
            .await
    }

    /// Update user password
    pub async fn update_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let password_hash = password_hash.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE users SET password_hash = ? WHERE id = ?",
                    rusqlite::params![&password_hash, &user_id],
                )
                .map_err(WardenError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    /// Record a successful login for the user
    pub async fn touch_last_login(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE users SET last_login_at = ? WHERE id = ?",
                    rusqlite::params![&now, &user_id],
                )
                .map_err(WardenError::DatabaseError)?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                    [&id],
                    user_from_row,
                )
                .optional()
                .map_err(WardenError::DatabaseError)
            })
            .await
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT {} FROM users ORDER BY created_at DESC",
                        USER_COLUMNS
                    ))
                    .map_err(WardenError::DatabaseError)?;

                let users = stmt
                    .query_map([], user_from_row)
                    .map_err(WardenError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(WardenError::DatabaseError)?;

                Ok(users)
            })
            .await
    }

    async fn create(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO users (id, email, name, password_hash, roles, is_active, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    rusqlite::params![
                        &user.id,
                        &user.email,
                        &user.name,
                        &user.password_hash,
                        &user.roles,
                        user.is_active,
                        &user.created_at,
                    ],
                )
                .map_err(WardenError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    /// Update a user's profile fields. Password changes go through
    /// `update_password` and are never written here.
    async fn update(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "UPDATE users SET email = ?, name = ?, roles = ?, \
                     is_active = ? WHERE id = ?",
                    rusqlite::params![
                        &user.email,
                        &user.name,
                        &user.roles,
                        user.is_active,
                        &user.id,
                    ],
                )
                .map_err(WardenError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.execute("DELETE FROM users WHERE id = ?", [&id])
                    .map_err(WardenError::DatabaseError)?;
                Ok(())
            })
            .await
    }
}
