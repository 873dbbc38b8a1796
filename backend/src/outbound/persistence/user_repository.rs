//! Diesel-backed `UserRepository` adapter.
//!
//! Lookups compare exact values; the credential validator lower-cases
//! usernames and emails before they reach this adapter, and the migrations
//! place unique indexes on both columns.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::error_map::{map_user_pool_error, map_user_query_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_user_query_error)?;
        Ok(())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username).or(users::email.eq(email)))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_query_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find_by_username_or_email(identifier, identifier).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_query_error)?;
        Ok(row.map(User::from))
    }

    async fn delete_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        // The identifier may be a username, an email, or a textual UUID.
        let deleted = match Uuid::parse_str(identifier) {
            Ok(id) => {
                diesel::delete(
                    users::table.filter(
                        users::username
                            .eq(identifier)
                            .or(users::email.eq(identifier))
                            .or(users::id.eq(id)),
                    ),
                )
                .execute(&mut conn)
                .await
            }
            Err(_) => {
                diesel::delete(
                    users::table
                        .filter(users::username.eq(identifier).or(users::email.eq(identifier))),
                )
                .execute(&mut conn)
                .await
            }
        };
        deleted.map_err(map_user_query_error)?;
        Ok(())
    }
}
