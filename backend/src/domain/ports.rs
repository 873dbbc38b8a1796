//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants; the domain never sees a storage library type.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::recipe::{Recipe, RecipeChanges, RecipeDraft};
use super::todo::{Todo, TodoChanges, TodoDraft};
use super::user::User;

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// An insert collided with the unique index on username or email.
    ///
    /// Surfaced distinctly so a lost check-then-insert race reads as an
    /// "already taken" rejection rather than a generic failure.
    #[error("user violates a username/email uniqueness constraint")]
    Duplicate,
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by the todo and recipe repositories.
///
/// The two document collections share failure semantics, so one error type
/// serves both ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentPersistenceError {
    /// Repository connection could not be established.
    #[error("document repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("document repository query failed: {message}")]
    Query { message: String },
}

impl DocumentPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user aggregates.
///
/// Lookups compare against lower-cased stored values; callers pass inputs
/// already lower-cased by the credential validator.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. The storage layer's unique index is the arbiter
    /// of uniqueness; collisions surface as
    /// [`UserPersistenceError::Duplicate`].
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user whose username or email matches either supplied value.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user whose username or email equals the single identifier.
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove any user whose username, email, or id matches the identifier.
    /// Absence is not an error.
    async fn delete_by_identifier(&self, identifier: &str)
    -> Result<(), UserPersistenceError>;
}

/// Persistence port for todo items.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List every stored todo.
    async fn list(&self) -> Result<Vec<Todo>, DocumentPersistenceError>;

    /// Persist a new todo and return it with its assigned id.
    async fn create(&self, draft: TodoDraft) -> Result<Todo, DocumentPersistenceError>;

    /// Fetch a todo by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DocumentPersistenceError>;

    /// Apply a partial update, returning the updated todo when it exists.
    async fn update(
        &self,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, DocumentPersistenceError>;

    /// Delete a todo by id. Absence is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError>;
}

/// Persistence port for recipe records.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List every stored recipe.
    async fn list(&self) -> Result<Vec<Recipe>, DocumentPersistenceError>;

    /// Persist a new recipe and return it with its assigned id.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, DocumentPersistenceError>;

    /// Fetch a recipe by id.
    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<Recipe>, DocumentPersistenceError>;

    /// Apply a partial update, returning the updated recipe when it exists.
    async fn update(
        &self,
        id: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DocumentPersistenceError>;

    /// Delete a recipe by id. Absence is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn persistence_errors_carry_their_messages() {
        let connection = UserPersistenceError::connection("refused");
        let query = DocumentPersistenceError::query("syntax error");

        assert!(connection.to_string().contains("refused"));
        assert!(query.to_string().contains("syntax error"));
    }

    #[rstest]
    fn duplicate_is_distinct_from_query_failures() {
        assert_ne!(
            UserPersistenceError::Duplicate,
            UserPersistenceError::query("duplicate key value")
        );
    }
}
