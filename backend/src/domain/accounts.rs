//! Account service: signup, login, deletion, and username probing.
//!
//! Each signup or login attempt resolves to exactly one [`AuthOutcome`];
//! storage failures travel on a separate channel as domain [`Error`]s and
//! are never rephrased as credential messages.

use std::sync::Arc;

use uuid::Uuid;

use super::auth::{CredentialFailure, LoginCredentials, SignupCredentials};
use super::password::{hash_password, verify_password};
use super::ports::{UserPersistenceError, UserRepository};
use super::user::{Role, User};
use super::Error;

/// Result of a credential check: the resolved user or the reason it was
/// refused. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials check out; the authoritative user record.
    Granted(User),
    /// Credentials were refused for the given reason.
    Denied(CredentialFailure),
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate => {
            Error::conflict(CredentialFailure::AlreadyTaken.to_string())
        }
    }
}

/// Use-cases over the user store.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Create a service backed by the given repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account.
    ///
    /// Looks up the username and email first; an existing match is denied as
    /// taken. A concurrent signup can still win the insert, in which case
    /// the unique-index rejection is reported as the same denial.
    pub async fn signup(&self, credentials: &SignupCredentials) -> Result<AuthOutcome, Error> {
        let existing = self
            .users
            .find_by_username_or_email(credentials.username(), credentials.email())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Ok(AuthOutcome::Denied(CredentialFailure::AlreadyTaken));
        }

        let digest = hash_password(credentials.password()).await?;
        let user = User::new(
            Uuid::new_v4(),
            credentials.username(),
            credentials.email(),
            digest,
            Role::Member,
        );

        match self.users.insert(&user).await {
            Ok(()) => Ok(AuthOutcome::Granted(user)),
            Err(UserPersistenceError::Duplicate) => {
                Ok(AuthOutcome::Denied(CredentialFailure::AlreadyTaken))
            }
            Err(error) => Err(map_user_persistence_error(error)),
        }
    }

    /// Authenticate an existing account by username or email.
    ///
    /// An unknown identifier and a wrong password are distinguishable
    /// denials.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error> {
        let found = self
            .users
            .find_by_identifier(credentials.identifier())
            .await
            .map_err(map_user_persistence_error)?;
        let Some(user) = found else {
            return Ok(AuthOutcome::Denied(CredentialFailure::UnknownUser));
        };

        if verify_password(credentials.password(), user.password_hash()).await? {
            Ok(AuthOutcome::Granted(user))
        } else {
            Ok(AuthOutcome::Denied(CredentialFailure::WrongPassword))
        }
    }

    /// Remove any account matching the identifier by username, email, or id.
    /// Idempotent: deleting an absent account succeeds.
    pub async fn delete_account(&self, identifier: &str) -> Result<(), Error> {
        self.users
            .delete_by_identifier(identifier)
            .await
            .map_err(map_user_persistence_error)
    }

    /// Whether a username already belongs to an account.
    pub async fn username_taken(&self, username: &str) -> Result<bool, Error> {
        let found = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(found.is_some())
    }
}
