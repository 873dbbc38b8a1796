//! User data model and the session projection derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Coarse authorization tag on a user account.
///
/// Stored as a string: `"admin"` for administrators and the empty string for
/// everyone else. Any unrecognised stored value degrades to [`Role::Member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Default role assigned on signup.
    Member,
}

impl Role {
    const ADMIN: &'static str = "admin";

    /// The stored string form of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::Member => "",
        }
    }

    /// Whether this role grants administrative access.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        if value == Self::ADMIN {
            Self::Admin
        } else {
            Self::Member
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application user as held by the user store.
///
/// ## Invariants
/// - `username` and `email` are lower-cased and unique across all users.
/// - `password_hash` is a bcrypt digest; the plaintext never appears here.
///
/// Deliberately not serializable: responses carry [`SessionUser`] so the
/// password hash cannot leak through a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: Role,
}

impl User {
    /// Assemble a user from already-validated parts.
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    /// Stable user identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Lower-cased unique username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Lower-cased unique email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored bcrypt digest of the password.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Authorization role.
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Minimal identity stored in the server-side session.
///
/// A projection of [`User`], not the record itself: it carries exactly
/// `{id, username, role}` and is discarded on logout or expiry. Role changes
/// on the underlying account become visible only after re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Lower-cased username.
    #[schema(example = "abc")]
    pub username: String,
    /// Authorization role (`"admin"` or `""`).
    #[schema(value_type = String, example = "")]
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_owned(),
            role: user.role(),
        }
    }
}
