//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`
//! exactly; regenerate with `diesel print-schema` after schema changes.

diesel::table! {
    /// User accounts.
    ///
    /// `username` and `email` carry unique indexes; the database is the
    /// arbiter of uniqueness under concurrent signup.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Lower-cased unique username.
        username -> Varchar,
        /// Lower-cased unique email address.
        email -> Varchar,
        /// bcrypt digest of the account password.
        password_hash -> Varchar,
        /// Authorization role: `admin` or the empty string.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Todo items.
    todos (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Item text.
        text -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe records. List-shaped fields are stored as `jsonb`.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipe title.
        title -> Varchar,
        /// Free-form tags (`jsonb` array of strings).
        tags -> Jsonb,
        /// User rating.
        rating -> Int4,
        /// Creator of the recipe.
        creator -> Varchar,
        /// Brief description.
        description -> Text,
        /// Ingredient lines (`jsonb` array of objects).
        ingredients -> Jsonb,
        /// Preparation steps (`jsonb` array of strings).
        directions -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
