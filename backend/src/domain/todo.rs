//! Todo data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Item text.
    #[schema(example = "buy flour")]
    pub text: String,
}

/// Payload for creating a todo.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TodoDraft {
    /// Item text; required.
    pub text: String,
}

/// Partial update for a todo. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TodoChanges {
    /// Replacement text, when supplied.
    pub text: Option<String>,
}
