//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions into domain types live here so the repositories stay
//! focused on query shape.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::DocumentPersistenceError;
use crate::domain::{Ingredient, Recipe, Role, Todo, User};

use super::schema::{recipes, todos, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.id,
            row.username,
            row.email,
            row.password_hash,
            Role::from(row.role),
        )
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id(),
            username: user.username(),
            email: user.email(),
            password_hash: user.password_hash(),
            role: user.role().as_str(),
        }
    }
}

/// Row struct for reading from the todos table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: Uuid,
    pub text: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            text: row.text,
        }
    }
}

/// Insertable struct for creating new todo records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow<'a> {
    pub id: Uuid,
    pub text: &'a str,
}

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub tags: serde_json::Value,
    pub rating: i32,
    pub creator: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub directions: serde_json::Value,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

fn decode_column<T: serde::de::DeserializeOwned>(
    column: &str,
    value: serde_json::Value,
) -> Result<T, DocumentPersistenceError> {
    serde_json::from_value(value)
        .map_err(|err| DocumentPersistenceError::query(format!("malformed {column} column: {err}")))
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = DocumentPersistenceError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let tags: Vec<String> = decode_column("tags", row.tags)?;
        let ingredients: Vec<Ingredient> = decode_column("ingredients", row.ingredients)?;
        let directions: Vec<String> = decode_column("directions", row.directions)?;

        Ok(Recipe {
            id: row.id,
            title: row.title,
            tags,
            rating: row.rating,
            creator: row.creator,
            description: row.description,
            ingredients,
            directions,
        })
    }
}

/// Insertable struct for creating new recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub tags: serde_json::Value,
    pub rating: i32,
    pub creator: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub directions: serde_json::Value,
}

/// Changeset applying a full replacement of a recipe's mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub title: &'a str,
    pub tags: serde_json::Value,
    pub rating: i32,
    pub creator: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub directions: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn user_row_maps_role_strings() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "abc".to_owned(),
            email: "a@b.com".to_owned(),
            password_hash: "$2b$08$hash".to_owned(),
            role: "admin".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let user = User::from(row);
        assert_eq!(user.role(), Role::Admin);
    }

    #[rstest]
    fn recipe_row_decodes_jsonb_columns() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            title: "Flatbread".to_owned(),
            tags: json!(["bread"]),
            rating: 4,
            creator: "abc".to_owned(),
            description: String::new(),
            ingredients: json!([{ "amount": "2", "unit": "cup", "name": "flour" }]),
            directions: json!(["mix", "bake"]),
            created_at: Utc::now(),
        };

        let recipe = Recipe::try_from(row).expect("valid jsonb columns");
        assert_eq!(recipe.tags, vec!["bread"]);
        assert_eq!(recipe.ingredients[0].name, "flour");
        assert_eq!(recipe.directions.len(), 2);
    }

    #[rstest]
    fn recipe_row_rejects_malformed_jsonb() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            title: String::new(),
            tags: json!({ "not": "an array" }),
            rating: 0,
            creator: String::new(),
            description: String::new(),
            ingredients: json!([]),
            directions: json!([]),
            created_at: Utc::now(),
        };

        let err = Recipe::try_from(row).expect_err("object is not a tag list");
        assert!(err.to_string().contains("tags"));
    }
}
