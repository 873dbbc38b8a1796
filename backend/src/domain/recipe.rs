//! Recipe data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    /// Quantity, kept as entered (`"2"`, `"1/2"`).
    pub amount: String,
    /// Measurement unit (`"cup"`, `"g"`).
    pub unit: String,
    /// Ingredient name.
    pub name: String,
}

/// A recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Recipe title.
    #[schema(example = "Flatbread")]
    pub title: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// User rating.
    pub rating: i32,
    /// Creator of the recipe.
    pub creator: String,
    /// Brief description.
    pub description: String,
    /// Ingredient lines.
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps, in order.
    pub directions: Vec<String>,
}

/// Payload for creating a recipe. Unsupplied fields default to empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeDraft {
    /// Recipe title.
    #[serde(default)]
    pub title: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// User rating.
    #[serde(default)]
    pub rating: i32,
    /// Creator of the recipe.
    #[serde(default)]
    pub creator: String,
    /// Brief description.
    #[serde(default)]
    pub description: String,
    /// Ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps, in order.
    #[serde(default)]
    pub directions: Vec<String>,
}

/// Partial update for a recipe. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeChanges {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement tags, when supplied.
    pub tags: Option<Vec<String>>,
    /// Replacement rating, when supplied.
    pub rating: Option<i32>,
    /// Replacement creator, when supplied.
    pub creator: Option<String>,
    /// Replacement description, when supplied.
    pub description: Option<String>,
    /// Replacement ingredient lines, when supplied.
    pub ingredients: Option<Vec<Ingredient>>,
    /// Replacement directions, when supplied.
    pub directions: Option<Vec<String>>,
}

impl Recipe {
    /// Apply a partial update, replacing only the supplied fields.
    pub fn apply(&mut self, changes: RecipeChanges) {
        let RecipeChanges {
            title,
            tags,
            rating,
            creator,
            description,
            ingredients,
            directions,
        } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(creator) = creator {
            self.creator = creator;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(directions) = directions {
            self.directions = directions;
        }
    }
}
