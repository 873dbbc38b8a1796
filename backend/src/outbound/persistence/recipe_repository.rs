//! Diesel-backed `RecipeRepository` adapter.
//!
//! Tags, ingredients, and directions are stored as `jsonb`; encoding happens
//! here so the domain never sees the storage representation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DocumentPersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeChanges, RecipeDraft};

use super::error_map::{map_document_pool_error, map_document_query_error};
use super::models::{NewRecipeRow, RecipeRow, RecipeUpdate};
use super::pool::DbPool;
use super::schema::recipes;

fn encode_column<T: serde::Serialize>(
    column: &str,
    value: &T,
) -> Result<serde_json::Value, DocumentPersistenceError> {
    serde_json::to_value(value).map_err(|err| {
        DocumentPersistenceError::query(format!("failed to encode {column} column: {err}"))
    })
}

/// PostgreSQL-backed recipe repository.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let rows = recipes::table
            .select(RecipeRow::as_select())
            .load::<RecipeRow>(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        rows.into_iter().map(Recipe::try_from).collect()
    }

    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let row = diesel::insert_into(recipes::table)
            .values(NewRecipeRow {
                id: Uuid::new_v4(),
                title: draft.title.as_str(),
                tags: encode_column("tags", &draft.tags)?,
                rating: draft.rating,
                creator: draft.creator.as_str(),
                description: draft.description.as_str(),
                ingredients: encode_column("ingredients", &draft.ingredients)?,
                directions: encode_column("directions", &draft.directions)?,
            })
            .returning(RecipeRow::as_returning())
            .get_result::<RecipeRow>(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Recipe::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let row = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_document_query_error)?;
        row.map(Recipe::try_from).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DocumentPersistenceError> {
        // Read-modify-write: absent fields keep their stored value.
        let Some(mut recipe) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        recipe.apply(changes);

        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        diesel::update(recipes::table.find(id))
            .set(RecipeUpdate {
                title: recipe.title.as_str(),
                tags: encode_column("tags", &recipe.tags)?,
                rating: recipe.rating,
                creator: recipe.creator.as_str(),
                description: recipe.description.as_str(),
                ingredients: encode_column("ingredients", &recipe.ingredients)?,
                directions: encode_column("directions", &recipe.directions)?,
            })
            .execute(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Ok(Some(recipe))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        diesel::delete(recipes::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Ok(())
    }
}
