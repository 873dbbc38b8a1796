//! Recipe API handlers.
//!
//! Same pass-through CRUD shape as the todo routes; updates replace only the
//! fields supplied in the body.

use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::domain::ports::DocumentPersistenceError;
use crate::domain::{Error, Recipe, RecipeChanges, RecipeDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_document_error(error: DocumentPersistenceError) -> Error {
    match error {
        DocumentPersistenceError::Connection { message } => Error::service_unavailable(message),
        DocumentPersistenceError::Query { message } => Error::internal(message),
    }
}

/// List every recipe.
#[utoipa::path(
    get,
    path = "/api/recipe",
    responses(
        (status = 200, description = "All recipes", body = [Recipe]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipe"],
    operation_id = "listRecipes",
    security([])
)]
#[get("")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Recipe>>> {
    let recipes = state.recipes.list().await.map_err(map_document_error)?;
    Ok(web::Json(recipes))
}

/// Create a recipe.
#[utoipa::path(
    post,
    path = "/api/recipe",
    request_body = RecipeDraft,
    responses(
        (status = 200, description = "Created recipe", body = Recipe),
        (status = 400, description = "Malformed body", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipe"],
    operation_id = "createRecipe",
    security([])
)]
#[post("")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeDraft>,
) -> ApiResult<web::Json<Recipe>> {
    let recipe = state
        .recipes
        .create(payload.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(recipe))
}

/// Fetch a recipe by id, or `null` when absent.
#[utoipa::path(
    get,
    path = "/api/recipe/{recipe_id}",
    params(("recipe_id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe, or null when absent", body = Recipe),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipe"],
    operation_id = "findRecipe",
    security([])
)]
#[get("/{recipe_id}")]
pub async fn find_recipe(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Option<Recipe>>> {
    let recipe = state
        .recipes
        .find_by_id(path.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(recipe))
}

/// Update the supplied fields of a recipe.
#[utoipa::path(
    put,
    path = "/api/recipe/{recipe_id}",
    params(("recipe_id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeChanges,
    responses(
        (status = 200, description = "Updated recipe, or null when absent", body = Recipe),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipe"],
    operation_id = "updateRecipe",
    security([])
)]
#[put("/{recipe_id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<RecipeChanges>,
) -> ApiResult<web::Json<Option<Recipe>>> {
    let recipe = state
        .recipes
        .update(path.into_inner(), payload.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(recipe))
}

/// Delete a recipe. Responds `204` whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/recipe/{recipe_id}",
    params(("recipe_id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe removed (or was already absent)"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipe"],
    operation_id = "deleteRecipe",
    security([])
)]
#[delete("/{recipe_id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .recipes
        .delete(path.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(HttpResponse::NoContent().finish())
}
