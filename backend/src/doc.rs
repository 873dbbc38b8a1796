//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer, the shared
//! schemas, and the session cookie security scheme. Swagger UI serves the
//! document at `/docs` in debug builds; `cargo run --bin openapi-dump`
//! exports it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::domain::recipe::{Ingredient, Recipe, RecipeChanges, RecipeDraft};
use crate::domain::todo::{Todo, TodoChanges, TodoDraft};
use crate::domain::user::{Role, SessionUser};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::validation::UsernameProbe;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Larder backend API",
        description = "Session-authenticated todo and recipe storage."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::authenticate,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::delete_account,
        crate::inbound::http::auth::session_data,
        crate::inbound::http::validation::validate_username,
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::find_todo,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::find_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        SessionUser,
        LoginRequest,
        RegisterRequest,
        UsernameProbe,
        Todo,
        TodoDraft,
        TodoChanges,
        Recipe,
        RecipeDraft,
        RecipeChanges,
        Ingredient,
    )),
    tags(
        (name = "auth", description = "Registration, sessions, and account removal"),
        (name = "validation", description = "Signup form validation helpers"),
        (name = "todo", description = "Todo item storage"),
        (name = "recipe", description = "Recipe storage"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/authenticate",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/register",
            "/api/auth/delete/{uid}",
            "/api/auth/session",
            "/api/validate/username/{username}",
            "/api/todo",
            "/api/todo/{todo_id}",
            "/api/recipe",
            "/api/recipe/{recipe_id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn session_user_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("SessionUser"));
        assert!(schemas.contains_key("Error"));
    }
}
