//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerConfigError, bind_addr_from_env, database_url_from_env};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use crate::domain::AccountService;
use crate::inbound::http::auth::{
    authenticate, delete_account, login, logout, register, session_data,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::recipes::{
    create_recipe, delete_recipe, find_recipe, list_recipes, update_recipe,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::todos::{
    create_todo, delete_todo, find_todo, list_todos, update_todo,
};
use crate::inbound::http::validation::validate_username;
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DieselRecipeRepository, DieselTodoRepository, DieselUserRepository, InMemoryRecipeRepository,
    InMemoryTodoRepository, InMemoryUserRepository,
};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the handler state from the configured storage backend.
///
/// Uses database-backed repositories when a pool is available; otherwise
/// falls back to in-memory stores, which do not survive a restart.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::new(
            AccountService::new(Arc::new(DieselUserRepository::new(pool.clone()))),
            Arc::new(DieselTodoRepository::new(pool.clone())),
            Arc::new(DieselRecipeRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database pool configured; using in-memory stores");
            HttpState::new(
                AccountService::new(Arc::new(InMemoryUserRepository::new())),
                Arc::new(InMemoryTodoRepository::new()),
                Arc::new(InMemoryRecipeRepository::new()),
            )
        }
    };
    web::Data::new(state)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(
            web::scope("/auth")
                .service(authenticate)
                .service(login)
                .service(logout)
                .service(register)
                .service(delete_account)
                .service(session_data),
        )
        .service(web::scope("/validate").service(validate_username))
        .service(
            web::scope("/todo")
                .service(list_todos)
                .service(create_todo)
                .service(find_todo)
                .service(update_todo)
                .service(delete_todo),
        )
        .service(
            web::scope("/recipe")
                .service(list_recipes)
                .service(create_recipe)
                .service(find_recipe)
                .service(update_recipe)
                .service(delete_recipe),
        );

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the resolved configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
