//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::AccountService;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryRecipeRepository, InMemoryTodoRepository, InMemoryUserRepository,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over empty in-memory stores.
pub fn test_state() -> web::Data<HttpState> {
    test_state_with_users(InMemoryUserRepository::new())
}

/// Build handler state over a pre-seeded user store.
pub fn test_state_with_users(users: InMemoryUserRepository) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        AccountService::new(Arc::new(users)),
        Arc::new(InMemoryTodoRepository::new()),
        Arc::new(InMemoryRecipeRepository::new()),
    ))
}
