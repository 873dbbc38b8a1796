//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AccountService;
use crate::domain::ports::{RecipeRepository, TodoRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account use-cases over the user store.
    pub accounts: AccountService,
    /// Todo collection port.
    pub todos: Arc<dyn TodoRepository>,
    /// Recipe collection port.
    pub recipes: Arc<dyn RecipeRepository>,
}

impl HttpState {
    /// Bundle the handler dependencies.
    pub fn new(
        accounts: AccountService,
        todos: Arc<dyn TodoRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            accounts,
            todos,
            recipes,
        }
    }
}
