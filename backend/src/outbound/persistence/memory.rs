//! In-memory repository adapters.
//!
//! Mirror the persistence contracts — including username/email uniqueness —
//! without a database. Used by tests and as the fallback stores when no
//! database is configured.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    DocumentPersistenceError, RecipeRepository, TodoRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Recipe, RecipeChanges, RecipeDraft, Todo, TodoChanges, TodoDraft, User};

/// Users held in process memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given users.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        let collides = users.iter().any(|existing| {
            existing.username() == user.username() || existing.email() == user.email()
        });
        if collides {
            return Err(UserPersistenceError::Duplicate);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .find(|user| user.username() == username || user.email() == email)
            .cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find_by_username_or_email(identifier, identifier).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.username() == username).cloned())
    }

    async fn delete_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<(), UserPersistenceError> {
        let id = Uuid::parse_str(identifier).ok();
        let mut users = self.lock()?;
        users.retain(|user| {
            user.username() != identifier
                && user.email() != identifier
                && Some(user.id()) != id
        });
        Ok(())
    }
}

fn lock_documents<T>(
    store: &Mutex<HashMap<Uuid, T>>,
) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, T>>, DocumentPersistenceError> {
    store
        .lock()
        .map_err(|_| DocumentPersistenceError::query("document store lock poisoned"))
}

/// Todos held in process memory.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<HashMap<Uuid, Todo>>,
}

impl InMemoryTodoRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, DocumentPersistenceError> {
        let todos = lock_documents(&self.todos)?;
        Ok(todos.values().cloned().collect())
    }

    async fn create(&self, draft: TodoDraft) -> Result<Todo, DocumentPersistenceError> {
        let todo = Todo {
            id: Uuid::new_v4(),
            text: draft.text,
        };
        let mut todos = lock_documents(&self.todos)?;
        todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DocumentPersistenceError> {
        let todos = lock_documents(&self.todos)?;
        Ok(todos.get(&id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, DocumentPersistenceError> {
        let mut todos = lock_documents(&self.todos)?;
        let Some(todo) = todos.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = changes.text {
            todo.text = text;
        }
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError> {
        let mut todos = lock_documents(&self.todos)?;
        todos.remove(&id);
        Ok(())
    }
}

/// Recipes held in process memory.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<HashMap<Uuid, Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list(&self) -> Result<Vec<Recipe>, DocumentPersistenceError> {
        let recipes = lock_documents(&self.recipes)?;
        Ok(recipes.values().cloned().collect())
    }

    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, DocumentPersistenceError> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title: draft.title,
            tags: draft.tags,
            rating: draft.rating,
            creator: draft.creator,
            description: draft.description,
            ingredients: draft.ingredients,
            directions: draft.directions,
        };
        let mut recipes = lock_documents(&self.recipes)?;
        recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DocumentPersistenceError> {
        let recipes = lock_documents(&self.recipes)?;
        Ok(recipes.get(&id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DocumentPersistenceError> {
        let mut recipes = lock_documents(&self.recipes)?;
        let Some(recipe) = recipes.get_mut(&id) else {
            return Ok(None);
        };
        recipe.apply(changes);
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError> {
        let mut recipes = lock_documents(&self.recipes)?;
        recipes.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use rstest::rstest;

    fn user(username: &str, email: &str) -> User {
        User::new(Uuid::new_v4(), username, email, "$2b$08$digest", Role::Member)
    }

    #[tokio::test]
    async fn insert_enforces_username_and_email_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("abc", "a@b.com")).await.expect("first insert");

        let same_username = repo.insert(&user("abc", "other@b.com")).await;
        assert_eq!(same_username, Err(UserPersistenceError::Duplicate));

        let same_email = repo.insert(&user("other", "a@b.com")).await;
        assert_eq!(same_email, Err(UserPersistenceError::Duplicate));
    }

    #[tokio::test]
    async fn identifier_lookup_matches_username_or_email() {
        let repo = InMemoryUserRepository::with_users(vec![user("abc", "a@b.com")]);

        let by_username = repo.find_by_identifier("abc").await.expect("lookup");
        let by_email = repo.find_by_identifier("a@b.com").await.expect("lookup");
        assert!(by_username.is_some());
        assert!(by_email.is_some());
        assert!(repo.find_by_identifier("nope").await.expect("lookup").is_none());
    }

    #[rstest]
    #[case("abc")]
    #[case("a@b.com")]
    #[tokio::test]
    async fn delete_matches_username_email_or_id(#[case] identifier: &str) {
        let repo = InMemoryUserRepository::with_users(vec![user("abc", "a@b.com")]);
        repo.delete_by_identifier(identifier).await.expect("delete");
        assert!(repo.find_by_username("abc").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn delete_by_textual_id_removes_the_user() {
        let subject = user("abc", "a@b.com");
        let id = subject.id();
        let repo = InMemoryUserRepository::with_users(vec![subject]);

        repo.delete_by_identifier(&id.to_string())
            .await
            .expect("delete");
        assert!(repo.find_by_username("abc").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn delete_of_absent_user_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        repo.delete_by_identifier("ghost").await.expect("no-op delete");
    }

    #[tokio::test]
    async fn todo_update_replaces_text_only_when_supplied() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo
            .create(TodoDraft {
                text: "buy flour".to_owned(),
            })
            .await
            .expect("create");

        let unchanged = repo
            .update(todo.id, TodoChanges::default())
            .await
            .expect("update")
            .expect("present");
        assert_eq!(unchanged.text, "buy flour");

        let changed = repo
            .update(
                todo.id,
                TodoChanges {
                    text: Some("buy yeast".to_owned()),
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(changed.text, "buy yeast");
    }

    #[tokio::test]
    async fn recipe_round_trip_preserves_nested_fields() {
        let repo = InMemoryRecipeRepository::new();
        let created = repo
            .create(RecipeDraft {
                title: "Flatbread".to_owned(),
                ingredients: vec![crate::domain::Ingredient {
                    amount: "2".to_owned(),
                    unit: "cup".to_owned(),
                    name: "flour".to_owned(),
                }],
                ..RecipeDraft::default()
            })
            .await
            .expect("create");

        let fetched = repo
            .find_by_id(created.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched, created);
    }
}
