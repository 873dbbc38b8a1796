//! Diesel-backed `TodoRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DocumentPersistenceError, TodoRepository};
use crate::domain::{Todo, TodoChanges, TodoDraft};

use super::error_map::{map_document_pool_error, map_document_query_error};
use super::models::{NewTodoRow, TodoRow};
use super::pool::DbPool;
use super::schema::todos;

/// PostgreSQL-backed todo repository.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let rows = todos::table
            .select(TodoRow::as_select())
            .load::<TodoRow>(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn create(&self, draft: TodoDraft) -> Result<Todo, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let row = diesel::insert_into(todos::table)
            .values(NewTodoRow {
                id: Uuid::new_v4(),
                text: draft.text.as_str(),
            })
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Ok(Todo::from(row))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let row = todos::table
            .find(id)
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_document_query_error)?;
        Ok(row.map(Todo::from))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, DocumentPersistenceError> {
        let Some(text) = changes.text else {
            // Nothing supplied; report the stored item unchanged.
            return self.find_by_id(id).await;
        };

        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        let row = diesel::update(todos::table.find(id))
            .set(todos::text.eq(text.as_str()))
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_document_query_error)?;
        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_document_pool_error)?;
        diesel::delete(todos::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_document_query_error)?;
        Ok(())
    }
}
