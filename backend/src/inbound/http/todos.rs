//! Todo API handlers.
//!
//! Pass-through CRUD: each handler performs one repository operation and
//! forwards the result. Absent items read back as a JSON `null` rather than
//! a 404, which the front end relies on.

use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::domain::ports::DocumentPersistenceError;
use crate::domain::{Error, Todo, TodoChanges, TodoDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_document_error(error: DocumentPersistenceError) -> Error {
    match error {
        DocumentPersistenceError::Connection { message } => Error::service_unavailable(message),
        DocumentPersistenceError::Query { message } => Error::internal(message),
    }
}

/// List every todo.
#[utoipa::path(
    get,
    path = "/api/todo",
    responses(
        (status = 200, description = "All todos", body = [Todo]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todo"],
    operation_id = "listTodos",
    security([])
)]
#[get("")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Todo>>> {
    let todos = state.todos.list().await.map_err(map_document_error)?;
    Ok(web::Json(todos))
}

/// Create a todo.
#[utoipa::path(
    post,
    path = "/api/todo",
    request_body = TodoDraft,
    responses(
        (status = 200, description = "Created todo", body = Todo),
        (status = 400, description = "Malformed body", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todo"],
    operation_id = "createTodo",
    security([])
)]
#[post("")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: web::Json<TodoDraft>,
) -> ApiResult<web::Json<Todo>> {
    let todo = state
        .todos
        .create(payload.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(todo))
}

/// Fetch a todo by id, or `null` when absent.
#[utoipa::path(
    get,
    path = "/api/todo/{todo_id}",
    params(("todo_id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo, or null when absent", body = Todo),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todo"],
    operation_id = "findTodo",
    security([])
)]
#[get("/{todo_id}")]
pub async fn find_todo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Option<Todo>>> {
    let todo = state
        .todos
        .find_by_id(path.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(todo))
}

/// Update a todo's text when a new value is supplied.
#[utoipa::path(
    put,
    path = "/api/todo/{todo_id}",
    params(("todo_id" = String, Path, description = "Todo identifier")),
    request_body = TodoChanges,
    responses(
        (status = 200, description = "Updated todo, or null when absent", body = Todo),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todo"],
    operation_id = "updateTodo",
    security([])
)]
#[put("/{todo_id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<TodoChanges>,
) -> ApiResult<web::Json<Option<Todo>>> {
    let todo = state
        .todos
        .update(path.into_inner(), payload.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(web::Json(todo))
}

/// Delete a todo. Responds `204` whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/todo/{todo_id}",
    params(("todo_id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo removed (or was already absent)"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todo"],
    operation_id = "deleteTodo",
    security([])
)]
#[delete("/{todo_id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .todos
        .delete(path.into_inner())
        .await
        .map_err(map_document_error)?;
    Ok(HttpResponse::NoContent().finish())
}
