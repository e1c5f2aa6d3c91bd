// Copyright (c) 2025 todo-rest contributors
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;

use common::{ToDoEntity, ToDoResponse, ToDoSaveRequest};
use sqlx::SqlitePool;
use tracing::debug;

/// Failures the business logic can produce.
///
/// `NoPermission` and `NotFound` are part of the API contract and carry
/// fixed messages; `Store` wraps anything the database layer reports.
#[derive(Debug)]
pub enum ToDoError {
    NoPermission,
    NotFound(i64),
    Store(anyhow::Error),
}

impl std::fmt::Display for ToDoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToDoError::NoPermission => write!(f, "Only admin can do this"),
            ToDoError::NotFound(id) => write!(f, "Can not find todo with id {id}"),
            ToDoError::Store(err) => write!(f, "Store failure: {err}"),
        }
    }
}

impl From<anyhow::Error> for ToDoError {
    fn from(err: anyhow::Error) -> Self {
        ToDoError::Store(err)
    }
}

/// Rejects non-admin callers before any store interaction happens.
fn check_admin(is_admin: bool) -> Result<(), ToDoError> {
    if is_admin {
        Ok(())
    } else {
        Err(ToDoError::NoPermission)
    }
}

/// Returns every to-do item, mapped to the response shape, in store order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<ToDoResponse>, ToDoError> {
    let todos = database::find_all_todos(pool).await?;
    Ok(todos.iter().map(ToDoResponse::from).collect())
}

/// Creates or updates a to-do item depending on whether the request
/// carries an id. Admin only.
///
/// The read-then-write of the update branch is not transactional; a
/// concurrent update to the same id can be lost.
pub async fn upsert(
    pool: &SqlitePool,
    request: ToDoSaveRequest,
    is_admin: bool,
) -> Result<ToDoResponse, ToDoError> {
    check_admin(is_admin)?;

    match request.id {
        None => {
            debug!("Creating new todo with text: {}", request.text);
            let created = database::insert_todo(pool, &request.text).await?;
            Ok(ToDoResponse::from(&created))
        }
        Some(id) => {
            let mut todo = database::find_todo_by_id(pool, id)
                .await?
                .ok_or(ToDoError::NotFound(id))?;
            // Only the text changes; completed_at keeps whatever it was.
            todo.text = request.text;
            database::update_todo(pool, &todo).await?;
            Ok(ToDoResponse::from(&todo))
        }
    }
}

/// Marks a to-do item as completed at the current time. Admin only.
///
/// An already-completed item gets its timestamp refreshed to "now"
/// rather than being rejected.
pub async fn complete_todo(
    pool: &SqlitePool,
    id: i64,
    is_admin: bool,
) -> Result<ToDoResponse, ToDoError> {
    check_admin(is_admin)?;

    let mut todo = database::find_todo_by_id(pool, id)
        .await?
        .ok_or(ToDoError::NotFound(id))?;
    todo.completed_at = Some(chrono::Utc::now());
    database::update_todo(pool, &todo).await?;
    Ok(ToDoResponse::from(&todo))
}

/// Returns a single to-do item by id. No permission gate, no side effects.
pub async fn get_one(pool: &SqlitePool, id: i64) -> Result<ToDoResponse, ToDoError> {
    let todo: ToDoEntity = database::find_todo_by_id(pool, id)
        .await?
        .ok_or(ToDoError::NotFound(id))?;
    Ok(ToDoResponse::from(&todo))
}

/// Deletes a to-do item by id. Admin only. Deleting an id that does not
/// exist is not an error.
pub async fn delete_one(pool: &SqlitePool, id: i64, is_admin: bool) -> Result<(), ToDoError> {
    check_admin(is_admin)?;
    database::delete_todo_by_id(pool, id).await?;
    Ok(())
}
