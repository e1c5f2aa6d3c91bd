// Copyright (c) 2025 todo-rest contributors
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;

/// Creates and configures the application router.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Associates the `GET /todos` route with the `list_todos` handler
        .route("/todos", get(handlers::list_todos))
        // Associates the `POST /todos` route with the `upsert_todo` handler
        .route("/todos", post(handlers::upsert_todo))
        // Associates the `GET /todos/{id}` route with the `get_todo` handler
        .route("/todos/{id}", get(handlers::get_todo))
        // Associates the `DELETE /todos/{id}` route with the `delete_todo` handler
        .route("/todos/{id}", delete(handlers::delete_todo))
        // Associates the `PUT /todos/{id}/complete` route with the `complete_todo` handler
        .route("/todos/{id}/complete", put(handlers::complete_todo))
        // Adds the database pool to the application state
        .with_state(pool)
}
