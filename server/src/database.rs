// Copyright (c) 2025 todo-rest contributors
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use common::ToDoEntity;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::{debug, info};

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `todos` table has the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            completed_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create 'todos' table")?;

    info!("'todos' table is ready.");

    Ok(pool)
}

/// Retrieves all to-do items, in whatever order the store returns them.
pub async fn find_all_todos(pool: &SqlitePool) -> Result<Vec<ToDoEntity>> {
    let todos = sqlx::query_as::<_, ToDoEntity>("SELECT * FROM todos;")
        .fetch_all(pool)
        .await
        .context("Failed to retrieve todos from DB")?;

    Ok(todos)
}

/// Looks up a single to-do item by its identifier.
pub async fn find_todo_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ToDoEntity>> {
    let todo = sqlx::query_as::<_, ToDoEntity>("SELECT * FROM todos WHERE id = ?;")
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to look up todo with id {id}"))?;

    Ok(todo)
}

/// Inserts a new to-do item and returns it with its store-assigned id.
/// New items are never completed.
pub async fn insert_todo(pool: &SqlitePool, text: &str) -> Result<ToDoEntity> {
    debug!("Insert values: text={}", text);

    let id = sqlx::query("INSERT INTO todos (text, completed_at) VALUES (?, NULL)")
        .bind(text)
        .execute(pool)
        .await
        .context("Failed to insert todo into DB")?
        .last_insert_rowid();

    Ok(ToDoEntity {
        id,
        text: text.to_string(),
        completed_at: None,
    })
}

/// Persists an already-stored to-do item, overwriting its mutable columns.
pub async fn update_todo(pool: &SqlitePool, todo: &ToDoEntity) -> Result<()> {
    debug!(
        "Update values: id={}, text={}, completed_at={:?}",
        todo.id, todo.text, todo.completed_at
    );

    sqlx::query("UPDATE todos SET text = ?, completed_at = ? WHERE id = ?")
        .bind(&todo.text)
        .bind(todo.completed_at)
        .bind(todo.id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update todo with id {}", todo.id))?;

    Ok(())
}

/// Deletes a to-do item by id. Deleting an id that does not exist is not an
/// error; the operation is idempotent.
pub async fn delete_todo_by_id(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete todo with id {id}"))?;

    info!("Deleted {} rows for todo id {}", result.rows_affected(), id);

    Ok(())
}

/// Deletes every to-do item in the store.
pub async fn delete_all_todos(pool: &SqlitePool) -> Result<()> {
    let result = sqlx::query("DELETE FROM todos")
        .execute(pool)
        .await
        .context("Failed to delete all todos")?;

    info!("Deleted all {} todos", result.rows_affected());

    Ok(())
}
