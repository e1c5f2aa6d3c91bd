// Copyright (c) 2025 todo-rest contributors
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a to-do item as persisted in the database.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging.
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `ToDoEntity` instance
///   directly from a database result row.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ToDoEntity {
    pub id: i64,

    pub text: String,

    // Null in the database means "not completed". Once set, no operation
    // ever clears it.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Structure used to receive to-do data from the API.
/// It's a good practice to separate database models (`ToDoEntity`)
/// from API models (`ToDoSaveRequest`), as they may have different fields.
/// Here, `id` is optional: absent means "create a new item".
#[derive(Deserialize, Debug)]
pub struct ToDoSaveRequest {
    pub id: Option<i64>,
    pub text: String,
}

/// Read-only projection of a `ToDoEntity` returned by the API.
///
/// `completedAt` is renamed to camelCase on the wire and omitted entirely
/// when the item is not completed (no null placeholder).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToDoResponse {
    pub id: i64,
    pub text: String,
    #[serde(rename = "completedAt", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&ToDoEntity> for ToDoResponse {
    fn from(entity: &ToDoEntity) -> Self {
        Self {
            id: entity.id,
            text: entity.text.clone(),
            completed_at: entity.completed_at,
        }
    }
}
