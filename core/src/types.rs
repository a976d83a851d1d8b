//! Domain DTOs for the task service.
//!
//! # Design
//! These types mirror the service's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. Wire names are camelCase (`userId`); Rust fields are snake_case.

use serde::{Deserialize, Serialize};

/// A named collection exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Todos,
}

impl Collection {
    /// Path segment of the collection, e.g. `todos`.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Todos => "todos",
        }
    }
}

/// A user a todo can be assigned to. Read-only from the client's side; any
/// extra fields the service sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
}

/// A single todo item returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u32,
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a todo. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

impl NewTodo {
    /// A not-yet-completed todo for `user_id`.
    pub fn new(user_id: u32, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial update payload that only touches `completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionPatch {
    pub completed: bool,
}
