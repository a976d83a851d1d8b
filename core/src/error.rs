//! Error types for the todo API client.
//!
//! # Design
//! `ApiError` says what went wrong on the wire. `Operation` says which
//! user action was running, and owns the message shown to the user; the raw
//! `ApiError` only goes to the log.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `Transport` hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// No response was obtained (network unreachable, request aborted).
    #[error("transport failed: {0}")]
    TransportError(String),
}

/// The user-facing operation an `ApiError` interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadData,
    CreateTodo,
    UpdateCompletion,
    DeleteTodo,
}

impl Operation {
    /// Message shown in the blocking alert when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::LoadData => {
                "An error occurred while getting the data! Server error, please try later"
            }
            Operation::CreateTodo => {
                "An error occurred while posting the new todo! Server error, please try later"
            }
            Operation::UpdateCompletion => {
                "An error occurred while changing the todo! Server error, please try later"
            }
            Operation::DeleteTodo => {
                "An error occurred while deleting the todo! Server error, please try later"
            }
        }
    }
}
