//! Client core for the todo list.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the list UI
//! through the `TodoView` trait. The host supplies a `Transport` that runs
//! the HTTP round-trip and a `TodoView` that draws; everything in between is
//! deterministic and testable natively.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only the base URL and item limit.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `TodoApp` pairs every user action with one request, and only touches
//!   `TodoStore` and the view once the request succeeded.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod store;
pub mod types;
pub mod validate;
pub mod view;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use controller::TodoApp;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use store::{RowKey, TodoStore};
pub use types::{Collection, CompletionPatch, NewTodo, Todo, User};
pub use validate::{validate_submission, ValidationError};
pub use view::{RowEvent, SyncState, TodoView};
