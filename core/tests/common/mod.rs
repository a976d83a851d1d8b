//! Test doubles shared by the controller and end-to-end tests.
#![allow(dead_code)]

use std::cell::RefCell;

use async_trait::async_trait;
use todo_client_core::{
    ApiError, HttpRequest, HttpResponse, RowKey, SyncState, Todo, TodoView, Transport, User,
};

/// A rendered row as the recording view sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: RowKey,
    pub id: u32,
    pub user_name: Option<String>,
    pub title: String,
    pub checked: bool,
}

/// `TodoView` that keeps everything it was asked to draw. `rows[0]` is the
/// top of the list. Like the DOM view, every render adds a row.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub options: RefCell<Vec<User>>,
    pub rows: RefCell<Vec<Row>>,
    pub completions: RefCell<Vec<(RowKey, bool, SyncState)>>,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingView {
    /// Topmost row showing server id `id`.
    pub fn row(&self, id: u32) -> Option<Row> {
        self.rows.borrow().iter().find(|row| row.id == id).cloned()
    }

    pub fn row_by_key(&self, key: RowKey) -> Option<Row> {
        self.rows.borrow().iter().find(|row| row.key == key).cloned()
    }

    pub fn row_ids(&self) -> Vec<u32> {
        self.rows.borrow().iter().map(|row| row.id).collect()
    }
}

impl TodoView for RecordingView {
    fn add_user_option(&self, user: &User) {
        self.options.borrow_mut().push(user.clone());
    }

    fn render_todo_row(&self, key: RowKey, todo: &Todo, user_name: Option<&str>) {
        self.rows.borrow_mut().insert(
            0,
            Row {
                key,
                id: todo.id,
                user_name: user_name.map(str::to_string),
                title: todo.title.clone(),
                checked: todo.completed,
            },
        );
    }

    fn remove_todo_row(&self, key: RowKey) {
        self.rows.borrow_mut().retain(|row| row.key != key);
    }

    fn show_completion(&self, key: RowKey, completed: bool, state: SyncState) {
        self.completions.borrow_mut().push((key, completed, state));
        if let Some(row) = self.rows.borrow_mut().iter_mut().find(|row| row.key == key) {
            row.checked = completed;
        }
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError>>;

/// `Transport` that answers from a closure and logs every request.
pub struct FakeTransport {
    handler: Handler,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = (self.handler)(&request);
        self.requests.borrow_mut().push(request);
        response
    }
}

pub fn respond(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}
