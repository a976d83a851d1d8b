//! Event controller: turns user actions into requests and view updates.
//!
//! # Design
//! `TodoApp` owns the client, the host's `Transport`, the `TodoView` and the
//! `TodoStore`. Every public action issues at most one request. State and
//! view change only after the request succeeded; failures are logged and
//! alerted, and leave both untouched.
//!
//! The store sits in a `RefCell` because actions run as independent tasks on
//! one thread. No borrow is held across an `.await`. Rows are addressed by
//! their `RowKey`; the server id is looked up only to build the request.

use std::cell::{Ref, RefCell};

use futures_util::future;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::client::TodoClient;
use crate::error::{ApiError, Operation};
use crate::http::Transport;
use crate::store::{RowKey, TodoStore};
use crate::types::{Collection, NewTodo, Todo, User};
use crate::validate::validate_submission;
use crate::view::{RowEvent, SyncState, TodoView};

pub struct TodoApp<T, V> {
    client: TodoClient,
    transport: T,
    view: V,
    store: RefCell<TodoStore>,
}

impl<T: Transport, V: TodoView> TodoApp<T, V> {
    pub fn new(client: TodoClient, transport: T, view: V) -> Self {
        Self {
            client,
            transport,
            view,
            store: RefCell::new(TodoStore::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> Ref<'_, TodoStore> {
        self.store.borrow()
    }

    /// Load users and todos concurrently, then render both.
    ///
    /// A collection that fails to load has already been reported and is
    /// skipped; the other one still renders.
    pub async fn start(&self) {
        let (users, todos) = future::join(
            self.fetch_collection::<User>(Collection::Users),
            self.fetch_collection::<Todo>(Collection::Todos),
        )
        .await;

        if let Some(users) = users {
            for user in &users {
                self.view.add_user_option(user);
            }
            self.store.borrow_mut().set_users(users);
        }
        if let Some(todos) = todos {
            for todo in todos {
                let key = self.store.borrow_mut().add_todo(todo);
                self.render_todo_row(key);
            }
        }
        let store = self.store.borrow();
        info!(
            "loaded {} users and {} todos",
            store.users().len(),
            store.todos().len()
        );
    }

    /// GET one collection. `None` means the failure was already reported.
    pub async fn fetch_collection<R: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Option<Vec<R>> {
        let result = self.try_fetch_collection(collection).await;
        self.reported(Operation::LoadData, result)
    }

    /// Handle the new-todo form. Invalid input is alerted without a request.
    pub async fn submit(&self, title: &str, user: &str) {
        let input = match validate_submission(title, user) {
            Ok(input) => input,
            Err(err) => {
                debug!("rejected submission: {err}");
                self.view.alert(&err.to_string());
                return;
            }
        };
        if let Some(todo) = self.create_todo(&input).await {
            let key = self.store.borrow_mut().add_todo(todo);
            self.render_todo_row(key);
        }
    }

    /// POST a new todo. Returns the server's copy, id included.
    pub async fn create_todo(&self, input: &NewTodo) -> Option<Todo> {
        let result = self.try_create_todo(input).await;
        self.reported(Operation::CreateTodo, result)
    }

    /// Apply a checkbox change: show it as pending, PATCH it, then confirm
    /// or revert. Rows that are no longer loaded are ignored.
    pub async fn toggle_completion(&self, key: RowKey, completed: bool) {
        let Some(id) = self.server_id(key) else {
            debug!("ignoring toggle of unloaded row {key:?}");
            return;
        };
        self.view.show_completion(key, completed, SyncState::Pending);
        if self.update_todo_completion(id, completed).await {
            self.store.borrow_mut().set_completed(key, completed);
            self.view.show_completion(key, completed, SyncState::Confirmed);
        } else {
            self.view.show_completion(key, !completed, SyncState::Failed);
        }
    }

    /// PATCH `completed` on todo `id`. Returns whether the server accepted it.
    pub async fn update_todo_completion(&self, id: u32, completed: bool) -> bool {
        let result = self.try_update_completion(id, completed).await;
        self.reported(Operation::UpdateCompletion, result).is_some()
    }

    /// Delete the row's todo on the server, then drop that row locally.
    pub async fn delete(&self, key: RowKey) {
        let Some(id) = self.server_id(key) else {
            debug!("ignoring delete of unloaded row {key:?}");
            return;
        };
        if self.delete_todo(id).await {
            self.store.borrow_mut().remove_todo(key);
            self.view.remove_todo_row(key);
        }
    }

    /// DELETE todo `id`. Returns whether the server accepted it.
    pub async fn delete_todo(&self, id: u32) -> bool {
        let result = self.try_delete_todo(id).await;
        self.reported(Operation::DeleteTodo, result).is_some()
    }

    pub async fn handle(&self, event: RowEvent) {
        match event {
            RowEvent::Toggled { key, completed } => self.toggle_completion(key, completed).await,
            RowEvent::DeleteRequested { key } => self.delete(key).await,
        }
    }

    async fn try_fetch_collection<R: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_fetch_collection(collection);
        let response = self.transport.execute(request).await?;
        self.client.parse_collection(response)
    }

    async fn try_create_todo(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn try_update_completion(&self, id: u32, completed: bool) -> Result<(), ApiError> {
        let request = self.client.build_update_completion(id, completed)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_completion(response)
    }

    async fn try_delete_todo(&self, id: u32) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_todo(response)
    }

    fn render_todo_row(&self, key: RowKey) {
        let store = self.store.borrow();
        if let Some(todo) = store.todo(key) {
            self.view.render_todo_row(key, todo, store.user_name(todo.user_id));
        }
    }

    fn server_id(&self, key: RowKey) -> Option<u32> {
        self.store.borrow().todo(key).map(|todo| todo.id)
    }

    /// Log and alert a failed operation, passing successes through.
    fn reported<R>(&self, operation: Operation, result: Result<R, ApiError>) -> Option<R> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{operation:?} failed: {err}");
                self.view.alert(operation.failure_message());
                None
            }
        }
    }
}
