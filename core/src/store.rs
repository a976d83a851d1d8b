//! In-memory application state.
//!
//! `TodoStore` is the one owner of the loaded users and todos. The controller
//! mutates it only after the matching request succeeded, so the store and the
//! rendered list change together.
//!
//! Every loaded todo gets a [`RowKey`] that is never reused. Server ids are
//! not enough to tell rows apart: a service may hand out the same id twice.

use crate::types::{Todo, User};

/// Client-side handle of one loaded todo and its rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u64);

#[derive(Debug, Default)]
pub struct TodoStore {
    users: Vec<User>,
    entries: Vec<(RowKey, Todo)>,
    next_key: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Loaded todos in insertion order.
    pub fn todos(&self) -> impl ExactSizeIterator<Item = &Todo> + '_ {
        self.entries.iter().map(|(_, todo)| todo)
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Name of the user with `user_id`, if that user was loaded.
    pub fn user_name(&self, user_id: u32) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.name.as_str())
    }

    pub fn todo(&self, key: RowKey) -> Option<&Todo> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, todo)| todo)
    }

    /// Key of the first loaded todo with server id `id`.
    pub fn key_of(&self, id: u32) -> Option<RowKey> {
        self.entries
            .iter()
            .find(|(_, todo)| todo.id == id)
            .map(|(key, _)| *key)
    }

    /// Appends `todo` under a new key, even when its id is already loaded.
    pub fn add_todo(&mut self, todo: Todo) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        self.entries.push((key, todo));
        key
    }

    /// Returns false when `key` is not loaded.
    pub fn set_completed(&mut self, key: RowKey, completed: bool) -> bool {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, todo)) => {
                todo.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn remove_todo(&mut self, key: RowKey) -> Option<Todo> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }
}
