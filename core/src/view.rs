//! The rendering seam between the controller and whatever draws the list.

use crate::store::RowKey;
use crate::types::{Todo, User};

/// Sync status of a completion toggle as shown on its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Request in flight. The control shows the requested value and is locked.
    Pending,
    /// The server accepted the change.
    Confirmed,
    /// The server rejected the change; the control shows the old value again.
    Failed,
}

/// A user interaction on a rendered todo row, named by the row's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Toggled { key: RowKey, completed: bool },
    DeleteRequested { key: RowKey },
}

/// Renders application state and is the single sink for user-facing errors.
///
/// Implementations must not call back into the controller synchronously;
/// row interactions are reported as [`RowEvent`]s through the host.
pub trait TodoView {
    /// Append a selectable option for `user`.
    fn add_user_option(&self, user: &User);

    /// Insert a row for `todo` at the top of the list. `key` is new for every
    /// call, so a repeated server id gets a row of its own. `user_name` is
    /// `None` when the todo's user is unknown.
    fn render_todo_row(&self, key: RowKey, todo: &Todo, user_name: Option<&str>);

    /// Detach the row's handlers and remove it. Unknown keys are ignored.
    fn remove_todo_row(&self, key: RowKey);

    /// Reflect a completion toggle on the row's checkbox.
    fn show_completion(&self, key: RowKey, completed: bool, state: SyncState);

    /// Blocking, user-facing error message.
    fn alert(&self, message: &str);
}
