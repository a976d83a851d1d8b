//! Form input validation, run before any request is built.

use thiserror::Error;

use crate::types::NewTodo;

/// Why a submission was rejected. The display text is the alert message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Fill the todo input!")]
    MissingTitle,
    #[error("Select the user!")]
    MissingUser,
}

/// Turn raw form values into a create payload.
///
/// The title must be non-empty. The user value must parse as a non-zero
/// number; the placeholder option, garbage and `0` all count as no
/// selection. The title is checked first.
pub fn validate_submission(title: &str, user: &str) -> Result<NewTodo, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    let user_id = user
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or(ValidationError::MissingUser)?;
    Ok(NewTodo::new(user_id, title))
}
