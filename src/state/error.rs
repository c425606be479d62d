//! State management-specific error types.

use super::rows::RowKey;

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No row view with this key
    #[error("Row not found: {0:?}")]
    RowNotFound(RowKey),

    /// Row view is not attached to the display table
    #[error("Row not attached to table: {0:?}")]
    RowNotAttached(RowKey),

    /// Operation needs the editor to be editing a copy
    #[error("Editor is not editing an existing contact")]
    NotCopied,

    /// Birthday text could not be parsed
    #[error("Invalid birthday '{0}', expected YYYY-MM-DD")]
    InvalidBirthday(String),

    /// Network event could not be dispatched
    #[error("Failed to dispatch network event: {0}")]
    Dispatch(String),
}
