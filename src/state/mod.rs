//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds UI data and the contact list controller
//! - The bindable list and the row views mirroring it
//! - The contact editor and its field binding
//! - State error handling

pub mod bindable;
pub mod binding;
mod contact_list;
mod editor;
mod error;
pub mod rows;
mod state_impl;

pub use binding::Field;
pub use contact_list::ContactList;
pub use editor::{ContactEditor, EditorMode};
pub use error::StateError;
pub use rows::{RowKey, RowView};
pub use state_impl::State;
