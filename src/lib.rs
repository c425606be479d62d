//! Terminal client for a remote contact storage service.
//!
//! Contacts are listed in a table whose rows mirror the managed list, edited
//! through a form bound to a detached copy, and kept current with changes
//! made by other sessions.

pub mod app;
pub mod config;
pub mod contacts;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod ui;
