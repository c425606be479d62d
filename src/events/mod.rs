//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: contact storage requests
//! - Notifications: live changes made by other sessions
//! - Terminal events: User input and terminal interactions

pub mod network;
pub mod notifications;
pub mod terminal;
