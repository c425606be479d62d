//! Reusable UI widget components.
//!
//! This module contains styling utilities shared by the views.

pub mod styling;
