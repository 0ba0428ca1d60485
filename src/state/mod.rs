//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Form types (FieldId, FormData, ChangeEvent, etc.) and the reducer
//! - Navigation types (View, Overlay)
//! - State error handling

mod error;
mod form;
mod navigation;
mod state_impl;

pub use error::StateError;
pub use form::{
    ChangeEvent, FieldId, FileHandle, FileTypeChoice, FormData, Gender, COURSE_OPTIONS, TIME_ZONES,
};
pub use navigation::{Overlay, View};
pub use state_impl::State;
