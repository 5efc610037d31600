//! Bridge from the UI thread to the backend worker that performs HTTP calls.

pub mod commands;
pub mod runtime;
