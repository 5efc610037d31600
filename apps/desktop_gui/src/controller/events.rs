//! Backend-to-UI events and the user actions the screen reduces.

use client_core::GridOutcome;
use shared::domain::{EmployeeField, EmployeeId};

pub enum UiEvent {
    Grid(GridOutcome),
    BackendUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Reload,
    AddRow,
    EditCell {
        index: usize,
        field: EmployeeField,
        value: String,
    },
    ToggleRow(EmployeeId),
    ToggleSelectAll,
    Save,
    Delete,
    AnswerDelete(bool),
    DismissNotification,
}
