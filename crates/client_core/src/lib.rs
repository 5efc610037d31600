pub mod api;
pub mod error;
pub mod executor;
pub mod grid;
pub mod notification;
pub mod settings;

pub use api::{normalize_base_url, EmployeeApi, HttpEmployeeClient, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ClientError, GridError};
pub use executor::{execute, execute_all};
pub use grid::{
    messages, ConfirmDelete, DeleteTarget, GridController, GridOutcome, GridRequest, GridRow,
    PendingDelete, RowKey, DELETE_CONFIRMATION_PROMPT,
};
pub use notification::{Notification, NotificationBanner, NotificationKind, NOTIFICATION_DURATION};
pub use settings::{load_settings, Settings, SettingsError};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
