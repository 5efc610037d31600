//! Screen state and the reducer that turns user actions and backend events into
//! grid mutations and outgoing requests.

use std::time::{Duration, Instant};

use client_core::{
    GridController, GridError, GridRequest, Notification, NotificationBanner, PendingDelete,
};

use crate::controller::events::{UiAction, UiEvent};

pub struct ScreenState {
    pub grid: GridController,
    pub banner: NotificationBanner,
    pub pending_delete: Option<PendingDelete>,
}

impl ScreenState {
    pub fn new(notification_duration: Duration) -> Self {
        Self {
            grid: GridController::new(),
            banner: NotificationBanner::new(notification_duration),
            pending_delete: None,
        }
    }

    fn notify(&mut self, notification: Option<Notification>, now: Instant) {
        if let Some(notification) = notification {
            self.banner.show(notification, now);
        }
    }

    /// Applies a user action and returns the requests to send to the backend.
    /// While a delete confirmation is open only its answer and banner dismissal
    /// are accepted, so the confirmed target is the selection the prompt showed.
    pub fn reduce(&mut self, action: UiAction) -> Vec<GridRequest> {
        if self.pending_delete.is_some()
            && !matches!(
                action,
                UiAction::AnswerDelete(_) | UiAction::DismissNotification
            )
        {
            tracing::debug!(?action, "ignoring action while delete confirmation is open");
            return Vec::new();
        }

        let result = match action {
            UiAction::Reload => self.grid.load().map(|request| vec![request]),
            UiAction::AddRow => {
                self.grid.add_row();
                Ok(Vec::new())
            }
            UiAction::EditCell {
                index,
                field,
                value,
            } => self.grid.edit_field(index, field, value).map(|()| Vec::new()),
            UiAction::ToggleRow(id) => {
                self.grid.toggle_selection(id);
                Ok(Vec::new())
            }
            UiAction::ToggleSelectAll => {
                self.grid.toggle_select_all();
                Ok(Vec::new())
            }
            UiAction::Save => self.grid.save(),
            UiAction::Delete => self.grid.begin_delete().map(|pending| {
                self.pending_delete = pending;
                Vec::new()
            }),
            UiAction::AnswerDelete(confirmed) => Ok(self
                .pending_delete
                .take()
                .and_then(|pending| self.grid.resolve_delete(pending, confirmed))
                .into_iter()
                .collect()),
            UiAction::DismissNotification => {
                self.banner.dismiss();
                Ok(Vec::new())
            }
        };

        match result {
            Ok(requests) => requests,
            Err(err @ GridError::RowOutOfRange { .. }) => {
                tracing::warn!("ignoring edit: {err}");
                Vec::new()
            }
            Err(err) => {
                tracing::debug!("action rejected: {err}");
                Vec::new()
            }
        }
    }

    pub fn receive(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Grid(outcome) => {
                let notification = self.grid.apply(outcome);
                self.notify(notification, now);
            }
            UiEvent::BackendUnavailable(reason) => {
                tracing::error!("backend unavailable: {reason}");
                self.notify(Some(Notification::error(reason)), now);
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(dismissed) = self.banner.tick(now) {
            tracing::debug!(message = %dismissed.message, "notification expired");
        }
    }
}
