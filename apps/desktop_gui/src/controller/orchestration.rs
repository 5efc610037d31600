//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{ClientError, GridOutcome, GridRequest};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `request` for the backend worker. When the queue cannot take it, the
/// request is turned into a failed outcome so the grid releases its in-flight
/// guard and reports the failure like any other network error.
pub fn dispatch_grid_request(
    cmd_tx: &Sender<BackendCommand>,
    request: GridRequest,
) -> Option<GridOutcome> {
    let cmd_name = request.name();
    match cmd_tx.try_send(BackendCommand::Grid(request)) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            None
        }
        Err(TrySendError::Full(BackendCommand::Grid(request))) => Some(undelivered(
            request,
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(BackendCommand::Grid(request))) => Some(undelivered(
            request,
            "Backend command processor disconnected (possible startup/runtime failure)",
        )),
    }
}

pub fn undelivered(request: GridRequest, reason: &str) -> GridOutcome {
    tracing::warn!(command = request.name(), "{reason}");
    let error = ClientError::network(request.name(), reason);
    match request {
        GridRequest::Load => GridOutcome::Loaded(Err(error)),
        GridRequest::Create { rows, .. } => GridOutcome::Created {
            rows,
            result: Err(error),
        },
        GridRequest::Update { .. } => GridOutcome::Updated(Err(error)),
        GridRequest::Delete(target) => GridOutcome::Deleted {
            target,
            result: Err(error),
        },
    }
}
