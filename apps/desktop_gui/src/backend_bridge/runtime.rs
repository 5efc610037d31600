//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{execute, EmployeeApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the backend worker thread. Each command runs as its own task so the
/// create and update halves of a save complete independently. Outcomes that
/// arrive after the UI is gone are dropped with the closed channel.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn EmployeeApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: received command");
                let BackendCommand::Grid(request) = cmd;
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = execute(api.as_ref(), request).await;
                    deliver(ui_tx, UiEvent::Grid(outcome)).await;
                });
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    })
}

/// Hands `event` to the UI. A full queue waits on a blocking thread until the UI
/// drains it, since every outcome releases an in-flight guard.
async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!("ui event queue full; waiting for the ui to catch up");
            let sent = tokio::task::spawn_blocking(move || ui_tx.send(event)).await;
            if !matches!(sent, Ok(Ok(()))) {
                tracing::debug!("ui went away while waiting; dropping grid outcome");
            }
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed; dropping grid outcome");
        }
    }
}
