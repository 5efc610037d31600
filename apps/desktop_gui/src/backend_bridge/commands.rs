//! Backend commands queued from UI to backend worker.

use client_core::GridRequest;

pub enum BackendCommand {
    Grid(GridRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Grid(request) => request.name(),
        }
    }
}
