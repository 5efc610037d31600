use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiAction, UiEvent};
use crate::controller::orchestration::dispatch_grid_request;
use crate::controller::reducer::ScreenState;
use crate::ui::panels::{show_employee_grid, show_header, show_toolbar};
use crate::ui::widgets::{confirm_delete_dialog, notification_banner};

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct EmployeeAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    screen: ScreenState,
}

impl EmployeeAdminApp {
    /// Builds the app and requests the initial employee list.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        notification_duration: Duration,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            screen: ScreenState::new(notification_duration),
        };
        app.dispatch(UiAction::Reload);
        app
    }

    fn dispatch(&mut self, action: UiAction) {
        for request in self.screen.reduce(action) {
            if let Some(outcome) = dispatch_grid_request(&self.cmd_tx, request) {
                self.screen.receive(UiEvent::Grid(outcome), Instant::now());
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.screen.receive(event, Instant::now());
        }
    }
}

impl eframe::App for EmployeeAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let now = Instant::now();
        self.screen.tick(now);

        let mut actions = Vec::new();
        show_header(ctx);
        let confirming = self.screen.pending_delete.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(notification_banner(ui, &self.screen.banner));
            ui.add_space(8.0);
            ui.add_enabled_ui(!confirming, |ui| {
                show_toolbar(ui, &self.screen.grid, &mut actions);
                ui.add_space(8.0);
                show_employee_grid(ui, &self.screen.grid, &mut actions);
            });
        });
        if let Some(pending) = &self.screen.pending_delete {
            actions.extend(confirm_delete_dialog(ctx, pending));
        }

        for action in actions {
            self.dispatch(action);
        }

        let repaint_after = self
            .screen
            .banner
            .remaining(now)
            .map_or(IDLE_REPAINT_INTERVAL, |remaining| {
                remaining.min(IDLE_REPAINT_INTERVAL)
            });
        ctx.request_repaint_after(repaint_after);
    }
}
