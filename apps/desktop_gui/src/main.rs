mod backend_bridge;
mod controller;
mod ui;

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, settings::finalize, EmployeeApi, HttpEmployeeClient, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{panels::APP_TITLE, EmployeeAdminApp};

#[derive(Parser, Debug)]
#[command(name = "employee-admin", about = "Employee administration grid")]
struct Args {
    /// Base URL of the employee REST API, e.g. http://localhost:8080
    #[arg(long)]
    api_base_url: Option<String>,
    /// Settings file; defaults to ./employee_admin.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(url) = &args.api_base_url {
        settings.api_base_url = url.clone();
    }
    finalize(settings).context("invalid settings")
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    let client =
        HttpEmployeeClient::with_timeout(&settings.api_base_url, settings.request_timeout())
            .context("failed to build http client")?;
    tracing::info!(api_base_url = client.base_url(), "starting employee admin");
    let api: Arc<dyn EmployeeApi> = Arc::new(client);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, api);

    let notification_duration = settings.notification_duration();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1024.0, 680.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(EmployeeAdminApp::new(
                cmd_tx,
                ui_rx,
                notification_duration,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop ui exited with error: {err}"))
}
