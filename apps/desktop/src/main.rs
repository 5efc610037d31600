use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    execute_all, load_settings, settings::finalize, EmployeeApi, GridController, GridRequest,
    HttpEmployeeClient, Notification, NotificationKind,
};
use shared::domain::{EmployeeField, EmployeeId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "employee-cli", about = "Scriptable access to the employee API")]
struct Args {
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every employee as JSON.
    List,
    /// Create one employee.
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        position: String,
        #[arg(long, default_value = "")]
        salary: String,
    },
    /// Change fields of an existing employee. Omitted fields keep their value.
    ///
    /// Saves like the grid does: every employee fetched for the update is sent
    /// back, so edits another client made to other employees in between are
    /// overwritten.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete one or more employees.
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Sends `requests`, folds the outcomes back into `grid`, and fails on the
/// first error notification.
async fn run(
    api: &dyn EmployeeApi,
    grid: &mut GridController,
    requests: Vec<GridRequest>,
) -> Result<()> {
    let mut notifications: Vec<Notification> = Vec::new();
    for outcome in execute_all(api, requests).await {
        notifications.extend(grid.apply(outcome));
    }
    for notification in &notifications {
        match notification.kind {
            NotificationKind::Success => eprintln!("{}", notification.message),
            NotificationKind::Error => bail!("{}", notification.message),
        }
    }
    Ok(())
}

async fn load(api: &dyn EmployeeApi) -> Result<GridController> {
    let mut grid = GridController::new();
    let request = grid.load()?;
    run(api, &mut grid, vec![request]).await?;
    Ok(grid)
}

fn print_records(grid: &GridController) -> Result<()> {
    let records: Vec<_> = grid.records().collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn edits_for(
    name: Option<String>,
    position: Option<String>,
    salary: Option<String>,
) -> Vec<(EmployeeField, String)> {
    [
        (EmployeeField::Name, name),
        (EmployeeField::Position, position),
        (EmployeeField::Salary, salary),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|value| (field, value)))
    .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    let settings = finalize(settings).context("invalid settings")?;
    let client =
        HttpEmployeeClient::with_timeout(&settings.api_base_url, settings.request_timeout())?;
    tracing::debug!(api_base_url = client.base_url(), "using employee api");
    let api: &dyn EmployeeApi = &client;

    match args.command {
        Command::List => {
            let grid = load(api).await?;
            print_records(&grid)?;
        }
        Command::Add {
            name,
            position,
            salary,
        } => {
            let mut grid = GridController::new();
            grid.add_row();
            for (field, value) in edits_for(Some(name), Some(position), Some(salary)) {
                grid.edit_field(0, field, value)?;
            }
            let requests = grid.save()?;
            run(api, &mut grid, requests).await?;
            print_records(&grid)?;
        }
        Command::Update {
            id,
            name,
            position,
            salary,
        } => {
            let edits = edits_for(name, position, salary);
            if edits.is_empty() {
                bail!("nothing to update; pass --name, --position or --salary");
            }
            let mut grid = load(api).await?;
            let id = EmployeeId(id);
            let Some(index) = grid.records().position(|record| record.id == Some(id)) else {
                bail!("employee {id} not found");
            };
            for (field, value) in edits {
                grid.edit_field(index, field, value)?;
            }
            let requests = grid.save()?;
            run(api, &mut grid, requests).await?;
            print_records(&grid)?;
        }
        Command::Delete { ids, yes } => {
            let mut grid = GridController::new();
            for id in ids {
                grid.toggle_selection(EmployeeId(id));
            }
            let request = if yes {
                grid.delete_with(&mut |_: &str| true)?
            } else {
                grid.delete_with(&mut prompt_stdin)?
            };
            match request {
                Some(request) => run(api, &mut grid, vec![request]).await?,
                None => eprintln!("delete cancelled"),
            }
        }
    }

    Ok(())
}
