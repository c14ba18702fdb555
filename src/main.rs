mod engine;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DAYBUDGET_LOG";
const DEFAULT_LOG_FILTER: &str = "daybudget=info";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    init_logging(&data_dir)?;

    let store = store::Store::open(&data_dir.join("daybudget.db"))?;
    let today = chrono::Local::now().date_naive();
    let (mut session, failures) = session::Session::open(store, today)?;

    match args.len() {
        1 => run::as_tui(&mut session, &failures),
        2.. => run::as_cli(&args, &mut session),
        _ => {
            eprintln!("Usage: daybudget [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "daybudget", "DayBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(data_dir: &Path) -> Result<()> {
    let log_path = data_dir.join("daybudget.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
