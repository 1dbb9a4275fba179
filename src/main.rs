mod api;
mod cli;
mod dom;
mod error;
mod fmt;
mod models;
mod render;
mod router;
mod settings;
mod tui;
mod views;

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{AccountsCommands, Cli, Commands, DealersCommands, TransactionsCommands};

/// Log to a file under the config dir; the terminal belongs to the UI.
/// Logging is best-effort: if the file can't be opened we run without it.
fn init_logging() {
    let path = settings::log_path();
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut settings = settings::load_settings();
    if let Some(api) = &cli.api {
        settings.api_base = api.clone();
    }

    let result = match cli.command {
        None => cli::app::run(&settings),
        Some(Commands::Init { api, locale }) => cli::init::run(api, locale),
        Some(Commands::Accounts { command }) => match command {
            AccountsCommands::List => cli::accounts::list(&settings),
            AccountsCommands::Add { name, balance } => cli::accounts::add(&settings, &name, balance),
        },
        Some(Commands::Dealers { command }) => match command {
            DealersCommands::List => cli::dealers::list(&settings),
            DealersCommands::Add {
                name,
                phone,
                balance,
            } => cli::dealers::add(&settings, &name, phone.as_deref(), balance),
        },
        Some(Commands::Transactions { command }) => match command {
            TransactionsCommands::List { limit } => cli::transactions::list(&settings, limit),
            TransactionsCommands::Add {
                challan,
                wood,
                kg,
                buy_rate,
                sell_rate,
                date,
                narration,
            } => cli::transactions::add(
                &settings,
                cli::transactions::Challan {
                    challan,
                    wood,
                    kg,
                    buy_rate,
                    sell_rate,
                    date,
                    narration,
                },
            ),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
