pub mod accounts;
pub mod app;
pub mod dealers;
pub mod init;
pub mod transactions;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::error::Result;
use crate::fmt::Locale;
use crate::models::WoodType;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "timberbook",
    version,
    about = "Bookkeeping dashboard for a timber trading yard."
)]
pub struct Cli {
    /// Ledger API base URL (overrides settings.json for this run)
    #[arg(long, global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write settings.json with the API address and display locale.
    Init {
        /// Ledger API base URL (default: http://127.0.0.1:8787)
        #[arg(long = "api-base")]
        api: Option<String>,
        /// Display locale: en-US or en-IN
        #[arg(long)]
        locale: Option<Locale>,
    },
    /// Manage cash and bank accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage dealers and their advances.
    Dealers {
        #[command(subcommand)]
        command: DealersCommands,
    },
    /// Record and list challans.
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// List all accounts.
    List,
    /// Add a new account.
    Add {
        /// Account name, e.g. 'Cash'
        name: String,
        /// Opening balance in BDT
        #[arg(long, default_value = "0")]
        balance: Decimal,
    },
}

#[derive(Subcommand)]
pub enum DealersCommands {
    /// List all dealers.
    List,
    /// Add a new dealer.
    Add {
        /// Dealer name
        name: String,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Initial advance in BDT
        #[arg(long, default_value = "0")]
        balance: Decimal,
    },
}

#[derive(Subcommand)]
pub enum TransactionsCommands {
    /// List recorded challans.
    List {
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Record a challan. The total is kg × sell rate.
    Add {
        /// Challan number
        #[arg(long)]
        challan: String,
        /// Wood type: Chamble, Meheguni, Rendi, Others
        #[arg(long)]
        wood: WoodType,
        #[arg(long)]
        kg: Decimal,
        /// Buy rate in BDT per kg
        #[arg(long = "buy-rate", default_value = "0")]
        buy_rate: Decimal,
        /// Sell rate in BDT per kg
        #[arg(long = "sell-rate")]
        sell_rate: Decimal,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        narration: String,
    },
}

pub(crate) fn client(settings: &Settings) -> Result<ApiClient> {
    ApiClient::new(&settings.api_base)
}
