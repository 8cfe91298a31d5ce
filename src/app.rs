use std::{io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::{
    common::{
        config::{Config, DATA_DIR_ENV, DEFAULT_DATA_DIR},
        error::LedgerError,
    },
    io::{
        api::{Api, ApiResponse},
        writer,
    },
    store::JsonFileStore,
    worker::queries,
};

#[derive(Parser, Debug)]
#[command(name = "chip-ledger", version, about = "Chip balances, transaction ledger and leaderboard")]
pub struct Cli {
    /// Directory holding users.json, history.json and ranking.json.
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account; the id is generated when omitted.
    Create {
        #[arg(long)]
        id: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        balance: Option<String>,
    },
    /// Show an account's balance.
    Balance { id: String },
    /// Credit an account.
    Add(TransactionArgs),
    /// Debit an account. The balance may go negative.
    Subtract(TransactionArgs),
    /// List ledger entries, newest first.
    History {
        #[arg(long)]
        csv: bool,
    },
    /// Show the leaderboard.
    Ranking {
        #[arg(long)]
        csv: bool,
    },
    /// Account count, total balance and transaction count.
    Stats,
    /// Send a raw request through the JSON API routes.
    Request {
        method: String,
        path: String,
        #[arg(default_value = "")]
        body: String,
    },
}

#[derive(Args, Debug)]
pub struct TransactionArgs {
    pub id: String,
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    #[arg(long, default_value = "")]
    pub games: String,
    #[arg(long, default_value = "")]
    pub dealer: String,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(&self.data_dir)
    }
}

/// Runs one command and writes its output to `out`.
///
/// Returns the API status code of the response (200 for CSV exports) so the
/// caller can choose an exit code.
pub fn run<W: Write>(cli: Cli, mut out: W) -> Result<u16, LedgerError> {
    let config = cli.config();
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let mut api = Api::new(JsonFileStore::new(config.data_dir));

    let response = match cli.command {
        Command::Create { id, balance } => api.post_users(&json!({ "id": id, "balance": balance })),
        Command::Balance { id } => api.get_balance(&id),
        Command::Add(args) => api.post_add(&transaction_body(args)),
        Command::Subtract(args) => api.post_subtract(&transaction_body(args)),
        Command::History { csv: true } => {
            writer::write_history(&mut out, &queries::history(api.store()))?;
            return Ok(200);
        }
        Command::History { csv: false } => api.get_history(),
        Command::Ranking { csv: true } => {
            writer::write_ranking(&mut out, &queries::ranking(api.store()))?;
            return Ok(200);
        }
        Command::Ranking { csv: false } => api.get_ranking(),
        Command::Stats => api.get_dashboard_stats(),
        Command::Request { method, path, body } => api.route(&method, &path, &body),
    };

    print_response(&mut out, &response)?;
    Ok(response.status)
}

fn transaction_body(args: TransactionArgs) -> serde_json::Value {
    json!({
        "id": args.id,
        "amount": args.amount,
        "games": args.games,
        "dealer": args.dealer,
    })
}

fn print_response<W: Write>(out: &mut W, response: &ApiResponse) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *out, &response.body)?;
    writeln!(out)?;
    Ok(())
}
