use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use itr_cli::config::AppConfig;
use itr_cli::session::Session;
use itr_cli::{app, logging};
use itr_core::{KeyValueStore, TaxRegime};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Income aggregation and old/new regime tax comparison.
///
/// Schedule totals and deductions live in a local store shared by every
/// command; the summary commands only read it.
#[derive(Debug, Parser)]
#[command(name = "itr", version)]
struct Cli {
    /// Configuration file. Defaults to `itr.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store backend to use (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `itr.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes on the saved totals.
    Compare,

    /// Show the total-income computation for one regime.
    Total {
        /// `old` or `new`; defaults to `[view] default_regime`.
        #[arg(long, value_parser = parse_regime)]
        regime: Option<TaxRegime>,
    },

    /// Set one Chapter VI-A deduction (saved immediately).
    Deduction {
        /// Section code, e.g. `80C` or `80CCD(1B)`.
        section: String,
        /// Amount; grouping commas and a rupee mark are accepted.
        amount: String,
    },

    /// Print every stored key and value.
    Show,

    /// Remove everything from the store.
    Clear,

    /// Interactive session with the input pages and summary views.
    Shell,
}

fn parse_regime(s: &str) -> Result<TaxRegime, String> {
    TaxRegime::parse(s).ok_or_else(|| format!("unknown regime '{s}'; expected old or new"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.backend, cli.db);

    logging::init_logging(&config.logging.level);
    if let Some(file) = &config.logging.file
        && let Err(e) = logging::enable_file_logging(file)
    {
        warn!(error = %e, "file logging disabled");
    }

    debug!(?config, "configuration loaded");
    let store = app::open_store(&config.store).await?;

    match cli.command {
        Command::Compare => println!("{}", app::comparison_report(store.as_ref()).await?),
        Command::Total { regime } => {
            let regime = regime.unwrap_or(config.view.default_regime);
            println!("{}", app::total_income_report(store.as_ref(), regime).await?);
        }
        Command::Deduction { section, amount } => {
            println!("{}", app::set_deduction(store.as_ref(), &section, &amount).await?);
        }
        Command::Show => println!("{}", app::dump_store(store.as_ref()).await?),
        Command::Clear => {
            store.clear().await.context("Failed to clear the store")?;
            println!("Store cleared.");
        }
        Command::Shell => {
            let mut session = Session::open(store, config.view.default_regime)
                .await
                .context("Failed to open session")?;
            let interactive = io::stdin().is_terminal();
            if interactive {
                println!("Type `help` for commands.");
            }
            session
                .run(io::stdin().lock(), io::stdout(), interactive)
                .await
                .context("Session I/O failed")?;
        }
    }

    Ok(())
}
