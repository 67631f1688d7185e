use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expense_ledger::cli::{self, AddArgs, DashboardArgs, EditArgs, ListArgs};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::display::format_validation_errors;
use expense_ledger::error::{LedgerError, LedgerResult};
use expense_ledger::logging::init_tracing;
use expense_ledger::models::{ExpenseId, UserId};
use expense_ledger::storage::open_store;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal expense ledger with monthly reports and budget alerts",
    long_about = "Record dated, categorized expenses, list them by month, see \
                  per-category totals and budget overruns, and import expenses \
                  in bulk from CSV."
)]
struct Cli {
    /// Acting user id
    #[arg(short, long, global = true, env = "EXPENSE_LEDGER_USER")]
    user: Option<UserId>,

    /// Base directory for settings and data
    #[arg(long, global = true, env = "EXPENSE_LEDGER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, database and default settings
    Init,

    /// Record a new expense
    Add(AddArgs),

    /// Change an existing expense
    Edit(EditArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: ExpenseId,
    },

    /// List a month's expenses, 10 per page
    #[command(alias = "ls")]
    List(ListArgs),

    /// Import expenses from a headerless CSV file (date,amount,description,category)
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Skip rows with a zero or negative amount
        #[arg(long)]
        reject_non_positive: bool,
    },

    /// Month total, category breakdown and budget alerts
    Dashboard(DashboardArgs),

    /// Years with expenses and their totals
    Years,

    /// Show current configuration and paths
    Config,
}

fn require_user(user: Option<UserId>) -> LedgerResult<UserId> {
    user.ok_or_else(|| {
        LedgerError::Config("No user given; pass --user <ID> or set EXPENSE_LEDGER_USER".into())
    })
}

fn run(command: Commands, paths: &LedgerPaths, user: Option<UserId>) -> LedgerResult<()> {
    let settings = Settings::load_or_create(paths)?;

    match command {
        Commands::Init => return cli::handle_init_command(paths, &settings),
        Commands::Config => return cli::handle_config_command(paths, &settings),
        _ => {}
    }

    let user_id = require_user(user)?;
    let store = open_store(paths)?;

    match command {
        Commands::Add(args) => cli::handle_add(&store, &settings, user_id, args),
        Commands::Edit(args) => cli::handle_edit(&store, &settings, user_id, args),
        Commands::Delete { id } => cli::handle_delete(&store, user_id, id),
        Commands::Show { id } => cli::handle_show(&store, &settings, user_id, id),
        Commands::List(args) => cli::handle_list(&store, &settings, user_id, args),
        Commands::Import {
            file,
            reject_non_positive,
        } => cli::handle_import_command(&store, &settings, user_id, &file, reject_non_positive),
        Commands::Dashboard(args) => {
            cli::handle_dashboard_command(&store, &settings, user_id, args)
        }
        Commands::Years => cli::handle_years_command(&store, &settings, user_id),
        Commands::Init | Commands::Config => Ok(()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new().context("Failed to resolve the data directory")?,
    };

    let Some(command) = cli.command else {
        println!("ledger - personal expense ledger");
        println!();
        println!("Run 'ledger --help' for usage information.");
        return Ok(());
    };

    match run(command, &paths, cli.user) {
        Ok(()) => Ok(()),
        Err(LedgerError::Validation(errors)) => {
            eprintln!("Invalid expense:");
            eprint!("{}", format_validation_errors(&errors));
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
