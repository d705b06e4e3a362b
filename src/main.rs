use atm_cli::cli;
use atm_cli::config;
use atm_cli::store::{self, JsonFileStore};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::process;

/// ATM CLI - a terminal-based single-branch ATM
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Overrides the account store path from the configuration
    #[clap(long, value_name = "FILE")]
    store: Option<String>,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default accounts to the account store
    Init {
        /// Overwrite an existing store
        #[clap(long)]
        force: bool,
    },

    /// Run a single deposit or withdrawal
    Transaction {
        /// Account number
        #[clap(long)]
        account_number: String,

        /// PIN (prompted for when omitted)
        #[clap(long)]
        pin: Option<String>,

        /// Transaction type (withdraw or deposit)
        #[clap(short, long)]
        r#type: String,

        /// Sub-account (savings or checking)
        #[clap(long)]
        account_type: String,

        /// Amount
        #[clap(short, long, allow_hyphen_values = true)]
        amount: String,
    },

    /// Start an interactive teller session
    Interactive {},

    /// Credit one interest period on every savings account
    ApplyInterest {},
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.debug {
        0 => log::set_max_level(log::LevelFilter::Info),
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    info!("Starting ATM CLI");

    match config::load_config(&cli.config) {
        Ok(_) => {
            info!("Configuration loaded successfully");
        }
        Err(err) => {
            error!("Failed to load configuration: {}", err);
            process::exit(1);
        }
    }

    let mut store = JsonFileStore::from_config();
    if let Some(path) = &cli.store {
        let verify = config::get_config().store.verify_checksum;
        store = JsonFileStore::new(path).verify_checksum(verify);
    }

    if let Commands::Init { force } = &cli.command {
        if let Err(err) = cli::transaction::init_store(&store, *force) {
            error!("Error initializing store: {:#}", err);
            process::exit(1);
        }
        return;
    }

    let mut bank = store::load_bank(&store);

    let result = match &cli.command {
        Commands::Transaction {
            account_number,
            pin,
            r#type,
            account_type,
            amount,
        } => cli::transaction::run_transaction(
            &mut bank,
            account_number,
            pin.as_deref(),
            r#type,
            account_type,
            amount,
        )
        .map(|_| ()),
        Commands::Interactive {} => cli::interactive::run_session(&mut bank).map(|count| {
            info!("Session completed {} transactions", count);
        }),
        Commands::ApplyInterest {} => cli::transaction::apply_interest(&mut bank),
        Commands::Init { .. } => Ok(()),
    };

    // Save on clean shutdown regardless of how the command went
    cli::transaction::persist(&store, &bank);

    if let Err(err) = result {
        error!("{:#}", err);
        process::exit(1);
    }
}
