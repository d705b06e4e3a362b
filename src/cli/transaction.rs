use anyhow::{anyhow, Context, Result};
use log::{error, info};

use crate::account::{process_transaction, AccountType, Receipt, TransactionRequest, TransactionType};
use crate::bank::Bank;
use crate::cli::utils::{format_amount, print_error, print_success, read_password};
use crate::config;
use crate::store::{self, AccountStore, JsonFileStore};

/// Render a receipt the way the terminal shows it
pub fn format_receipt(receipt: &Receipt, currency_symbol: &str) -> String {
    let verb = match receipt.transaction_type {
        TransactionType::Withdraw => "Withdrawal from",
        TransactionType::Deposit => "Deposit to",
    };
    format!(
        "{} {} successful. New balance: {} (Ref: {})",
        verb,
        receipt.account_type,
        format_amount(receipt.new_balance, currency_symbol),
        receipt.reference_id
    )
}

/// Map a typed transaction type onto its exact label, ignoring case.
///
/// Unknown text passes through untouched so the core reports it.
pub fn normalize_transaction_type(input: &str) -> String {
    TransactionType::from_str_lenient(input)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| input.to_string())
}

pub fn normalize_account_type(input: &str) -> String {
    AccountType::from_str_lenient(input)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| input.to_string())
}

/// One-shot transaction from command line arguments.
///
/// Prompts for the PIN when it was not given on the command line.
pub fn run_transaction(
    bank: &mut Bank,
    account_number: &str,
    pin: Option<&str>,
    transaction_type: &str,
    account_type: &str,
    amount: &str,
) -> Result<Receipt> {
    let pin = match pin {
        Some(pin) => pin.to_string(),
        None => read_password("PIN: ").context("Failed to read PIN")?,
    };

    let request = TransactionRequest {
        account_number: account_number.to_string(),
        pin,
        transaction_type: normalize_transaction_type(transaction_type),
        account_type: normalize_account_type(account_type),
        amount: amount.to_string(),
    };

    let symbol = config::get_config().display.currency_symbol;
    match process_transaction(bank, &request) {
        Ok(receipt) => {
            print_success(&format_receipt(&receipt, &symbol));
            Ok(receipt)
        }
        Err(e) => {
            print_error(&e.to_string());
            Err(anyhow!("Transaction failed: {}", e))
        }
    }
}

/// Credit one interest period on every savings sub-account
pub fn apply_interest(bank: &mut Bank) -> Result<()> {
    let symbol = config::get_config().display.currency_symbol;
    let credited = bank.apply_interest_to_all();

    println!("{:<12} {:>16}", "ACCOUNT", "SAVINGS BALANCE");
    println!("{:-<12} {:->16}", "", "");
    for account in bank.accounts() {
        println!(
            "{:<12} {:>16}",
            account.account_number(),
            format_amount(account.savings().balance(), &symbol)
        );
    }

    print_success(&format!(
        "Interest applied to {} of {} accounts",
        credited,
        bank.len()
    ));
    Ok(())
}

/// Seed the store with the default accounts.
///
/// An existing store is only replaced when `force` is set.
pub fn init_store(store: &JsonFileStore, force: bool) -> Result<Bank> {
    if store.exists() && !force {
        return Err(anyhow!(
            "Account store already exists at {:?}. Use --force to overwrite it.",
            store.path()
        ));
    }

    let bank = Bank::with_default_accounts();
    store::save_bank(store, &bank)
        .with_context(|| format!("Failed to write account store {:?}", store.path()))?;

    info!("Initialized account store at {:?}", store.path());
    print_success(&format!(
        "Account store initialized with {} default accounts",
        bank.len()
    ));
    Ok(bank)
}

/// Save on shutdown. Failures are logged and never abort the process.
pub fn persist(store: &dyn AccountStore, bank: &Bank) -> bool {
    match store::save_bank(store, bank) {
        Ok(()) => true,
        Err(e) => {
            error!("Error saving accounts to store: {}", e);
            false
        }
    }
}
