//! Single-branch ATM core.
//!
//! Customers authenticate with an account number and PIN, then deposit into or
//! withdraw from one of two sub-accounts: savings (interest-bearing, never
//! negative) or checking (may overdraw down to its overdraft limit).
//!
//! [`account::process_transaction`] is the entry point for front ends: it takes
//! raw strings and returns either a [`account::Receipt`] or a
//! [`account::TransactionError`]. The [`store`] module persists the bank as a
//! versioned JSON document.

pub mod account;
pub mod bank;
pub mod cli;
pub mod config;
pub mod store;

pub use account::{
    Account, AccountType, CheckingAccount, ErrorKind, Receipt, SavingsAccount, TransactionError,
    TransactionRequest, TransactionType,
};
pub use bank::Bank;
pub use store::{AccountStore, JsonFileStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
