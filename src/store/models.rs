use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;

/// Current on-disk format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Flat, portable form of one customer account
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountRecord {
    pub account_number: String,
    pub pin: String,
    pub savings_balance: Decimal,
    pub savings_rate: Decimal,
    pub checking_balance: Decimal,
    pub overdraft_limit: Decimal,
}

impl AccountRecord {
    /// Check the balance invariants an `Account` must hold
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.savings_balance < Decimal::ZERO {
            return Err("negative savings balance");
        }
        if self.savings_rate < Decimal::ZERO {
            return Err("negative interest rate");
        }
        if self.overdraft_limit < Decimal::ZERO {
            return Err("negative overdraft limit");
        }
        if self.checking_balance < -self.overdraft_limit {
            return Err("checking balance exceeds overdraft limit");
        }
        Ok(())
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.account_number().to_string(),
            pin: account.pin().to_string(),
            savings_balance: account.savings().balance(),
            savings_rate: account.savings().interest_rate(),
            checking_balance: account.checking().balance(),
            overdraft_limit: account.checking().overdraft_limit(),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account::new(
            record.account_number,
            record.pin,
            record.savings_balance,
            record.savings_rate,
            record.checking_balance,
            record.overdraft_limit,
        )
    }
}

/// The whole store file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// SHA-256 of the JSON-serialized `accounts` array, hex encoded
    pub checksum: String,
    pub accounts: Vec<AccountRecord>,
}
