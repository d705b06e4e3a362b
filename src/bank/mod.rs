use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::account::{Account, TransactionError};
use crate::store::models::AccountRecord;

/// The branch: an ordered collection of customer accounts.
///
/// Account numbers are expected to be unique but this is not enforced; lookups
/// return the first match in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bank {
    accounts: Vec<Account>,
}

/// The two accounts a fresh installation starts with
pub fn default_accounts() -> Vec<Account> {
    vec![
        Account::new(
            "123456",
            "1234",
            Decimal::new(1000, 0),
            Decimal::new(5, 2),
            Decimal::new(2000, 0),
            Decimal::new(500, 0),
        ),
        Account::new(
            "789012",
            "5678",
            Decimal::new(1500, 0),
            Decimal::new(3, 2),
            Decimal::new(2500, 0),
            Decimal::new(600, 0),
        ),
    ]
}

impl Bank {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn with_default_accounts() -> Self {
        Self::new(default_accounts())
    }

    pub fn from_records(records: Vec<AccountRecord>) -> Self {
        Self::new(records.into_iter().map(Account::from).collect())
    }

    /// Snapshot of every account, in order, for the store
    pub fn to_records(&self) -> Vec<AccountRecord> {
        self.accounts.iter().map(AccountRecord::from).collect()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Find the first account whose number and PIN both match exactly.
    ///
    /// Unknown accounts and wrong PINs fail with the same error.
    pub fn authenticate(&self, account_number: &str, pin: &str) -> Result<&Account, TransactionError> {
        self.position(account_number, pin)
            .map(|index| &self.accounts[index])
    }

    pub fn authenticate_mut(
        &mut self,
        account_number: &str,
        pin: &str,
    ) -> Result<&mut Account, TransactionError> {
        let index = self.position(account_number, pin)?;
        Ok(&mut self.accounts[index])
    }

    fn position(&self, account_number: &str, pin: &str) -> Result<usize, TransactionError> {
        match self.accounts.iter().position(|a| a.matches(account_number, pin)) {
            Some(index) => {
                debug!("Authenticated account {}", account_number);
                Ok(index)
            }
            None => {
                warn!("Authentication failed for account {}", account_number);
                Err(TransactionError::AuthenticationFailed)
            }
        }
    }

    /// Credit one interest period on every savings sub-account.
    ///
    /// Returns the number of accounts credited. An account whose balance would
    /// overflow is skipped and left unchanged.
    pub fn apply_interest_to_all(&mut self) -> usize {
        let mut credited = 0;
        for account in self.accounts.iter_mut() {
            let account_number = account.account_number().to_string();
            match account.savings_mut().apply_interest() {
                Ok(_) => credited += 1,
                Err(e) => warn!("Skipped interest for account {}: {}", account_number, e),
            }
        }
        info!(
            "Applied interest to {} of {} savings accounts",
            credited,
            self.accounts.len()
        );
        credited
    }
}
