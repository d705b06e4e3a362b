use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::checking::CheckingAccount;
use super::savings::SavingsAccount;
use super::transactions::TransactionError;

/// Which sub-account a transaction targets
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }

    /// Selector label accepted by `from_str`
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Checking => "Checking",
        }
    }

    /// Case-insensitive lookup for front ends that let users type selectors
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        [AccountType::Savings, AccountType::Checking]
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
    }
}

impl FromStr for AccountType {
    type Err = TransactionError;

    /// Exact match on the selector label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Savings" => Ok(AccountType::Savings),
            "Checking" => Ok(AccountType::Checking),
            _ => Err(TransactionError::InvalidInput(
                "Invalid account type".to_string(),
            )),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Withdraw,
    Deposit,
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Withdraw => "withdraw",
            TransactionType::Deposit => "deposit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Withdraw => "Withdraw",
            TransactionType::Deposit => "Deposit",
        }
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        [TransactionType::Withdraw, TransactionType::Deposit]
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
    }
}

impl FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Withdraw" => Ok(TransactionType::Withdraw),
            "Deposit" => Ok(TransactionType::Deposit),
            _ => Err(TransactionError::InvalidInput(
                "Invalid transaction type".to_string(),
            )),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer account: an identity owning one savings and one checking sub-account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    account_number: String,
    pin: String,
    savings: SavingsAccount,
    checking: CheckingAccount,
}

impl Account {
    pub fn new(
        account_number: impl Into<String>,
        pin: impl Into<String>,
        savings_balance: Decimal,
        savings_interest_rate: Decimal,
        checking_balance: Decimal,
        checking_overdraft_limit: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            pin: pin.into(),
            savings: SavingsAccount::new(savings_balance, savings_interest_rate),
            checking: CheckingAccount::new(checking_balance, checking_overdraft_limit),
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Exact, case-sensitive credential comparison
    pub fn matches(&self, account_number: &str, pin: &str) -> bool {
        self.account_number == account_number && self.pin == pin
    }

    pub fn savings(&self) -> &SavingsAccount {
        &self.savings
    }

    pub fn savings_mut(&mut self) -> &mut SavingsAccount {
        &mut self.savings
    }

    pub fn checking(&self) -> &CheckingAccount {
        &self.checking
    }

    pub fn checking_mut(&mut self) -> &mut CheckingAccount {
        &mut self.checking
    }

    pub fn sub_account_balance(&self, account_type: AccountType) -> Decimal {
        match account_type {
            AccountType::Savings => self.savings.balance(),
            AccountType::Checking => self.checking.balance(),
        }
    }
}
