use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::models::{Account, AccountType, TransactionType};
use crate::bank::Bank;

/// Transaction processing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionError {
    /// Malformed amount, non-positive amount or unknown selector
    #[error("{0}")]
    InvalidInput(String),

    /// Withdrawal exceeds the funds available on the sub-account
    #[error("{0}")]
    InsufficientFunds(String),

    /// No account matches the supplied credentials
    #[error("Invalid account number or PIN")]
    AuthenticationFailed,
}

/// Error kind tag, for callers that branch without matching on payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    InsufficientFunds,
    AuthenticationFailed,
}

impl TransactionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransactionError::InvalidInput(_) => ErrorKind::InvalidInput,
            TransactionError::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            TransactionError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
        }
    }
}

/// Raw, unparsed transaction request as typed by a front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub account_number: String,
    pub pin: String,
    pub transaction_type: String,
    pub account_type: String,
    pub amount: String,
}

/// Outcome of a successful transaction. Only the affected sub-account is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub reference_id: String,
    pub transaction_type: TransactionType,
    pub account_type: AccountType,
    pub amount: Decimal,
    pub new_balance: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Receipt {
    fn new(
        transaction_type: TransactionType,
        account_type: AccountType,
        amount: Decimal,
        new_balance: Decimal,
    ) -> Self {
        Self {
            reference_id: generate_transaction_reference(),
            transaction_type,
            account_type,
            amount,
            new_balance,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transaction_type {
            TransactionType::Withdraw => write!(
                f,
                "Withdrawal from {} successful. New balance: {}",
                self.account_type, self.new_balance
            ),
            TransactionType::Deposit => write!(
                f,
                "Deposit to {} successful. New balance: {}",
                self.account_type, self.new_balance
            ),
        }
    }
}

/// Parse a user-typed amount. Sign is kept; positivity is checked later.
pub fn parse_amount(text: &str) -> Result<Decimal, TransactionError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TransactionError::InvalidInput(format!("Invalid amount: {}", text)))
}

/// Deposit into an already authenticated account
pub fn deposit(
    account: &mut Account,
    account_type: AccountType,
    amount: Decimal,
) -> Result<Receipt, TransactionError> {
    if amount <= Decimal::ZERO {
        return Err(TransactionError::InvalidInput(
            "Invalid deposit amount".to_string(),
        ));
    }

    match account_type {
        AccountType::Savings => account.savings_mut().deposit(amount)?,
        AccountType::Checking => account.checking_mut().deposit(amount)?,
    }

    let receipt = Receipt::new(
        TransactionType::Deposit,
        account_type,
        amount,
        account.sub_account_balance(account_type),
    );
    info!(
        "Deposit of {} to {} on account {} (Ref: {})",
        amount,
        account_type,
        account.account_number(),
        receipt.reference_id
    );
    Ok(receipt)
}

/// Withdraw from an already authenticated account
pub fn withdraw(
    account: &mut Account,
    account_type: AccountType,
    amount: Decimal,
) -> Result<Receipt, TransactionError> {
    if amount <= Decimal::ZERO {
        return Err(TransactionError::InvalidInput(
            "Invalid withdrawal amount".to_string(),
        ));
    }

    match account_type {
        AccountType::Savings => account.savings_mut().withdraw(amount)?,
        AccountType::Checking => account.checking_mut().withdraw(amount)?,
    }

    let receipt = Receipt::new(
        TransactionType::Withdraw,
        account_type,
        amount,
        account.sub_account_balance(account_type),
    );
    info!(
        "Withdrawal of {} from {} on account {} (Ref: {})",
        amount,
        account_type,
        account.account_number(),
        receipt.reference_id
    );
    Ok(receipt)
}

/// Run one transaction attempt from raw front-end input.
///
/// The amount is parsed before authentication, but its sign is only checked
/// afterwards, so a bad login always wins over a bad amount. The account type
/// selector is resolved last.
pub fn process_transaction(
    bank: &mut Bank,
    request: &TransactionRequest,
) -> Result<Receipt, TransactionError> {
    debug!(
        "Processing {} transaction on {} for account {}",
        request.transaction_type, request.account_type, request.account_number
    );

    let amount = parse_amount(&request.amount)?;
    let account = bank.authenticate_mut(&request.account_number, &request.pin)?;
    let transaction_type = TransactionType::from_str(&request.transaction_type)?;

    let checked_amount = |message: &str| {
        if amount <= Decimal::ZERO {
            Err(TransactionError::InvalidInput(message.to_string()))
        } else {
            Ok(amount)
        }
    };

    let result = match transaction_type {
        TransactionType::Withdraw => {
            let amount = checked_amount("Invalid withdrawal amount")?;
            let account_type = AccountType::from_str(&request.account_type)?;
            withdraw(account, account_type, amount)
        }
        TransactionType::Deposit => {
            let amount = checked_amount("Invalid deposit amount")?;
            let account_type = AccountType::from_str(&request.account_type)?;
            deposit(account, account_type, amount)
        }
    };

    if let Err(e) = &result {
        warn!("Transaction rejected for account {}: {}", request.account_number, e);
    }
    result
}

/// Generate a unique transaction reference for receipts
fn generate_transaction_reference() -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random_part = Uuid::new_v4().simple().to_string();
    format!("TXN-{}-{}", timestamp, &random_part[..8])
}
