use rust_decimal::Decimal;

use super::transactions::TransactionError;

/// Checking sub-account. The balance may go negative down to `-overdraft_limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckingAccount {
    balance: Decimal,
    overdraft_limit: Decimal,
}

impl CheckingAccount {
    pub fn new(balance: Decimal, overdraft_limit: Decimal) -> Self {
        Self {
            balance,
            overdraft_limit,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    /// Funds that can still be withdrawn, overdraft included. Saturates at
    /// `Decimal::MAX`.
    pub fn available(&self) -> Decimal {
        self.balance.saturating_add(self.overdraft_limit)
    }

    /// Fails only when the new balance would not fit in a `Decimal`.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| TransactionError::InvalidInput("Invalid deposit amount".to_string()))?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        if amount > self.available() {
            return Err(TransactionError::InsufficientFunds(
                "Exceeded overdraft limit in checking account".to_string(),
            ));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| TransactionError::InvalidInput("Invalid withdrawal amount".to_string()))?;
        Ok(())
    }
}
