use log::debug;
use rust_decimal::Decimal;

use super::transactions::TransactionError;

/// Interest-bearing sub-account. The balance never goes below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsAccount {
    balance: Decimal,
    interest_rate: Decimal,
}

impl SavingsAccount {
    pub fn new(balance: Decimal, interest_rate: Decimal) -> Self {
        Self {
            balance,
            interest_rate,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Add funds. Amounts are validated by the transaction layer, not here.
    ///
    /// Fails only when the new balance would not fit in a `Decimal`.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| TransactionError::InvalidInput("Invalid deposit amount".to_string()))?;
        Ok(())
    }

    /// Remove funds, refusing anything above the current balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), TransactionError> {
        if amount > self.balance {
            return Err(TransactionError::InsufficientFunds(
                "Insufficient funds in savings account".to_string(),
            ));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| TransactionError::InvalidInput("Invalid withdrawal amount".to_string()))?;
        Ok(())
    }

    /// Credit one period of interest and return the amount credited.
    ///
    /// Each call compounds on the previous balance, so callers decide how often
    /// a period elapses.
    pub fn apply_interest(&mut self) -> Result<Decimal, TransactionError> {
        let interest = self
            .balance
            .checked_mul(self.interest_rate)
            .ok_or_else(|| TransactionError::InvalidInput("Interest overflows savings balance".to_string()))?;
        self.deposit(interest)?;
        debug!("Credited {} interest at rate {}", interest, self.interest_rate);
        Ok(interest)
    }
}
