// Account module
// Sub-accounts, the customer account aggregate, and transaction processing.

mod checking;
mod models;
mod savings;
mod transactions;

pub use checking::CheckingAccount;
pub use models::{Account, AccountType, TransactionType};
pub use savings::SavingsAccount;
pub use transactions::{
    deposit,
    parse_amount,
    process_transaction,
    withdraw,
    ErrorKind,
    Receipt,
    TransactionError,
    TransactionRequest,
};
