use anyhow::Result;
use log::debug;
use std::io::{self, BufRead, Write};

use crate::account::{process_transaction, TransactionRequest};
use crate::bank::Bank;
use crate::cli::transaction::{format_receipt, normalize_account_type, normalize_transaction_type};
use crate::cli::utils::{print_header, print_info, prompt_line, prompt_secret};
use crate::config;

const QUIT: &str = "quit";

/// Interactive teller session on the process terminal
pub fn run_session(bank: &mut Bank) -> Result<usize> {
    print_header("ATM");
    print_info("Enter 'quit' as the account number to end the session.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session(bank, &mut stdin.lock(), &mut stdout)
}

/// Prompt for transactions until `quit` or end of input.
///
/// Each attempt is independent: a failure is reported and the next attempt
/// starts from a clean form. Returns the number of successful transactions.
pub fn session<R: BufRead, W: Write>(bank: &mut Bank, input: &mut R, output: &mut W) -> Result<usize> {
    let symbol = config::get_config().display.currency_symbol;
    let mut completed = 0;

    loop {
        // credentials and selectors are passed on exactly as typed
        let account_number = prompt_secret(input, output, "\nAccount number: ")?;
        let command = account_number.trim();
        if command.is_empty() || command.eq_ignore_ascii_case(QUIT) {
            break;
        }

        let pin = prompt_secret(input, output, "PIN: ")?;
        let transaction_type = prompt_secret(input, output, "Transaction type [Withdraw/Deposit]: ")?;
        let account_type = prompt_secret(input, output, "Account type [Savings/Checking]: ")?;
        let request = TransactionRequest {
            account_number,
            pin,
            transaction_type: normalize_transaction_type(&transaction_type),
            account_type: normalize_account_type(&account_type),
            amount: prompt_line(input, output, "Amount: ")?,
        };

        match process_transaction(bank, &request) {
            Ok(receipt) => {
                completed += 1;
                writeln!(output, "{}", format_receipt(&receipt, &symbol))?;
            }
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    debug!("Interactive session ended after {} transactions", completed);
    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn run(bank: &mut Bank, script: &str) -> (usize, String) {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let completed = session(bank, &mut input, &mut output).unwrap();
        (completed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_session_processes_until_quit() {
        let mut bank = Bank::with_default_accounts();
        let script = "123456\n1234\nWithdraw\nChecking\n1500\n\
                      123456\n1234\nWithdraw\nChecking\n600\n\
                      quit\n";

        let (completed, output) = run(&mut bank, script);

        assert_eq!(completed, 2);
        assert!(output.contains("New balance: $500.00"));
        assert!(output.contains("New balance: -$100.00"));
        assert_eq!(bank.accounts()[0].checking().balance(), dec!(-100));
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let mut bank = Bank::with_default_accounts();
        let script = "123456\n 1234\nDeposit\nSavings\n10\n\
                      789012\n5678\nDeposit\nSavings\nabc\n\
                      789012\n5678\nDeposit\nSavings\n10\n";

        let (completed, output) = run(&mut bank, script);

        assert_eq!(completed, 1);
        assert!(output.contains("Error: Invalid account number or PIN"));
        assert!(output.contains("Error: Invalid amount: abc"));
        assert_eq!(bank.accounts()[1].savings().balance(), dec!(1510));
        assert_eq!(bank.accounts()[0].savings().balance(), dec!(1000));
    }

    #[test]
    fn test_session_keeps_account_number_as_typed() {
        let mut bank = Bank::with_default_accounts();
        let script = " 123456\n1234\nDeposit\nSavings\n10\n\
                      123456\n1234\nDeposit\n Savings\n10\n\
                      quit\n";

        let (completed, output) = run(&mut bank, script);

        assert_eq!(completed, 0);
        assert!(output.contains("Error: Invalid account number or PIN"));
        assert!(output.contains("Error: Invalid account type"));
        assert_eq!(bank.accounts()[0].savings().balance(), dec!(1000));
    }

    #[test]
    fn test_session_accepts_lowercase_selectors() {
        let mut bank = Bank::with_default_accounts();
        let (completed, _) = run(&mut bank, "123456\n1234\ndeposit\nsavings\n10\nquit\n");

        assert_eq!(completed, 1);
        assert_eq!(bank.accounts()[0].savings().balance(), dec!(1010));
    }

    #[test]
    fn test_session_ends_on_empty_input() {
        let mut bank = Bank::with_default_accounts();
        let (completed, _) = run(&mut bank, "");
        assert_eq!(completed, 0);
    }
}
