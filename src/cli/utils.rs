use anyhow::Result;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

/// Read a PIN from the terminal. Input is echoed and only the line ending is stripped.
pub fn read_password(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt_secret(&mut stdin.lock(), &mut stdout, prompt)
}

/// Prompt on `output` and read one trimmed line from `input`.
///
/// End of input yields an empty string.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a secret. Echo is not suppressed. Only the line ending is
/// stripped; surrounding spaces are part of the value.
pub fn prompt_secret<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(strip_line_ending(&line).to_string())
}

pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Render an amount with the configured currency symbol
pub fn format_amount(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", currency_symbol, rounded.abs())
    } else {
        format!("{}{:.2}", currency_symbol, rounded.abs())
    }
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    println!("❌ Error: {}", message);
}

pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

pub fn print_header(title: &str) {
    println!("\n=== {} ===", title);
}
