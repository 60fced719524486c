use crate::OutputFormat;
use anyhow::Result;
use console::style;
use kestrel_core::config::Account;

/// Show the accounts discovered in the environment. Passwords are never
/// printed in any format.
pub fn execute(accounts: &[Account], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(accounts),
        OutputFormat::Pretty => output_pretty(accounts),
    }
}

fn output_json(accounts: &[Account]) -> Result<()> {
    let listing: Vec<serde_json::Value> = accounts
        .iter()
        .map(|account| {
            serde_json::json!({
                "account_number": account.account_number,
                "username": account.username,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn output_pretty(accounts: &[Account]) -> Result<()> {
    println!("\n{}", style("Configured Accounts").bold().cyan());

    if accounts.is_empty() {
        println!("{}", style("No accounts found").yellow());
        println!(
            "\nSet {} and {} environment variable pairs.",
            style("USERNAME_ACCOUNT<n>").bold(),
            style("PASSWORD_ACCOUNT<n>").bold()
        );
        return Ok(());
    }

    for account in accounts {
        println!(
            "  {:<12} {}",
            style(&account.account_number).green(),
            account.username
        );
    }
    println!("\n{} account(s)", accounts.len());

    Ok(())
}
