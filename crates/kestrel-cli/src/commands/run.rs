use anyhow::Result;
use console::style;
use kestrel_browser::login::login;
use kestrel_browser::{scrape_company, LaunchOptions, PortalSession, ScrapeSummary};
use kestrel_core::config::Account;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one scrape run, resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub company_id: String,
    pub download_dir: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    /// Seconds to wait between accounts so sessions never overlap in the
    /// shared download directory.
    pub delay: u64,
}

/// The account loop: one fresh browser session per account, sequential,
/// with per-account failure isolation.
pub async fn execute(accounts: &[Account], options: &RunOptions) -> Result<()> {
    if accounts.is_empty() {
        anyhow::bail!(
            "No accounts configured. Set USERNAME_ACCOUNT<n> and PASSWORD_ACCOUNT<n> \
             environment variable pairs."
        );
    }

    println!(
        "{} {} account(s), company {}, downloads in {}",
        style("Kestrel:").bold().cyan(),
        accounts.len(),
        options.company_id,
        options.download_dir.display()
    );

    let mut succeeded = 0;
    for (index, account) in accounts.iter().enumerate() {
        println!(
            "\n{} account {} ({})",
            style("Processing").bold(),
            account.account_number,
            account.username
        );

        match run_account(account, options).await {
            Ok(summary) => {
                succeeded += 1;
                println!(
                    "{} {} version ids, {} rows written to {}",
                    style("✓").green().bold(),
                    summary.version_ids,
                    summary.rows_written,
                    summary.output.display()
                );
            }
            Err(e) => {
                tracing::error!(
                    "Account {} failed: {:#}",
                    account.account_number,
                    e
                );
                println!(
                    "{} account {} failed: {:#}",
                    style("✗").red().bold(),
                    account.account_number,
                    e
                );
            }
        }

        if index + 1 < accounts.len() {
            tokio::time::sleep(Duration::from_secs(options.delay)).await;
        }
    }

    println!(
        "\n{} {}/{} account(s) completed",
        style("Done:").bold().cyan(),
        succeeded,
        accounts.len()
    );

    Ok(())
}

/// Launch, log in, scrape, and always shut the session down, whatever the
/// outcome in between.
async fn run_account(account: &Account, options: &RunOptions) -> Result<ScrapeSummary> {
    let launch = LaunchOptions {
        download_dir: options.download_dir.clone(),
        headless: options.headless,
        chrome_path: options.chrome_path.clone(),
    };
    let session = PortalSession::launch(&launch).await?;

    let outcome = async {
        login(session.page(), account).await?;
        scrape_company(session.page(), &options.download_dir, &options.company_id).await
    }
    .await;

    session.shutdown().await;

    Ok(outcome?)
}
