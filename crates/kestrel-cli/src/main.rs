use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use kestrel_cli::{commands, OutputFormat};
use std::path::PathBuf;

/// Company scraped when none is given; the Malaysian listing this pipeline
/// was built for.
const DEFAULT_COMPANY_ID: &str = "4156490";

#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Automated retrieval of filing metadata from the Capital IQ portal",
    long_about = "Kestrel drives a Chrome session to log in to the Capital IQ portal, \
                  walks a company's filings grid to collect document version ids, pulls the \
                  portal's spreadsheet export, and writes a reconciled per-company CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with each configured account and scrape the target company
    Run {
        /// Company identifier for the filings listing
        #[arg(long, env = "KESTREL_COMPANY_ID", default_value = DEFAULT_COMPANY_ID)]
        company_id: String,

        /// Directory the export lands in and the output CSV is written to
        #[arg(long, env = "KESTREL_DOWNLOAD_DIR")]
        download_dir: Option<PathBuf>,

        /// Path to the Chrome/Chromium binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Run the browser without a window
        #[arg(long)]
        headless: bool,

        /// Seconds to wait between accounts
        #[arg(long, default_value_t = 2)]
        delay: u64,
    },

    /// List accounts discovered in the environment (passwords masked)
    Accounts {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let accounts = kestrel_core::config::accounts_from_env();

    match cli.command {
        Commands::Run {
            company_id,
            download_dir,
            chrome_path,
            headless,
            delay,
        } => {
            let options = commands::run::RunOptions {
                company_id,
                download_dir: download_dir.unwrap_or_else(default_download_dir),
                chrome_path,
                headless,
                delay,
            };
            commands::run::execute(&accounts, &options).await
        }
        Commands::Accounts { format } => commands::accounts::execute(&accounts, format),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("kestrel=debug,kestrel_core=debug,kestrel_browser=debug")
    } else {
        EnvFilter::new("kestrel=info,kestrel_core=info,kestrel_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
