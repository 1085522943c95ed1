use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::fs;

use bospop_faq::config::config::{load_config, AppConfig};
use bospop_faq::refresh::{initialize, refresh};
use bospop_faq::scraping::extract_faq::FaqSelectors;
use bospop_faq::scraping::fetch_page::FaqFetcher;
use bospop_faq::shell::{print_refresh_result, print_status};
use bospop_faq::utilities::cache_store::CacheStore;
use bospop_faq::utilities::export_xlsx::{export_file_name, export_xlsx, validate_sheet_name};

#[derive(Parser)]
#[command(version, about = "Fetches the Bospop FAQ and turns it into an Excel file")]
struct Cli {
    /// Settings file layered over the built-in defaults
    #[arg(long, default_value = "Settings.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the last update time and a preview of the FAQ data
    Status {
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Fetch the FAQ page again and replace the cached data
    Refresh {
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Write the current FAQ data to an .xlsx file
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

struct App {
    config: AppConfig,
    fetcher: FaqFetcher,
    selectors: FaqSelectors,
    store: CacheStore,
}

impl App {
    fn new(config: AppConfig) -> Result<Self> {
        let fetcher = FaqFetcher::new(&config.source).context("Failed to set up HTTP client")?;
        let selectors =
            FaqSelectors::from_config(&config.selectors).context("Invalid selector settings")?;
        validate_sheet_name(&config.export.sheet_name).with_context(|| {
            format!("Invalid export sheet name '{}'", config.export.sheet_name)
        })?;
        let store = CacheStore::new(&config.cache.path);

        Ok(Self {
            config,
            fetcher,
            selectors,
            store,
        })
    }

    async fn status(&self, rows: usize) {
        let outcome = initialize(&self.fetcher, &self.selectors, &self.store).await;
        if !outcome.is_success() {
            print_refresh_result(&outcome);
        }
        print_status(outcome.snapshot.as_ref(), rows);
    }

    async fn refresh(&self, rows: usize) {
        let current = self.store.load();
        let outcome = refresh(&self.fetcher, &self.selectors, &self.store, current).await;
        print_refresh_result(&outcome);
        print_status(outcome.snapshot.as_ref(), rows);
    }

    async fn export(&self, output: Option<PathBuf>) -> Result<()> {
        let outcome = initialize(&self.fetcher, &self.selectors, &self.store).await;
        let Some(snapshot) = outcome.snapshot.as_ref() else {
            print_refresh_result(&outcome);
            anyhow::bail!("no FAQ data to export");
        };

        let bytes = export_xlsx(snapshot, &self.config.export.sheet_name)
            .context("Failed to build the spreadsheet")?;
        let path = output.unwrap_or_else(|| {
            PathBuf::from(export_file_name(
                &self.config.export.file_prefix,
                Local::now().date_naive(),
            ))
        });
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!(
            "{} {} ({} items, last update {})",
            "Exported".green(),
            path.display(),
            snapshot.records.len(),
            snapshot.captured_at_display()
        );
        Ok(())
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config).context("Failed to load configuration")?;
    let app = App::new(config)?;

    match cli.command.unwrap_or(Command::Status { rows: 10 }) {
        Command::Status { rows } => app.status(rows).await,
        Command::Refresh { rows } => app.refresh(rows).await,
        Command::Export { output } => app.export(output).await?,
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bospop_faq=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "An unexpected error occurred:".red(), e);
        std::process::exit(1);
    }
}
