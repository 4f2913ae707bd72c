use clap::Parser;
use digi_scraper::config::Config;
use digi_scraper::error::Result;
use digi_scraper::logging::{init_logging, parse_log_level, LoggerConfig};
use digi_scraper::pipeline::{self, RunOptions, RunOutcome};
use digi_scraper::writer::OutputFormat;
use digi_scraper::{log_error, log_info, log_warn};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 3;

/// Scrape a Digimon card set into a delimited file
#[derive(Parser, Debug)]
#[command(name = "digi-scraper", version)]
struct Cli {
    /// Card set identifier substituted into the URL template
    #[arg(short, long)]
    category: String,

    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory for the output file (overrides `output_dir`)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match setup(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let options = RunOptions {
        format: cli.format,
        output_dir: cli.output_dir.clone(),
    };

    match pipeline::run(&config, &cli.category, &options).await {
        Ok(RunOutcome::Saved {
            path,
            records,
            report,
        }) => {
            if !report.is_clean() {
                log_warn!(
                    "[main] {} extraction failure(s), affected fields were written as null",
                    report.failures.len()
                );
            }
            log_info!(
                "[main] Cards found: {}. Saved to {}",
                records,
                path.display()
            );
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NotFound { url }) => {
            log_warn!("[main] Card set not found: {}", url);
            ExitCode::from(EXIT_NOT_FOUND)
        }
        Err(e) => {
            log_error!(e => "[main] Run failed for category {}", cli.category);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn setup(cli: &Cli) -> Result<Config> {
    let config = Config::load(&cli.config)?;

    init_logging(LoggerConfig {
        directory: config.logging.directory.clone(),
        prefix: config.logging.prefix.clone(),
        level: parse_log_level(&config.logging.level)?,
    })?;

    log_info!("[main] Starting scraper for category {}", cli.category);
    Ok(config)
}

