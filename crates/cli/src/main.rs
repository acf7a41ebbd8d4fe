//! Biodata parser CLI
//!
//! Reads a pasted biodata message from a file or stdin and prints the
//! extracted profile as JSON:
//!
//! ```text
//! biodata-parse message.txt --pretty
//! pbpaste | biodata-parse --today 2025-01-01
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use biodata_config::{load_settings, load_settings_from, Settings};
use biodata_core::ParsedProfile;
use biodata_text_processing::BiodataParser;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Parse a free-text matrimonial biodata into a structured profile.
#[derive(Debug, Parser)]
#[command(name = "biodata-parse", version, about)]
struct Cli {
    /// Input file path or "-" for stdin. If omitted, reads from stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Settings environment; loads config/{env}.* over config/default.*
    #[arg(long, env = "BIODATA_ENV")]
    env: Option<String>,

    /// Configuration directory (defaults to ./config when present)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Reference date for deriving age from date of birth (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config_dir {
        Some(dir) => load_settings_from(dir, cli.env.as_deref()),
        None => load_settings(cli.env.as_deref()),
    }
    .context("Failed to load settings")?;

    init_tracing(&settings);
    tracing::debug!(
        environment = settings.environment.as_str(),
        "Starting biodata-parse v{}",
        env!("CARGO_PKG_VERSION")
    );

    let parser = build_parser(&settings, cli.today)?;
    let text = load_input(&cli.input)?;
    let result = parser.parse(&text);

    println!("{}", render(&result, cli.pretty)?);
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("biodata={}", level).into()
    });

    // stdout carries only the JSON result
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .without_time()
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

fn build_parser(settings: &Settings, today: Option<NaiveDate>) -> Result<BiodataParser> {
    let mut config = settings.parser.clone();
    if let Some(date) = today {
        config = config.with_reference_date(date);
    }
    BiodataParser::from_config(config).context("Invalid parser configuration")
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        let bytes =
            std::fs::read(Path::new(input)).context(format!("Failed to read file: {input}"))?;
        // Pasted exports are not always clean UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn render(result: &ParsedProfile, pretty: bool) -> Result<String> {
    let json = if pretty {
        result.to_json_pretty()
    } else {
        result.to_json()
    };
    json.context("Failed to serialize parse result")
}
