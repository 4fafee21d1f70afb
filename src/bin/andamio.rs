//! Andamio CLI
//!
//! Loads a quote fixture, applies command line overrides and prints its totals.
//!
//! Use `-f` to choose the fixture file, `--json` for a JSON snapshot.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use andamio::{cli::QuoteArgs, fixtures::QuoteFixture, quote::Quote};

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_err| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = QuoteArgs::parse();

    init_logging(&args.log_level);

    let fixture = QuoteFixture::from_path(&args.fixture)
        .with_context(|| format!("loading {}", args.fixture.display()))?;

    let quote = args.apply(Quote::try_from(fixture)?);

    info!(
        items = quote.items().len(),
        mode = %quote.config().mode(),
        "computing quote"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut handle, &quote.snapshot())?;
    } else {
        quote.summary().write_to(&mut handle)?;
    }

    Ok(())
}
