//! Lookup command - runs a sequence of book lookups through the cache

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::time::Instant;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{Book, BookRepository, DomainError, Isbn};
use crate::infrastructure::logging;

/// Arguments for the lookup command
#[derive(Args, Clone)]
pub struct LookupArgs {
    /// ISBNs to look up, in order
    #[arg(default_values = [
        "isbn-1234", "isbn-4567", "isbn-1234", "isbn-4567", "isbn-1234", "isbn-1234",
    ])]
    pub isbns: Vec<String>,

    /// Simulated backend delay in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Outcome of one lookup in the sequence
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub book: Book,
    pub elapsed: Duration,
}

/// Run the lookup sequence
pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();

    if let Some(delay_ms) = args.delay_ms {
        config.lookup.delay_ms = delay_ms;
    }

    logging::init_logging(&config.logging);

    let isbns = args
        .isbns
        .into_iter()
        .map(Isbn::try_from)
        .collect::<Result<Vec<_>, _>>()
        .context("invalid ISBN argument")?;

    let repository = crate::create_book_repository(&config);

    info!(".... Fetching books");
    run_sequence(&repository, &isbns).await?;

    Ok(())
}

/// Look up each ISBN in order, logging the result and latency of every call
pub async fn run_sequence<R>(repository: &R, isbns: &[Isbn]) -> Result<Vec<LookupReport>, DomainError>
where
    R: BookRepository + ?Sized,
{
    let mut reports = Vec::with_capacity(isbns.len());

    for isbn in isbns {
        let start = Instant::now();
        let book = repository.get_by_isbn(isbn).await?;
        let elapsed = start.elapsed();

        info!(
            isbn = %isbn,
            elapsed_ms = elapsed.as_millis() as u64,
            "{} -->{}",
            isbn,
            book
        );

        reports.push(LookupReport { book, elapsed });
    }

    Ok(reports)
}
