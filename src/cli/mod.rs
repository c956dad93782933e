//! CLI module for Bookshelf
//!
//! Provides subcommands:
//! - `serve`: HTTP server with greeting, book lookup and cache endpoints
//! - `lookup`: run a sequence of cached book lookups and log their timings

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

/// Bookshelf - cached book lookups and greetings
#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Look up books through the cache and report how long each lookup took
    Lookup(lookup::LookupArgs),
}
