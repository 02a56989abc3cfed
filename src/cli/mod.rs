//! Command-line interface, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// Lettuce - content and auth API for a daily recipe journal
#[derive(Parser)]
#[command(name = "lettuce")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Print an Argon2 hash for seeding an account out-of-band
    HashPassword {
        /// Plaintext password to hash
        password: String,
    },
}

pub use commands::*;
