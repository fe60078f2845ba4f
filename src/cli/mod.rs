//! CLI module - Command-line interface for Heroboard
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Heroboard - reviews and assistance requests for heroes
#[derive(Parser)]
#[command(name = "heroboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// List heroes with their ratings
    #[command(alias = "ls")]
    Heroes,

    /// List registered users
    Users,

    /// Mark a user account as a hero account
    Promote {
        /// Username to promote
        username: String,
    },
}

pub use commands::*;
