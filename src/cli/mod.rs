//! CLI module - Command-line interface for userbase
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// userbase - account registration service
#[derive(Parser)]
#[command(name = "userbase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "web")]
    Serve,

    /// List registered usernames
    #[command(alias = "ls")]
    Users,

    /// Register a new account
    Register {
        username: String,
        /// Plaintext password; only its hash is stored
        #[arg(long, short)]
        password: String,
    },

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,
}

pub use commands::*;
