//! CLI module for the cooperative API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Cooperative savings and loan API server
#[derive(Parser)]
#[command(name = "coop-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
