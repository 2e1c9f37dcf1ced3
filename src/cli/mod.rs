//! CLI module for the user registry
//!
//! Provides subcommands for running the registry:
//! - `serve`: HTTP API server

pub mod serve;

use clap::{Parser, Subcommand};

/// User registry - validated users with unique usernames over HTTP
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}
