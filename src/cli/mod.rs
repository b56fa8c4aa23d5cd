//! CLI module for the shopping cart service

pub mod serve;

use clap::{Parser, Subcommand};

/// Shopping cart service - per-user carts backed by Redis
#[derive(Parser)]
#[command(name = "shopping-cart-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
