//! CLI module for the menu cache-aside service
//!
//! Subcommands:
//! - `serve`: HTTP API server
//! - `lookup`: one-shot lookup of menu ids, printed as JSON

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

/// Food menu service with a read-through cache
#[derive(Parser)]
#[command(name = "menu-cache-aside")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Look up menus by id against the seeded repository
    Lookup(lookup::LookupArgs),
}
