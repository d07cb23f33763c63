use clap::Parser;
use menu_cache_aside::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Lookup(args) => cli::lookup::run(args).await,
    }
}
