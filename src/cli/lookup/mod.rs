//! Lookup command - resolves menu ids through the cache and prints them

use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::menu::{FoodMenu, FoodMenuId};
use crate::domain::LookupArgument;
use crate::infrastructure::logging;

/// Arguments for the lookup command
#[derive(Args, Clone, Debug)]
pub struct LookupArgs {
    /// A single id (`7`) or a comma-separated list (`1,2,3`)
    pub ids: String,

    /// Run the lookup this many times; later runs are served from the cache
    #[arg(long, default_value_t = 1)]
    pub repeat: u32,
}

pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let menus = execute(&config, &args).await?;
    println!("{}", serde_json::to_string_pretty(&menus)?);

    Ok(())
}

/// Runs the lookup `repeat` times and returns the last result
async fn execute(config: &AppConfig, args: &LookupArgs) -> anyhow::Result<Vec<FoodMenu>> {
    let argument = LookupArgument::<FoodMenuId>::parse(&args.ids)?;
    let state = crate::create_app_state_with_config(config).await?;

    let mut menus = Vec::new();
    for run in 1..=args.repeat.max(1) {
        let start = Instant::now();
        menus = state.menu_service.find(argument.clone()).await?;
        info!(
            run,
            found = menus.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Lookup finished"
        );
    }

    Ok(menus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(ids: &str, repeat: u32) -> LookupArgs {
        LookupArgs {
            ids: ids.to_string(),
            repeat,
        }
    }

    #[tokio::test]
    async fn test_lookup_single_id() {
        let menus = execute(&AppConfig::default(), &args("3", 1)).await.unwrap();

        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].name, "Carbonara");
    }

    #[tokio::test]
    async fn test_lookup_many_ids_repeated() {
        let menus = execute(&AppConfig::default(), &args("5,1", 3)).await.unwrap();

        let ids: Vec<FoodMenuId> = menus.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[tokio::test]
    async fn test_lookup_rejects_invalid_ids() {
        let err = execute(&AppConfig::default(), &args("not-an-id", 1))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("not-an-id"));
    }

    #[tokio::test]
    async fn test_lookup_unknown_single_id_fails() {
        assert!(execute(&AppConfig::default(), &args("99", 1)).await.is_err());
    }
}
