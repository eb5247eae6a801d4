//! CLI commands for the smart-money engine.

pub mod alerts;
pub mod analyze;
pub mod decide;

pub use alerts::{run_alerts, AlertsArgs};
pub use analyze::{run_analyze, AnalyzeArgs};
pub use decide::{run_decide, DecideArgs};

use crate::loader;
use anyhow::{Context, Result};
use smart_money_core::{ConfigLoader, EngineConfig, PriceHistory};
use smart_money_signals::{aggregate_with_stats, SmartMoneyEngine};
use std::path::{Path, PathBuf};

/// Config sources shared by the data commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Engine config file (defaults to config/Engine.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Profile overlay, loads config/Engine.<profile>.toml
    #[arg(long, conflicts_with = "config")]
    pub profile: Option<String>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<EngineConfig> {
        match (&self.config, &self.profile) {
            (Some(path), _) => {
                anyhow::ensure!(path.exists(), "Config file not found: {}", path.display());
                ConfigLoader::load_from(path)
            }
            (None, Some(profile)) => ConfigLoader::load_with_profile(profile),
            (None, None) => ConfigLoader::load(),
        }
    }
}

/// Loads CSV inputs and builds an engine over them.
pub fn build_engine(
    volumes: &Path,
    prices: Option<&Path>,
    securities: Option<&Path>,
    config: EngineConfig,
) -> Result<SmartMoneyEngine<PriceHistory>> {
    let raw = loader::load_volumes(volumes)?;
    let (index, stats) = aggregate_with_stats(&raw);
    tracing::info!(
        rows = raw.len(),
        accepted = stats.accepted,
        rejected = stats.rejected(),
        records = index.len(),
        "volume data aggregated"
    );

    let prices = match prices {
        Some(path) => loader::load_prices(path)?,
        None => PriceHistory::new(),
    };

    let engine =
        SmartMoneyEngine::new(index, prices, config).context("Invalid engine configuration")?;

    match securities {
        Some(path) => Ok(engine.with_securities(loader::load_securities(path)?)),
        None => Ok(engine),
    }
}
