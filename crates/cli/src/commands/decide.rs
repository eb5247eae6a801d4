//! Traffic light for a single intended trade.

use super::ConfigArgs;
use crate::output::{light_badge, print_json, OutputFormat};
use anyhow::Result;
use clap::Args;
use smart_money_signals::DecisionEngine;

/// Arguments for the decide command.
#[derive(Args, Debug, Clone)]
pub struct DecideArgs {
    /// Intend to buy
    #[arg(long, conflicts_with = "sell", required_unless_present = "sell")]
    pub buy: bool,

    /// Intend to sell
    #[arg(long)]
    pub sell: bool,

    /// Raw composite sentiment
    #[arg(long, allow_negative_numbers = true)]
    pub raw: Option<f64>,

    /// Weighted sentiment (takes precedence over --raw)
    #[arg(long, allow_negative_numbers = true)]
    pub weighted: Option<f64>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run_decide(args: DecideArgs) -> Result<()> {
    let config = args.config.load()?;
    let engine = DecisionEngine::new(config.decision);

    let light = engine.decide(args.buy, args.raw, args.weighted);

    match args.format {
        OutputFormat::Json => print_json(&light)?,
        OutputFormat::Text => {
            println!("{} {}", light_badge(&light), light.message);
        }
    }

    Ok(())
}
