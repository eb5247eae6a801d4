//! Analyze one security on one date.

use super::{build_engine, ConfigArgs};
use crate::output::{alert_badge, light_badge, print_json, OutputFormat};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Volume CSV (security_id,date,investor_type,side,volume)
    #[arg(long)]
    pub volumes: PathBuf,

    /// Closing price CSV (security_id,date,close)
    #[arg(long)]
    pub prices: PathBuf,

    /// Security identifier
    #[arg(long)]
    pub security: String,

    /// Analysis date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Security reference CSV (security_id,symbol,company_name)
    #[arg(long)]
    pub securities: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = args.config.load()?;
    let engine = build_engine(
        &args.volumes,
        Some(&args.prices),
        args.securities.as_deref(),
        config,
    )?;

    let report = engine
        .analyze(&args.security, args.date)
        .with_context(|| format!("Failed to analyze {} on {}", args.security, args.date))?;

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            print!("{}", report.to_text());
            println!();
            println!(
                "{}  buy {}  sell {}",
                alert_badge(report.score.alert.level),
                light_badge(&report.buy_light),
                light_badge(&report.sell_light)
            );
        }
    }

    Ok(())
}
