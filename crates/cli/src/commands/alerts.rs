//! Portfolio-wide alert scan for one date.

use super::{build_engine, ConfigArgs};
use crate::output::{alert_badge, print_json, OutputFormat};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use smart_money_signals::{alert_table, AlertLevel};
use std::path::PathBuf;

/// Arguments for the alerts command.
#[derive(Args, Debug, Clone)]
pub struct AlertsArgs {
    /// Volume CSV (security_id,date,investor_type,side,volume)
    #[arg(long)]
    pub volumes: PathBuf,

    /// Closing price CSV; outcome statistics are empty without it
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Scan date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Security reference CSV (security_id,symbol,company_name)
    #[arg(long)]
    pub securities: Option<PathBuf>,

    /// Include securities with a CLEAR alert
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run_alerts(args: AlertsArgs) -> Result<()> {
    let config = args.config.load()?;
    let engine = build_engine(
        &args.volumes,
        args.prices.as_deref(),
        args.securities.as_deref(),
        config,
    )?;

    let mut reports = engine.alerts_on(args.date)?;
    if !args.all {
        reports.retain(|r| r.score.alert.level != AlertLevel::Clear);
    }

    match args.format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            println!("=== Smart Money Alerts: {} ===\n", args.date);
            if reports.is_empty() {
                println!("No alerts.");
                return Ok(());
            }
            print!("{}", alert_table(&reports, true));
            println!();
            for level in [AlertLevel::High, AlertLevel::Medium, AlertLevel::Bullish] {
                let count = reports.iter().filter(|r| r.score.alert.level == level).count();
                if count > 0 {
                    println!("{} {count}", alert_badge(level));
                }
            }
        }
    }

    Ok(())
}
