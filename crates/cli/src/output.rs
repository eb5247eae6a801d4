//! Output formatting shared by the commands.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use smart_money_signals::{AlertLevel, LightColor, TrafficLight};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[value(alias = "txt")]
    Text,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Traffic-light badge, e.g. ` RECONSIDER ` on red.
pub fn light_badge(light: &TrafficLight) -> ColoredString {
    let text = format!(" {} ", light.label.to_uppercase());
    match light.color {
        LightColor::Green => text.white().on_green().bold(),
        LightColor::Yellow => text.black().on_yellow().bold(),
        LightColor::Red => text.white().on_red().bold(),
        LightColor::Gray => text.white().on_bright_black().bold(),
    }
}

pub fn alert_badge(level: AlertLevel) -> ColoredString {
    let text = format!(" {level} ");
    match level {
        AlertLevel::High => text.white().on_red().bold(),
        AlertLevel::Medium => text.black().on_yellow().bold(),
        AlertLevel::Bullish => text.white().on_green().bold(),
        AlertLevel::Clear => text.normal(),
    }
}
