//! CSV input loading.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use smart_money_core::{PriceHistory, PricePoint, RawVolumeRecord, SecurityInfo, TradeSide};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct VolumeRow {
    security_id: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    date: Option<NaiveDate>,
    investor_type: String,
    side: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    security_id: String,
    date: NaiveDate,
    close: String,
}

fn parse_side(side: &str) -> Option<TradeSide> {
    match side.trim().to_ascii_lowercase().as_str() {
        "buy" | "b" => Some(TradeSide::Buy),
        "sell" | "s" => Some(TradeSide::Sell),
        _ => None,
    }
}

/// Reads `security_id,date,investor_type,side,volume` rows.
///
/// Blank or unparseable ids, dates and volumes are passed through for the
/// aggregator to drop. Rows with an unknown side are skipped here.
pub fn read_volumes<R: Read>(reader: R) -> Result<Vec<RawVolumeRecord>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (line, row) in csv.deserialize::<VolumeRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse volume row {}", line + 2))?;
        let Some(side) = parse_side(&row.side) else {
            tracing::warn!(row = line + 2, side = %row.side, "skipping row with unknown side");
            continue;
        };
        records.push(RawVolumeRecord {
            security_id: row.security_id,
            date: row.date,
            investor_type: row.investor_type,
            side,
            volume: row.volume.unwrap_or(f64::NAN),
        });
    }

    tracing::debug!(rows = records.len(), "loaded volume rows");
    Ok(records)
}

/// Reads `security_id,date,close` rows.
pub fn read_prices<R: Read>(reader: R) -> Result<PriceHistory> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut history = PriceHistory::new();

    for (line, row) in csv.deserialize::<PriceRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse price row {}", line + 2))?;
        let close = Decimal::from_str(&row.close)
            .with_context(|| format!("Invalid close price '{}' on row {}", row.close, line + 2))?;
        history.insert(row.security_id, PricePoint { date: row.date, close });
    }

    tracing::debug!(securities = history.security_count(), "loaded price history");
    Ok(history)
}

/// Reads `security_id,symbol,company_name` rows.
pub fn read_securities<R: Read>(reader: R) -> Result<Vec<SecurityInfo>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv.deserialize()
        .collect::<Result<Vec<SecurityInfo>, _>>()
        .context("Failed to parse securities CSV")
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))
}

pub fn load_volumes(path: &Path) -> Result<Vec<RawVolumeRecord>> {
    read_volumes(open(path)?)
}

pub fn load_prices(path: &Path) -> Result<PriceHistory> {
    read_prices(open(path)?)
}

pub fn load_securities(path: &Path) -> Result<Vec<SecurityInfo>> {
    read_securities(open(path)?)
}
