//! End-to-end runs of the `smart-money` binary over CSV fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const VOLUMES: &str = "\
security_id,date,investor_type,side,volume
TEVA,2024-03-04,F,buy,30
TEVA,2024-03-04,F,sell,70
TEVA,2024-03-05,F,buy,20
TEVA,2024-03-05,P,buy,12.5
TEVA,2024-03-05,F,sell,67.5
TEVA,2024-03-06,F,buy,60
TEVA,2024-03-06,F,sell,200
TEVA,2024-03-06,M,sell,40
LUMI,2024-03-06,F,buy,90
LUMI,2024-03-06,G,sell,10
,2024-03-06,F,buy,10
";

const PRICES: &str = "\
security_id,date,close
TEVA,2024-03-04,41.20
TEVA,2024-03-05,40.10
TEVA,2024-03-06,38.90
";

const SECURITIES: &str = "\
security_id,symbol,company_name
TEVA,TEVA,Teva Pharmaceutical
LUMI,LUMI,Bank Leumi
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("volumes.csv"), VOLUMES).unwrap();
        fs::write(dir.path().join("prices.csv"), PRICES).unwrap();
        fs::write(dir.path().join("securities.csv"), SECURITIES).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_smart-money"))
            .args(args)
            .current_dir(self.dir.path())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "warn")
            .output()
            .unwrap()
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn analyze_emits_json_report() {
    let fx = Fixture::new();
    let (volumes, prices, securities) =
        (fx.path("volumes.csv"), fx.path("prices.csv"), fx.path("securities.csv"));
    let out = fx.run(&[
        "analyze",
        "--volumes",
        arg(&volumes),
        "--prices",
        arg(&prices),
        "--securities",
        arg(&securities),
        "--security",
        "TEVA",
        "--date",
        "2024-03-06",
        "--format",
        "json",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["pattern"]["consecutive_sell_days"], 3);
    assert_eq!(json["pattern"]["has_volume_spike"], true);
    assert_eq!(json["score"]["alert"]["level"], "HIGH");
    assert_eq!(json["buy_light"]["color"], "red");
    assert_eq!(json["info"]["company_name"], "Teva Pharmaceutical");
}

#[test]
fn analyze_text_report() {
    let fx = Fixture::new();
    let (volumes, prices) = (fx.path("volumes.csv"), fx.path("prices.csv"));
    let out = fx.run(&[
        "analyze",
        "--volumes",
        arg(&volumes),
        "--prices",
        arg(&prices),
        "--security",
        "TEVA",
        "--date",
        "2024-03-06",
    ]);

    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Smart Money Report: TEVA"));
    assert!(text.contains("ALERT: HIGH"));
}

#[test]
fn alerts_lists_flagged_securities_first() {
    let fx = Fixture::new();
    let volumes = fx.path("volumes.csv");
    let out = fx.run(&[
        "alerts",
        "--volumes",
        arg(&volumes),
        "--date",
        "2024-03-06",
        "--all",
        "--format",
        "json",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["security_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["TEVA", "LUMI"]);
}

#[test]
fn decide_without_data_is_gray() {
    let fx = Fixture::new();
    let out = fx.run(&["decide", "--buy", "--format", "json"]);

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["color"], "gray");
    assert_eq!(json["label"], "No Data");
}

#[test]
fn config_file_overrides_decision_threshold() {
    let fx = Fixture::new();
    fs::write(fx.path("engine.toml"), "[decision]\nthreshold = 0.1\n").unwrap();
    let config = fx.path("engine.toml");
    let out = fx.run(&[
        "decide",
        "--sell",
        "--raw=-0.2",
        "--config",
        arg(&config),
        "--format",
        "json",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["color"], "green");
}

#[test]
fn missing_volume_file_fails() {
    let fx = Fixture::new();
    let out = fx.run(&["alerts", "--volumes", "nope.csv", "--date", "2024-03-06"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to open CSV file"));
}
