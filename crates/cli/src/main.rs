use clap::{Parser, Subcommand};

mod commands;
mod loader;
mod output;

use commands::{AlertsArgs, AnalyzeArgs, DecideArgs};

#[derive(Parser)]
#[command(name = "smart-money")]
#[command(about = "Institutional smart-money flow analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full sentiment, pattern and signal report for one security
    Analyze(AnalyzeArgs),
    /// Rank every security traded on a date by alert level
    Alerts(AlertsArgs),
    /// Traffic light for an intended buy or sell
    Decide(DecideArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(args)?,
        Commands::Alerts(args) => commands::run_alerts(args)?,
        Commands::Decide(args) => commands::run_decide(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_decide_with_negative_sentiment() {
        let cli =
            Cli::try_parse_from(["smart-money", "decide", "--buy", "--weighted", "-0.55"]).unwrap();
        let Commands::Decide(args) = cli.command else {
            panic!("expected decide");
        };
        assert!(args.buy);
        assert_eq!(args.weighted, Some(-0.55));
        assert!(args.raw.is_none());
    }

    #[test]
    fn decide_requires_a_direction() {
        assert!(Cli::try_parse_from(["smart-money", "decide", "--raw", "0.4"]).is_err());
        assert!(Cli::try_parse_from(["smart-money", "decide", "--buy", "--sell"]).is_err());
    }

    #[test]
    fn parses_analyze_date() {
        let cli = Cli::try_parse_from([
            "smart-money",
            "analyze",
            "--volumes",
            "v.csv",
            "--prices",
            "p.csv",
            "--security",
            "IL01",
            "--date",
            "2024-03-06",
        ])
        .unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(args.format, output::OutputFormat::Text);
    }

    #[test]
    fn format_is_case_insensitive() {
        let cli =
            Cli::try_parse_from(["smart-money", "decide", "--sell", "--format", "JSON"]).unwrap();
        let Commands::Decide(args) = cli.command else {
            panic!("expected decide");
        };
        assert_eq!(args.format, output::OutputFormat::Json);

        let result = Cli::try_parse_from(["smart-money", "decide", "--sell", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_and_profile_conflict() {
        let result = Cli::try_parse_from([
            "smart-money",
            "decide",
            "--sell",
            "--config",
            "a.toml",
            "--profile",
            "prod",
        ]);
        assert!(result.is_err());
    }
}
