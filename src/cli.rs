use clap::{ArgAction, Args, Parser, Subcommand};
use metagame_config::{Format, Overrides};
use std::path::PathBuf;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, ISO_DATE).map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}

#[derive(Debug, Parser)]
#[command(name = "metagame", version, about = "Archetype clustering for Netrunner tournament decklists")]
pub struct Cli {
    /// Config file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "METAGAME_CONFIG")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect top decks, cluster them and write a markdown report
    Report(ReportArgs),
    /// Show what the local cache holds
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Output file [default: rwr_<today>.md]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// First event date to include (inclusive)
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<Date>,
    /// Last event date to include (inclusive)
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<Date>,
    /// Tournament format to collect decks for
    #[arg(long)]
    pub format: Option<Format>,
    /// Percentage of each tournament's standings to collect (0-100)
    #[arg(long)]
    pub percentage: Option<i64>,
    /// DBSCAN neighbourhood radius
    #[arg(long)]
    pub eps: Option<f64>,
    /// Minimum number of decks to form a cluster
    #[arg(long)]
    pub min_samples: Option<usize>,
    /// Number of cards listed per cluster
    #[arg(long)]
    pub top_cards: Option<usize>,
    /// Tournaments processed concurrently
    #[arg(long)]
    pub workers: Option<usize>,
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
impl ReportArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cache_dir: self.cache_dir.clone(),
            format: self.format,
            start_date: self.start_date,
            end_date: self.end_date,
            percentage: self.percentage,
            eps: self.eps,
            min_samples: self.min_samples,
            top_cards: self.top_cards,
            workers: self.workers,
        }
    }

    pub fn output(&self, today: Date) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("rwr_{}.md", today.format(ISO_DATE).unwrap_or_default())),
        }
    }
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}
impl StatsArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cache_dir: self.cache_dir.clone(),
            ..Overrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use time::macros::date;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_flags() {
        let cli = Cli::try_parse_from([
            "metagame",
            "-vv",
            "report",
            "--start-date",
            "2024-01-01",
            "--format",
            "startup",
            "--percentage",
            "25",
            "--eps",
            "5.5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Report(args) = cli.command else {
            panic!("expected the report command");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.start_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(overrides.format, Some(Format::Startup));
        assert_eq!(overrides.percentage, Some(25));
        assert_eq!(overrides.eps, Some(5.5));
        assert_eq!(overrides.end_date, None);
        assert_eq!(args.output(date!(2024 - 06 - 30)), PathBuf::from("rwr_2024-06-30.md"));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["metagame", "report", "--start-date", "18/03/2024"]).is_err());
        assert!(Cli::try_parse_from(["metagame", "report", "--format", "eternal"]).is_err());
    }

    #[test]
    fn test_stats() {
        let cli = Cli::try_parse_from(["metagame", "stats", "--cache-dir", "/tmp/cache", "--config", "m.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("m.toml")));
        let Command::Stats(args) = cli.command else {
            panic!("expected the stats command");
        };
        assert_eq!(args.overrides().cache_dir, Some(PathBuf::from("/tmp/cache")));
    }
}
