//! CLI argument parsing for pubstats

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::report;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// How impact labels are folded into the `Other` bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Grouping {
    /// Fold labels whose combined count falls below --threshold (default)
    Threshold,
    /// Fold exactly the labels given via --other-impacts
    Manual,
}

/// Version whose counts order the chart slices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortVersion {
    /// Order by v1.0 counts (default)
    V1,
    /// Order by v2.0 counts
    V2,
}

/// Placement of the `Other` bucket in the chart ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OtherPosition {
    /// Always last (default)
    End,
    /// Wherever its count puts it
    Natural,
}

/// Chart geometry for the impacts chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartType {
    /// One pie per version (default)
    Pie,
    /// Grouped bars of percentages
    Bar,
}

/// Rendering style for pie charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartStyle {
    /// Solid pie
    Pie,
    /// Donut with the sample size in the hole (default)
    Donut,
}

impl From<ChartStyle> for report::ChartStyle {
    fn from(style: ChartStyle) -> Self {
        match style {
            ChartStyle::Pie => Self::Pie,
            ChartStyle::Donut => Self::Donut,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pubstats")]
#[command(version)]
#[command(about = "Statistics for publication timelines, reader feedback, and comment impacts", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publication timeline statistics from the pubs export
    Pubs(PubsArgs),
    /// Reader feedback survey analysis with per-question independence tests
    Feedback(FeedbackArgs),
    /// Reader comment impact tallies with rare-label grouping and charts
    Impacts(ImpactsArgs),
    /// Readability metrics for an article fetched from a URL
    Readability(ReadabilityArgs),
}

#[derive(Args, Debug)]
pub struct PubsArgs {
    /// Publication export CSV
    pub csv: PathBuf,

    /// Earlier export; its v2.0 rows mark the initial cohort for the
    /// over-time comparison
    #[arg(long, value_name = "CSV")]
    pub baseline: Option<PathBuf>,

    /// Write per-version completed-workdays histograms to this SVG file
    #[arg(long, value_name = "SVG")]
    pub histogram: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct FeedbackArgs {
    /// Feedback survey export CSV
    pub csv: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ImpactsArgs {
    /// Comment impact export CSV
    pub csv: PathBuf,

    /// How labels fold into the Other bucket
    #[arg(long, value_enum, default_value = "threshold")]
    pub grouping: Grouping,

    /// Minimum combined count for a label to stay out of Other
    #[arg(long, value_name = "COUNT", default_value = "10")]
    pub threshold: usize,

    /// Labels to fold into Other in manual mode
    #[arg(
        long = "other-impacts",
        value_name = "LABEL",
        value_delimiter = ','
    )]
    pub other_impacts: Vec<String>,

    /// Version whose counts order the chart slices
    #[arg(long = "sort-version", value_enum, default_value = "v1")]
    pub sort_version: SortVersion,

    /// Placement of the Other bucket in the chart ordering
    #[arg(long = "other-position", value_enum, default_value = "end")]
    pub other_position: OtherPosition,

    /// Chart geometry
    #[arg(long = "chart-type", value_enum, default_value = "pie")]
    pub chart_type: ChartType,

    /// Pie rendering style
    #[arg(long = "chart-style", value_enum, default_value = "donut")]
    pub chart_style: ChartStyle,

    /// Write the impact chart to this SVG file
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// Article URL
    pub url: String,

    /// Skip the robots.txt check
    #[arg(long = "skip-robots")]
    pub skip_robots: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_pubs_with_options() {
        let cli = Cli::parse_from([
            "pubstats",
            "pubs",
            "pubs.csv",
            "--baseline",
            "earlier.csv",
            "--histogram",
            "workdays.svg",
        ]);
        let Commands::Pubs(args) = cli.command else {
            panic!("expected pubs subcommand");
        };
        assert_eq!(args.csv, PathBuf::from("pubs.csv"));
        assert_eq!(args.baseline, Some(PathBuf::from("earlier.csv")));
        assert_eq!(args.histogram, Some(PathBuf::from("workdays.svg")));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_pubs_json_format() {
        let cli = Cli::parse_from(["pubstats", "pubs", "pubs.csv", "--format", "json"]);
        let Commands::Pubs(args) = cli.command else {
            panic!("expected pubs subcommand");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_impacts_defaults() {
        let cli = Cli::parse_from(["pubstats", "impacts", "impacts.csv"]);
        let Commands::Impacts(args) = cli.command else {
            panic!("expected impacts subcommand");
        };
        assert_eq!(args.grouping, Grouping::Threshold);
        assert_eq!(args.threshold, 10);
        assert!(args.other_impacts.is_empty());
        assert_eq!(args.sort_version, SortVersion::V1);
        assert_eq!(args.other_position, OtherPosition::End);
        assert_eq!(args.chart_type, ChartType::Pie);
        assert_eq!(args.chart_style, ChartStyle::Donut);
        assert!(args.chart.is_none());
    }

    #[test]
    fn test_cli_impacts_manual_grouping_list() {
        let cli = Cli::parse_from([
            "pubstats",
            "impacts",
            "impacts.csv",
            "--grouping",
            "manual",
            "--other-impacts",
            "No real impact,Typo/small error",
        ]);
        let Commands::Impacts(args) = cli.command else {
            panic!("expected impacts subcommand");
        };
        assert_eq!(args.grouping, Grouping::Manual);
        assert_eq!(
            args.other_impacts,
            vec!["No real impact", "Typo/small error"]
        );
    }

    #[test]
    fn test_cli_readability_skip_robots() {
        let cli = Cli::parse_from([
            "pubstats",
            "readability",
            "https://example.com/article",
            "--skip-robots",
        ]);
        let Commands::Readability(args) = cli.command else {
            panic!("expected readability subcommand");
        };
        assert_eq!(args.url, "https://example.com/article");
        assert!(args.skip_robots);
    }

    #[test]
    fn test_cli_debug_flag_is_global() {
        let cli = Cli::parse_from(["pubstats", "feedback", "feedback.csv", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_debug_default_false() {
        let cli = Cli::parse_from(["pubstats", "feedback", "feedback.csv"]);
        assert!(!cli.debug);
    }
}
