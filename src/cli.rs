use crate::logic::report::default_activities;
use crate::models::ReportKind;
use crate::render::OutputFormat;
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fishops",
    version,
    about = "Marine weather safety, alerts and reports for fishers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test the weather service
    Check,
    /// Show the daily marine forecast for a location
    Weather(LocationArgs),
    /// Watch simulated conditions and the remote forecast, printing alerts
    Monitor {
        /// Stop after this many timer firings
        #[arg(long)]
        ticks: Option<u64>,

        /// Skip the remote forecast and only run the simulation
        #[arg(long)]
        offline: bool,

        /// Seed for the simulated feed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Ask the fisheries assistant a question (interactive when omitted)
    Chat {
        question: Option<String>,
    },
    /// Generate a report file
    Report(ReportArgs),
    /// List the preset fishing areas
    Areas,
}

#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Preset fishing area (see `fishops areas`)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub area: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<String>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long, value_enum, default_value_t = KindArg::Comprehensive)]
    pub kind: KindArg,

    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    pub format: FormatArg,

    #[arg(long)]
    pub username: Option<String>,

    /// Location label printed on the report
    #[arg(long)]
    pub location: Option<String>,

    /// Directory to write into (default: Documents/Fisheries_Reports)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub no_weather: bool,

    #[arg(long)]
    pub no_activities: bool,

    #[arg(long)]
    pub no_safety: bool,

    /// Activity to list on the report (repeatable)
    #[arg(long = "activity", value_name = "TEXT")]
    pub activities: Vec<String>,

    /// Leave out the generated activity entries
    #[arg(long)]
    pub no_default_activities: bool,

    /// Print a text preview instead of writing a file
    #[arg(long)]
    pub preview: bool,

    #[command(flatten)]
    pub sample: SampleArgs,
}

impl ReportArgs {
    /// Generated entries (unless disabled) followed by any `--activity` lines.
    pub fn activity_lines(&self, now: DateTime<Local>) -> Vec<String> {
        let mut lines = if self.no_default_activities {
            Vec::new()
        } else {
            default_activities(now)
        };
        lines.extend(
            self.activities
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .map(String::from),
        );
        lines
    }
}

/// Overrides for the demo weather sample used in reports.
#[derive(Args, Debug, Clone, Default)]
pub struct SampleArgs {
    #[arg(long)]
    pub condition: Option<String>,

    /// Wave height in metres
    #[arg(long)]
    pub wave: Option<f64>,

    /// Wind speed in km/h
    #[arg(long)]
    pub wind: Option<f64>,

    /// Visibility in km
    #[arg(long)]
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Comprehensive,
    Weather,
    Safety,
    Daily,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Comprehensive => ReportKind::Comprehensive,
            KindArg::Weather => ReportKind::WeatherConditions,
            KindArg::Safety => ReportKind::SafetyAssessment,
            KindArg::Daily => ReportKind::DailyActivity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Pdf,
    Txt,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Txt => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::parse_from([
            "fishops",
            "report",
            "--kind",
            "weather",
            "--format",
            "txt",
            "--wave",
            "3.2",
            "--no-activities",
        ]);
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(ReportKind::from(args.kind), ReportKind::WeatherConditions);
                assert_eq!(OutputFormat::from(args.format), OutputFormat::Text);
                assert_eq!(args.sample.wave, Some(3.2));
                assert!(args.no_activities);
                assert!(!args.no_safety);
            }
            _ => panic!("expected report command"),
        }
    }

    fn report_args(args: &[&str]) -> ReportArgs {
        let argv = ["fishops", "report"].iter().chain(args.iter()).copied();
        match Cli::parse_from(argv).command {
            Commands::Report(args) => args,
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn activities_can_be_replaced_or_emptied() {
        let now = Local::now();

        let args = report_args(&[
            "--no-default-activities",
            "--activity",
            "Mended nets",
            "--activity",
            "Sold catch",
        ]);
        assert_eq!(args.activity_lines(now), vec!["Mended nets", "Sold catch"]);

        let args = report_args(&["--no-default-activities"]);
        assert!(args.activity_lines(now).is_empty());

        let args = report_args(&["--activity", "Fuelled boat"]);
        let lines = args.activity_lines(now);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.last().map(String::as_str), Some("Fuelled boat"));
    }

    #[test]
    fn emptied_activities_reach_the_placeholder() {
        use crate::logic::report::{ReportComposer, NO_ACTIVITIES};
        use crate::models::{ReportSpec, SectionKind, WeatherSample};

        let args = report_args(&["--no-default-activities"]);
        let now = Local::now();
        let spec = ReportSpec::new(args.kind.into(), "/tmp/reports");
        let doc = ReportComposer::compose(
            &spec,
            &WeatherSample::default(),
            &args.activity_lines(now),
            now,
        );
        let section = doc.section(SectionKind::Activities).unwrap();
        assert_eq!(section.paragraphs().next().unwrap().content, NO_ACTIVITIES);
    }

    #[test]
    fn negative_longitude_is_accepted() {
        let cli = Cli::parse_from(["fishops", "weather", "--lat", "6.05", "--lon", "-80.2"]);
        match cli.command {
            Commands::Weather(loc) => assert_eq!(loc.lon.as_deref(), Some("-80.2")),
            _ => panic!("expected weather command"),
        }
    }

    #[test]
    fn area_conflicts_with_coordinates() {
        let result =
            Cli::try_parse_from(["fishops", "weather", "--area", "galle", "--lat", "6.0", "--lon", "80.0"]);
        assert!(result.is_err());
    }
}
