use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_USERNAME: &str = "User";
pub const DEFAULT_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    #[default]
    Comprehensive,
    WeatherConditions,
    SafetyAssessment,
    DailyActivity,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Comprehensive => "Comprehensive Fisheries Report",
            ReportKind::WeatherConditions => "Weather Conditions Report",
            ReportKind::SafetyAssessment => "Safety Assessment Report",
            ReportKind::DailyActivity => "Daily Activity Summary",
        }
    }

    /// Per-kind layout. Weather, marine assessment and recommendations
    /// are gated by `ReportSpec::include_weather` for every kind.
    pub fn sections(&self) -> KindSections {
        match self {
            ReportKind::WeatherConditions => KindSections {
                user_info: false,
                detailed_weather: true,
                activities: false,
            },
            ReportKind::Comprehensive
            | ReportKind::SafetyAssessment
            | ReportKind::DailyActivity => KindSections {
                user_info: true,
                detailed_weather: false,
                activities: true,
            },
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSections {
    pub user_info: bool,
    pub detailed_weather: bool,
    pub activities: bool,
}

/// Parameters for a single report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub kind: ReportKind,
    pub username: String,
    pub location: String,
    pub output_dir: PathBuf,
    pub include_weather: bool,
    pub include_activities: bool,
    pub include_safety: bool,
}

impl ReportSpec {
    pub fn new(kind: ReportKind, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            username: DEFAULT_USERNAME.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            output_dir: output_dir.into(),
            include_weather: true,
            include_activities: true,
            include_safety: true,
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        let trimmed = username.trim();
        self.username = if trimmed.is_empty() {
            DEFAULT_USERNAME.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        let trimmed = location.trim();
        self.location = if trimmed.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    pub fn with_sections(mut self, weather: bool, activities: bool, safety: bool) -> Self {
        self.include_weather = weather;
        self.include_activities = activities;
        self.include_safety = safety;
        self
    }
}
