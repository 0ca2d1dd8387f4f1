use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    HighWaves,
    HeavyRain,
    StrongWindWaves,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::HighWaves => "High Waves",
            AlertKind::HeavyRain => "Heavy Rain",
            AlertKind::StrongWindWaves => "Strong Winds",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-level classification derived from how close each reading is to its
/// alert threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    #[default]
    Safe,
    Caution,
    Danger,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Safe => "Safe",
            AlertSeverity::Caution => "Caution",
            AlertSeverity::Danger => "Danger",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            AlertSeverity::Safe => "Safe for Fishing",
            AlertSeverity::Caution => "Use Caution",
            AlertSeverity::Danger => "Dangerous Conditions",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AlertSeverity::Safe => "✓",
            AlertSeverity::Caution => "⚠",
            AlertSeverity::Danger => "!",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
}

impl std::fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    pub severity: AlertSeverity,
    pub alerts: Vec<AlertMessage>,
    /// True when every quantity is strictly below its threshold.
    pub all_clear: bool,
}

impl AlertReport {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}
