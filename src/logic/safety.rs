use crate::models::WeatherSample;
use serde::{Deserialize, Serialize};

pub const MAX_SAFE_WAVE_M: f64 = 3.0;
pub const MAX_SAFE_WIND_KMH: f64 = 25.0;
pub const MIN_SAFE_VISIBILITY_KM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaveStatus {
    Good,
    Moderate,
    Poor,
}

impl WaveStatus {
    pub fn from_height(wave_height_m: f64) -> Self {
        if wave_height_m < 1.5 {
            WaveStatus::Good
        } else if wave_height_m < 2.5 {
            WaveStatus::Moderate
        } else {
            WaveStatus::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaveStatus::Good => "Good",
            WaveStatus::Moderate => "Moderate",
            WaveStatus::Poor => "Poor",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            WaveStatus::Good => "Ideal for all boats",
            WaveStatus::Moderate => "Suitable for larger boats",
            WaveStatus::Poor => "Small boats avoid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindStatus {
    Safe,
    Moderate,
    High,
}

impl WindStatus {
    pub fn from_speed(wind_speed_kmh: f64) -> Self {
        if wind_speed_kmh < 15.0 {
            WindStatus::Safe
        } else if wind_speed_kmh < 25.0 {
            WindStatus::Moderate
        } else {
            WindStatus::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindStatus::Safe => "Safe",
            WindStatus::Moderate => "Moderate",
            WindStatus::High => "High",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            WindStatus::Safe => "Excellent conditions",
            WindStatus::Moderate => "Exercise caution",
            WindStatus::High => "Consider postponing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisibilityStatus {
    Excellent,
    Good,
    Poor,
}

impl VisibilityStatus {
    pub fn from_distance(visibility_km: f64) -> Self {
        if visibility_km > 8.0 {
            VisibilityStatus::Excellent
        } else if visibility_km > 5.0 {
            VisibilityStatus::Good
        } else {
            VisibilityStatus::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityStatus::Excellent => "Excellent",
            VisibilityStatus::Good => "Good",
            VisibilityStatus::Poor => "Poor",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            VisibilityStatus::Excellent => "Clear navigation",
            VisibilityStatus::Good => "Good for fishing",
            VisibilityStatus::Poor => "Use navigation aids",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub overall_safe: bool,
    pub wave: WaveStatus,
    pub wind: WindStatus,
    pub visibility: VisibilityStatus,
}

/// Classify a sample against the fixed fishing-safety thresholds.
///
/// Total over finite inputs; callers are responsible for valid ranges.
pub fn classify(sample: &WeatherSample) -> SafetyAssessment {
    let overall_safe = sample.wave_height_m() < MAX_SAFE_WAVE_M
        && sample.wind_speed_kmh() < MAX_SAFE_WIND_KMH
        && sample.visibility_km() > MIN_SAFE_VISIBILITY_KM;

    SafetyAssessment {
        overall_safe,
        wave: WaveStatus::from_height(sample.wave_height_m()),
        wind: WindStatus::from_speed(sample.wind_speed_kmh()),
        visibility: VisibilityStatus::from_distance(sample.visibility_km()),
    }
}
