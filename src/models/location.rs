use crate::error::{FishOpsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FishOpsError::InvalidCoordinateInput(format!(
                "latitude {} out of range",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FishOpsError::InvalidCoordinateInput(format!(
                "longitude {} out of range",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse free-text latitude/longitude fields.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        let lat = latitude.trim().parse::<f64>().map_err(|_| {
            FishOpsError::InvalidCoordinateInput(format!("latitude '{}' is not a number", latitude))
        })?;
        let lon = longitude.trim().parse::<f64>().map_err(|_| {
            FishOpsError::InvalidCoordinateInput(format!(
                "longitude '{}' is not a number",
                longitude
            ))
        })?;
        Self::new(lat, lon)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self {
            latitude: 6.05,
            longitude: 80.21,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// Preset fishing grounds along the Sri Lankan coast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishingArea {
    Negombo,
    Chilaw,
    Trincomalee,
    Galle,
    Mirissa,
    Kalpitiya,
}

impl FishingArea {
    pub const ALL: [FishingArea; 6] = [
        FishingArea::Negombo,
        FishingArea::Chilaw,
        FishingArea::Trincomalee,
        FishingArea::Galle,
        FishingArea::Mirissa,
        FishingArea::Kalpitiya,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FishingArea::Negombo => "Negombo",
            FishingArea::Chilaw => "Chilaw",
            FishingArea::Trincomalee => "Trincomalee",
            FishingArea::Galle => "Galle",
            FishingArea::Mirissa => "Mirissa",
            FishingArea::Kalpitiya => "Kalpitiya",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|area| area.as_str().to_lowercase() == wanted)
    }

    pub fn coordinates(&self) -> Coordinates {
        let (latitude, longitude) = match self {
            FishingArea::Negombo => (7.21, 79.84),
            FishingArea::Chilaw => (7.58, 79.80),
            FishingArea::Trincomalee => (8.59, 81.21),
            FishingArea::Galle => (6.03, 80.22),
            FishingArea::Mirissa => (5.95, 80.46),
            FishingArea::Kalpitiya => (8.23, 79.77),
        };
        Coordinates {
            latitude,
            longitude,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{}, Sri Lanka", self.as_str())
    }
}

impl std::fmt::Display for FishingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
