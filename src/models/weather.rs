use crate::logic::safety::{classify, SafetyAssessment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TideStatus {
    #[default]
    High,
    Low,
    Rising,
    Falling,
}

impl TideStatus {
    pub const ALL: [TideStatus; 4] = [
        TideStatus::High,
        TideStatus::Low,
        TideStatus::Rising,
        TideStatus::Falling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TideStatus::High => "High",
            TideStatus::Low => "Low",
            TideStatus::Rising => "Rising",
            TideStatus::Falling => "Falling",
        }
    }
}

impl std::fmt::Display for TideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A snapshot of environmental readings at one point in time.
///
/// Fields are private so a sample cannot be edited after construction; the
/// safety verdict is always derived on read and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    condition: String,
    air_temperature_c: f64,
    sea_temperature_c: f64,
    wave_height_m: f64,
    wind_wave_height_m: f64,
    wind_speed_kmh: f64,
    visibility_km: f64,
    humidity_pct: f64,
    pressure_hpa: f64,
    uv_index: u32,
    tide: TideStatus,
}

impl WeatherSample {
    pub fn builder(condition: impl Into<String>) -> WeatherSampleBuilder {
        WeatherSampleBuilder::new(condition)
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn air_temperature_c(&self) -> f64 {
        self.air_temperature_c
    }

    pub fn sea_temperature_c(&self) -> f64 {
        self.sea_temperature_c
    }

    pub fn wave_height_m(&self) -> f64 {
        self.wave_height_m
    }

    pub fn wind_wave_height_m(&self) -> f64 {
        self.wind_wave_height_m
    }

    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_kmh
    }

    pub fn visibility_km(&self) -> f64 {
        self.visibility_km
    }

    pub fn humidity_pct(&self) -> f64 {
        self.humidity_pct
    }

    pub fn pressure_hpa(&self) -> f64 {
        self.pressure_hpa
    }

    pub fn uv_index(&self) -> u32 {
        self.uv_index
    }

    pub fn tide(&self) -> TideStatus {
        self.tide
    }

    pub fn assess(&self) -> SafetyAssessment {
        classify(self)
    }

    pub fn is_safe_for_fishing(&self) -> bool {
        self.assess().overall_safe
    }
}

/// Demo readings used when no live sample is available.
impl Default for WeatherSample {
    fn default() -> Self {
        WeatherSample::builder("Partly Cloudy").build()
    }
}

impl std::fmt::Display for WeatherSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {:.1}°C | waves {:.1}m | wind {:.1} km/h | visibility {:.1} km | safe: {}",
            self.condition,
            self.air_temperature_c,
            self.wave_height_m,
            self.wind_speed_kmh,
            self.visibility_km,
            if self.is_safe_for_fishing() { "yes" } else { "no" }
        )
    }
}

#[derive(Debug, Clone)]
pub struct WeatherSampleBuilder {
    sample: WeatherSample,
}

impl WeatherSampleBuilder {
    fn new(condition: impl Into<String>) -> Self {
        Self {
            sample: WeatherSample {
                condition: condition.into(),
                air_temperature_c: 28.0,
                sea_temperature_c: 26.0,
                wave_height_m: 1.2,
                wind_wave_height_m: 0.6,
                wind_speed_kmh: 15.0,
                visibility_km: 10.0,
                humidity_pct: 78.0,
                pressure_hpa: 1013.0,
                uv_index: 7,
                tide: TideStatus::High,
            },
        }
    }

    pub fn air_temperature_c(mut self, value: f64) -> Self {
        self.sample.air_temperature_c = value;
        self
    }

    pub fn sea_temperature_c(mut self, value: f64) -> Self {
        self.sample.sea_temperature_c = value;
        self
    }

    pub fn wave_height_m(mut self, value: f64) -> Self {
        self.sample.wave_height_m = value.max(0.0);
        self
    }

    pub fn wind_wave_height_m(mut self, value: f64) -> Self {
        self.sample.wind_wave_height_m = value.max(0.0);
        self
    }

    pub fn wind_speed_kmh(mut self, value: f64) -> Self {
        self.sample.wind_speed_kmh = value.max(0.0);
        self
    }

    pub fn visibility_km(mut self, value: f64) -> Self {
        self.sample.visibility_km = value.max(0.0);
        self
    }

    pub fn humidity_pct(mut self, value: f64) -> Self {
        self.sample.humidity_pct = value.clamp(0.0, 100.0);
        self
    }

    pub fn pressure_hpa(mut self, value: f64) -> Self {
        self.sample.pressure_hpa = value;
        self
    }

    pub fn uv_index(mut self, value: u32) -> Self {
        self.sample.uv_index = value;
        self
    }

    pub fn tide(mut self, tide: TideStatus) -> Self {
        self.sample.tide = tide;
        self
    }

    pub fn build(self) -> WeatherSample {
        self.sample
    }
}

/// The three drifting quantities that alert thresholds apply to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineConditions {
    pub wave_height_m: f64,
    pub rainfall_mm: f64,
    pub wind_wave_height_m: f64,
}

impl std::fmt::Display for MarineConditions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wave: {:.1}m | Rain: {:.1}mm | Wind Wave: {:.1}m",
            self.wave_height_m, self.rainfall_mm, self.wind_wave_height_m
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sample_is_safe() {
        let sample = WeatherSample::default();
        assert_eq!(sample.condition(), "Partly Cloudy");
        assert_eq!(sample.tide(), TideStatus::High);
        assert!(sample.is_safe_for_fishing());
    }

    #[test]
    fn verdict_follows_every_field() {
        // The verdict must track whichever field changed, not a cached flag.
        let rough = WeatherSample::builder("Windy").wind_speed_kmh(30.0).build();
        assert!(!rough.is_safe_for_fishing());

        let foggy = WeatherSample::builder("Fog").visibility_km(2.0).build();
        assert!(!foggy.is_safe_for_fishing());

        let swell = WeatherSample::builder("Rough Seas").wave_height_m(3.5).build();
        assert!(!swell.is_safe_for_fishing());
    }

    #[test]
    fn builder_clamps_ranges() {
        let sample = WeatherSample::builder("Clear")
            .humidity_pct(140.0)
            .wave_height_m(-1.0)
            .build();
        assert_eq!(sample.humidity_pct(), 100.0);
        assert_eq!(sample.wave_height_m(), 0.0);
    }

    #[test]
    fn tide_display() {
        assert_eq!(TideStatus::Rising.to_string(), "Rising");
        assert_eq!(TideStatus::ALL.len(), 4);
    }
}
