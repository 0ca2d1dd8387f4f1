use crate::models::{AlertKind, AlertMessage, AlertReport, AlertSeverity, MarineConditions};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fraction of a threshold above which a reading counts toward `Caution`.
pub const CAUTION_FRACTION: f64 = 0.7;

pub const POSITIVE_UPDATES: [&str; 2] = [
    "Excellent fishing conditions - Perfect weather",
    "Mild weather conditions - Good for fishing",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub wave_m: f64,
    pub rainfall_mm: f64,
    pub wind_wave_m: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            wave_m: 3.0,
            rainfall_mm: 10.0,
            wind_wave_m: 2.5,
        }
    }
}

/// How one reading sits relative to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Exceedance {
    Under,
    Near,
    Over,
}

impl Exceedance {
    fn of(value: f64, threshold: f64) -> Self {
        if value > threshold {
            Exceedance::Over
        } else if value > threshold * CAUTION_FRACTION {
            Exceedance::Near
        } else {
            Exceedance::Under
        }
    }
}

struct ThresholdRule {
    kind: AlertKind,
    read: fn(&MarineConditions) -> f64,
    limit: fn(&AlertThresholds) -> f64,
    describe: fn(f64) -> String,
}

fn wave_height(c: &MarineConditions) -> f64 {
    c.wave_height_m
}

fn rainfall(c: &MarineConditions) -> f64 {
    c.rainfall_mm
}

fn wind_wave_height(c: &MarineConditions) -> f64 {
    c.wind_wave_height_m
}

fn wave_limit(t: &AlertThresholds) -> f64 {
    t.wave_m
}

fn rainfall_limit(t: &AlertThresholds) -> f64 {
    t.rainfall_mm
}

fn wind_wave_limit(t: &AlertThresholds) -> f64 {
    t.wind_wave_m
}

fn describe_waves(v: f64) -> String {
    format!("HIGH WAVES: {:.1}m - Exercise extreme caution!", v)
}

fn describe_rain(v: f64) -> String {
    format!("HEAVY RAIN: {:.1}mm - Check equipment and visibility!", v)
}

fn describe_wind_waves(v: f64) -> String {
    format!(
        "STRONG WINDS: {:.1}m wind waves - Consider postponing trips!",
        v
    )
}

// Evaluation order is the order alerts are reported in.
const RULES: [ThresholdRule; 3] = [
    ThresholdRule {
        kind: AlertKind::HighWaves,
        read: wave_height,
        limit: wave_limit,
        describe: describe_waves,
    },
    ThresholdRule {
        kind: AlertKind::HeavyRain,
        read: rainfall,
        limit: rainfall_limit,
        describe: describe_rain,
    },
    ThresholdRule {
        kind: AlertKind::StrongWindWaves,
        read: wind_wave_height,
        limit: wind_wave_limit,
        describe: describe_wind_waves,
    },
];

#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    thresholds: AlertThresholds,
    positive_probability: f64,
}

impl AlertEvaluator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            positive_probability: 0.1,
        }
    }

    /// Chance of a positive update when nothing is alerting; 0 disables it.
    pub fn with_positive_probability(mut self, probability: f64) -> Self {
        self.positive_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn evaluate(&self, conditions: &MarineConditions) -> AlertReport {
        let mut alerts = Vec::new();
        let mut worst = Exceedance::Under;
        let mut all_clear = true;

        for rule in &RULES {
            let value = (rule.read)(conditions);
            let threshold = (rule.limit)(&self.thresholds);
            let exceedance = Exceedance::of(value, threshold);

            if exceedance == Exceedance::Over {
                alerts.push(AlertMessage {
                    kind: rule.kind,
                    value,
                    threshold,
                    message: (rule.describe)(value),
                });
            }
            if value >= threshold {
                all_clear = false;
            }
            worst = worst.max(exceedance);
        }

        let severity = match worst {
            Exceedance::Over => AlertSeverity::Danger,
            Exceedance::Near => AlertSeverity::Caution,
            Exceedance::Under => AlertSeverity::Safe,
        };

        AlertReport {
            severity,
            alerts,
            all_clear,
        }
    }

    /// Occasionally pick a positive message when no alert fired.
    pub fn positive_update<R: Rng>(
        &self,
        report: &AlertReport,
        rng: &mut R,
    ) -> Option<&'static str> {
        if report.has_alerts() || self.positive_probability <= 0.0 {
            return None;
        }
        if !rng.gen_bool(self.positive_probability) {
            return None;
        }
        POSITIVE_UPDATES.choose(rng).copied()
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}
