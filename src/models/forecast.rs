use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily marine forecast series as parallel arrays, one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub wave_height: Vec<f64>,
    pub wind_wave_height: Vec<f64>,
    pub rainfall: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = DailyMarinePoint> + '_ {
        self.dates.iter().enumerate().map(|(i, date)| DailyMarinePoint {
            date: *date,
            wave_height_m: self.wave_height.get(i).copied().unwrap_or(0.0),
            wind_wave_height_m: self.wind_wave_height.get(i).copied().unwrap_or(0.0),
            rainfall_mm: self.rainfall.get(i).copied().unwrap_or(0.0),
        })
    }

    /// Highest wave height in the series, if any.
    pub fn max_wave_height(&self) -> Option<f64> {
        self.wave_height
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn total_rainfall(&self) -> f64 {
        self.rainfall.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMarinePoint {
    pub date: NaiveDate,
    pub wave_height_m: f64,
    pub wind_wave_height_m: f64,
    pub rainfall_mm: f64,
}

impl std::fmt::Display for DailyMarinePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  wave {:.1} m  wind wave {:.1} m  rain {:.1} mm",
            self.date, self.wave_height_m, self.wind_wave_height_m, self.rainfall_mm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> DailySeries {
        DailySeries {
            dates: vec![
                NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            ],
            wave_height: vec![1.4, 2.9],
            wind_wave_height: vec![0.5, 1.1],
            rainfall: vec![0.0, 12.5],
        }
    }

    #[test]
    fn days_zip_parallel_arrays() {
        let days: Vec<_> = series().days().collect();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].wave_height_m, 2.9);
        assert_eq!(days[1].rainfall_mm, 12.5);
    }

    #[test]
    fn aggregates() {
        let s = series();
        assert_eq!(s.max_wave_height(), Some(2.9));
        assert!((s.total_rainfall() - 12.5).abs() < 1e-9);
        assert!(DailySeries::default().max_wave_height().is_none());
    }
}
