use crate::models::{MarineConditions, TideStatus, WeatherSample};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const CONDITIONS: [&str; 9] = [
    "Clear",
    "Partly Cloudy",
    "Cloudy",
    "Light Rain",
    "Heavy Rain",
    "Thunderstorm",
    "Windy",
    "Calm",
    "Rough Seas",
];

const WAVE_STEP_M: f64 = 0.25;
const WAVE_RANGE_M: (f64, f64) = (0.1, 5.0);
const RAIN_STEP_MM: f64 = 1.0;
const RAIN_RANGE_MM: (f64, f64) = (0.0, 50.0);
const WIND_WAVE_STEP_M: f64 = 0.15;
const WIND_WAVE_RANGE_M: (f64, f64) = (0.1, 4.0);

/// Drifting marine values carried across simulation steps.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertState {
    pub wave_height_m: f64,
    pub rainfall_mm: f64,
    pub wind_wave_height_m: f64,
    pub condition: &'static str,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            wave_height_m: 0.0,
            rainfall_mm: 0.0,
            wind_wave_height_m: 0.0,
            condition: CONDITIONS[1],
        }
    }
}

impl AlertState {
    pub fn conditions(&self) -> MarineConditions {
        MarineConditions {
            wave_height_m: self.wave_height_m,
            rainfall_mm: self.rainfall_mm,
            wind_wave_height_m: self.wind_wave_height_m,
        }
    }
}

fn walk<R: Rng>(rng: &mut R, value: f64, step: f64, (lo, hi): (f64, f64)) -> f64 {
    (value + rng.gen_range(-step..=step)).clamp(lo, hi)
}

/// Random-walk weather source standing in for live sensors.
///
/// Owns its `AlertState`; only the task holding the feed mutates it.
#[derive(Debug)]
pub struct SimulatedFeed {
    state: AlertState,
    rng: StdRng,
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self {
            state: AlertState::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: AlertState::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Advance the walk one step and sample a full reading from it.
    pub fn step(&mut self) -> (MarineConditions, WeatherSample) {
        let rng = &mut self.rng;
        self.state.wave_height_m = walk(rng, self.state.wave_height_m, WAVE_STEP_M, WAVE_RANGE_M);
        self.state.rainfall_mm = walk(rng, self.state.rainfall_mm, RAIN_STEP_MM, RAIN_RANGE_MM);
        self.state.wind_wave_height_m = walk(
            rng,
            self.state.wind_wave_height_m,
            WIND_WAVE_STEP_M,
            WIND_WAVE_RANGE_M,
        );
        self.state.condition = CONDITIONS.choose(rng).copied().unwrap_or(CONDITIONS[0]);

        let tide = TideStatus::ALL
            .choose(rng)
            .copied()
            .unwrap_or_default();

        let sample = WeatherSample::builder(self.state.condition)
            .air_temperature_c(rng.gen_range(25..=34) as f64)
            .sea_temperature_c(rng.gen_range(24..=29) as f64)
            .wind_speed_kmh(rng.gen_range(8..=27) as f64)
            .visibility_km(rng.gen_range(5..=14) as f64)
            .humidity_pct(rng.gen_range(60..=89) as f64)
            .pressure_hpa(rng.gen_range(1005..=1024) as f64)
            .uv_index(rng.gen_range(3..=10))
            .tide(tide)
            .wave_height_m(self.state.wave_height_m)
            .wind_wave_height_m(self.state.wind_wave_height_m)
            .build();

        tracing::trace!(
            wave = self.state.wave_height_m,
            rain = self.state.rainfall_mm,
            wind_wave = self.state.wind_wave_height_m,
            condition = self.state.condition,
            "feed stepped"
        );

        (self.state.conditions(), sample)
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero() {
        let feed = SimulatedFeed::with_seed(3);
        assert_eq!(feed.state().conditions(), MarineConditions::default());
    }

    #[test]
    fn first_step_lifts_waves_to_floor() {
        let mut feed = SimulatedFeed::with_seed(3);
        let (conditions, _) = feed.step();
        assert!(conditions.wave_height_m >= 0.1);
        assert!(conditions.wind_wave_height_m >= 0.1);
    }

    #[test]
    fn sample_tracks_walked_values() {
        let mut feed = SimulatedFeed::with_seed(11);
        for _ in 0..10 {
            let (conditions, sample) = feed.step();
            assert_eq!(sample.wave_height_m(), conditions.wave_height_m);
            assert_eq!(sample.wind_wave_height_m(), conditions.wind_wave_height_m);
            assert!(CONDITIONS.contains(&sample.condition()));
            assert!((8.0..=27.0).contains(&sample.wind_speed_kmh()));
            assert!((5.0..=14.0).contains(&sample.visibility_km()));
            assert!((3..=10).contains(&sample.uv_index()));
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = SimulatedFeed::with_seed(99);
        let mut b = SimulatedFeed::with_seed(99);
        for _ in 0..5 {
            assert_eq!(a.step(), b.step());
        }
    }

    proptest! {
        #[test]
        fn walk_stays_inside_clamps(seed in any::<u64>(), steps in 1usize..300) {
            let mut feed = SimulatedFeed::with_seed(seed);
            for _ in 0..steps {
                let (c, _) = feed.step();
                prop_assert!((0.1..=5.0).contains(&c.wave_height_m));
                prop_assert!((0.0..=50.0).contains(&c.rainfall_mm));
                prop_assert!((0.1..=4.0).contains(&c.wind_wave_height_m));
            }
        }

        #[test]
        fn each_step_moves_at_most_one_increment(seed in any::<u64>()) {
            let mut feed = SimulatedFeed::with_seed(seed);
            let (mut prev, _) = feed.step();
            for _ in 0..50 {
                let (next, _) = feed.step();
                prop_assert!((next.wave_height_m - prev.wave_height_m).abs() <= 0.25 + 1e-9);
                prop_assert!((next.rainfall_mm - prev.rainfall_mm).abs() <= 1.0 + 1e-9);
                prop_assert!((next.wind_wave_height_m - prev.wind_wave_height_m).abs() <= 0.15 + 1e-9);
                prev = next;
            }
        }
    }
}
