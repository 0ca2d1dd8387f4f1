use crate::config::MonitorConfig;
use crate::datasources::OpenMeteoClient;
use crate::logic::alerts::AlertEvaluator;
use crate::logic::feed::SimulatedFeed;
use crate::models::{AlertReport, Coordinates, DailySeries, MarineConditions, WeatherSample};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

const EVENT_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub enum MonitorEvent {
    ForecastUpdated(DailySeries),
    FetchFailed(String),
    ConditionsUpdated {
        conditions: MarineConditions,
        sample: WeatherSample,
    },
    Alert(AlertReport),
    PositiveUpdate(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorSchedule {
    pub refresh: Duration,
    pub simulate: Duration,
    pub alert_check: Duration,
    /// Stop after this many timer firings; `None` runs until the receiver goes away.
    pub tick_budget: Option<u64>,
}

impl From<&MonitorConfig> for MonitorSchedule {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            refresh: Duration::from_secs(config.refresh_secs.max(1)),
            simulate: Duration::from_secs(config.simulate_secs.max(1)),
            alert_check: Duration::from_secs(config.alert_secs.max(1)),
            tick_budget: None,
        }
    }
}

impl Default for MonitorSchedule {
    fn default() -> Self {
        Self::from(&MonitorConfig::default())
    }
}

/// Periodic weather monitoring.
///
/// One task owns the simulated feed, so the drifting state has a single writer.
/// Every outcome is reported to the receiver as a `MonitorEvent`.
pub struct WeatherMonitor {
    schedule: MonitorSchedule,
    feed: SimulatedFeed,
    evaluator: AlertEvaluator,
    remote: Option<(OpenMeteoClient, Coordinates)>,
}

impl WeatherMonitor {
    pub fn new(schedule: MonitorSchedule, evaluator: AlertEvaluator) -> Self {
        Self {
            schedule,
            feed: SimulatedFeed::new(),
            evaluator,
            remote: None,
        }
    }

    pub fn with_feed(mut self, feed: SimulatedFeed) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_remote(mut self, client: OpenMeteoClient, coords: Coordinates) -> Self {
        self.remote = Some((client, coords));
        self
    }

    pub fn spawn(self) -> (JoinHandle<()>, mpsc::Receiver<MonitorEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let handle = tokio::spawn(self.run(tx));
        (handle, rx)
    }

    pub async fn run(mut self, tx: mpsc::Sender<MonitorEvent>) {
        let mut refresh = interval(self.schedule.refresh);
        let mut simulate = interval(self.schedule.simulate);
        let mut alert_check = interval(self.schedule.alert_check);
        for timer in [&mut refresh, &mut simulate, &mut alert_check] {
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }

        let has_remote = self.remote.is_some();
        let mut ticks: u64 = 0;

        tracing::info!(
            remote = has_remote,
            "Weather monitor started ({:?} refresh, {:?} simulate, {:?} alerts)",
            self.schedule.refresh,
            self.schedule.simulate,
            self.schedule.alert_check
        );

        loop {
            if self
                .schedule
                .tick_budget
                .is_some_and(|budget| ticks >= budget)
            {
                tracing::debug!(ticks, "Monitor tick budget spent");
                break;
            }

            let event = tokio::select! {
                biased;
                _ = refresh.tick(), if has_remote => self.refresh_forecast().await,
                _ = simulate.tick() => Some(self.step_conditions()),
                _ = alert_check.tick() => self.check_alerts(),
            };
            ticks += 1;

            if let Some(event) = event {
                if tx.send(event).await.is_err() {
                    tracing::debug!("Monitor receiver dropped");
                    break;
                }
            }
        }

        tracing::info!("Weather monitor stopped");
    }

    async fn refresh_forecast(&self) -> Option<MonitorEvent> {
        let (client, coords) = self.remote.as_ref()?;
        match client.fetch_daily_series(coords).await {
            Ok(series) => {
                tracing::debug!("Weather forecast updated");
                Some(MonitorEvent::ForecastUpdated(series))
            }
            Err(e) => {
                tracing::warn!("Failed to fetch weather forecast: {}", e);
                Some(MonitorEvent::FetchFailed(e.to_string()))
            }
        }
    }

    fn step_conditions(&mut self) -> MonitorEvent {
        let (conditions, sample) = self.feed.step();
        MonitorEvent::ConditionsUpdated { conditions, sample }
    }

    fn check_alerts(&mut self) -> Option<MonitorEvent> {
        let report = self.evaluator.evaluate(&self.feed.state().conditions());
        if report.has_alerts() {
            for alert in &report.alerts {
                tracing::warn!("{}", alert);
            }
            return Some(MonitorEvent::Alert(report));
        }

        self.evaluator
            .positive_update(&report, self.feed.rng_mut())
            .map(MonitorEvent::PositiveUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;
    use crate::logic::alerts::AlertThresholds;

    fn fast_schedule(budget: u64) -> MonitorSchedule {
        MonitorSchedule {
            refresh: Duration::from_millis(10),
            simulate: Duration::from_millis(10),
            alert_check: Duration::from_millis(10),
            tick_budget: Some(budget),
        }
    }

    fn hair_trigger() -> AlertEvaluator {
        AlertEvaluator::new(AlertThresholds {
            wave_m: 0.0,
            rainfall_mm: 100.0,
            wind_wave_m: 100.0,
        })
        .with_positive_probability(0.0)
    }

    async fn collect(mut rx: mpsc::Receiver<MonitorEvent>) -> Vec<MonitorEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn schedule_from_config() {
        let schedule = MonitorSchedule::default();
        assert_eq!(schedule.refresh, Duration::from_secs(300));
        assert_eq!(schedule.simulate, Duration::from_secs(120));
        assert_eq!(schedule.alert_check, Duration::from_secs(30));
        assert!(schedule.tick_budget.is_none());
    }

    #[tokio::test]
    async fn stops_after_tick_budget() {
        let monitor = WeatherMonitor::new(fast_schedule(6), hair_trigger())
            .with_feed(SimulatedFeed::with_seed(5));
        let (handle, rx) = monitor.spawn();

        let events = tokio::time::timeout(Duration::from_secs(5), collect(rx))
            .await
            .unwrap();
        handle.await.unwrap();

        assert_eq!(events.len(), 6);
        // Both timers fire at once on start; the simulation step goes first.
        assert!(matches!(events[0], MonitorEvent::ConditionsUpdated { .. }));
        assert!(matches!(events[1], MonitorEvent::Alert(_)));
        assert!(events.iter().all(|e| matches!(
            e,
            MonitorEvent::ConditionsUpdated { .. } | MonitorEvent::Alert(_)
        )));
    }

    #[tokio::test]
    async fn alerts_reflect_latest_conditions() {
        let monitor = WeatherMonitor::new(fast_schedule(2), hair_trigger())
            .with_feed(SimulatedFeed::with_seed(8));
        let (_handle, rx) = monitor.spawn();
        let events = tokio::time::timeout(Duration::from_secs(5), collect(rx))
            .await
            .unwrap();

        let wave = match &events[0] {
            MonitorEvent::ConditionsUpdated { conditions, .. } => conditions.wave_height_m,
            other => panic!("unexpected first event {:?}", other),
        };
        match &events[1] {
            MonitorEvent::Alert(report) => assert_eq!(report.alerts[0].value, wave),
            other => panic!("unexpected second event {:?}", other),
        }
    }

    #[tokio::test]
    async fn quiet_conditions_emit_nothing_on_alert_ticks() {
        let evaluator = AlertEvaluator::default().with_positive_probability(0.0);
        let monitor = WeatherMonitor::new(fast_schedule(4), evaluator)
            .with_feed(SimulatedFeed::with_seed(1));
        let (_handle, rx) = monitor.spawn();
        let events = tokio::time::timeout(Duration::from_secs(5), collect(rx))
            .await
            .unwrap();

        // A couple of steps from zero cannot reach any default threshold.
        assert!(!events.is_empty());
        assert!(events
            .iter()
            .all(|e| matches!(e, MonitorEvent::ConditionsUpdated { .. })));
    }

    #[tokio::test]
    async fn fetch_failures_do_not_stop_the_loop() {
        let client = OpenMeteoClient::new(WeatherConfig {
            marine_url: "http://127.0.0.1:9/v1/marine".into(),
            forecast_url: "http://127.0.0.1:9/v1/forecast".into(),
            timeout_secs: 1,
            max_retries: 0,
            backoff_base_ms: 1,
        })
        .unwrap();

        let monitor = WeatherMonitor::new(fast_schedule(4), hair_trigger())
            .with_feed(SimulatedFeed::with_seed(2))
            .with_remote(client, Coordinates::default());
        let (handle, rx) = monitor.spawn();
        let events = tokio::time::timeout(Duration::from_secs(10), collect(rx))
            .await
            .unwrap();
        handle.await.unwrap();

        assert!(matches!(events[0], MonitorEvent::FetchFailed(_)));
        assert!(events
            .iter()
            .any(|e| matches!(e, MonitorEvent::ConditionsUpdated { .. })));
    }

    #[tokio::test]
    async fn dropping_receiver_ends_task() {
        let schedule = MonitorSchedule {
            tick_budget: None,
            ..fast_schedule(0)
        };
        let monitor = WeatherMonitor::new(schedule, hair_trigger());
        let (handle, rx) = monitor.spawn();
        drop(rx);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
