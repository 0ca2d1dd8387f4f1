mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod render;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, LocationArgs, ReportArgs};
use config::Config;
use datasources::OpenMeteoClient;
use dialoguer::Input;
use logic::{AlertEvaluator, ChatSession, MonitorEvent, MonitorSchedule, ReportService};
use logic::{ReportComposer, SimulatedFeed, WeatherMonitor};
use models::{Coordinates, FishingArea, MarineConditions, QuickAction, ReportSpec, WeatherSample};
use render::{OutputFormat, TextRenderer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Check => run_check(cli.config).await?,
        Commands::Weather(location) => run_weather(cli.config, location).await?,
        Commands::Monitor {
            ticks,
            offline,
            seed,
        } => run_monitor(cli.config, ticks, offline, seed).await?,
        Commands::Chat { question } => run_chat(question)?,
        Commands::Report(args) => run_report(cli.config, args).await?,
        Commands::Areas => {
            for area in FishingArea::ALL {
                println!("{:<12} {}", area.as_str(), area.coordinates());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_location(config: &Config, args: &LocationArgs) -> error::Result<(String, Coordinates)> {
    if let Some(name) = &args.area {
        let area = FishingArea::from_str(name).ok_or_else(|| {
            error::FishOpsError::InvalidCoordinateInput(format!("unknown fishing area '{}'", name))
        })?;
        return Ok((area.display_name(), area.coordinates()));
    }
    if let (Some(lat), Some(lon)) = (&args.lat, &args.lon) {
        let coords = Coordinates::parse(lat, lon)?;
        return Ok((coords.to_string(), coords));
    }
    Ok((config.location.name.clone(), config.location.coordinates()?))
}

async fn run_check(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)?;
    let coords = config.location.coordinates()?;

    println!("Location:   {} ({})", config.location.name, coords);
    println!(
        "Thresholds: waves {:.1} m, rain {:.1} mm, wind waves {:.1} m",
        config.alerts.wave_m, config.alerts.rainfall_mm, config.alerts.wind_wave_m
    );
    println!("Reports:    {}", config.report_dir(None).display());

    let client = OpenMeteoClient::new(config.weather.clone())?;
    match client.test_connection(&coords).await {
        Ok(true) => println!("Open-Meteo: OK"),
        Ok(false) => println!("Open-Meteo: responded with an error status"),
        Err(e) => {
            tracing::warn!("Connection test failed: {}", e);
            println!("Open-Meteo: OFFLINE ({})", e);
        }
    }
    Ok(())
}

async fn run_weather(
    config_path: Option<std::path::PathBuf>,
    location: LocationArgs,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)?;
    let (name, coords) = match resolve_location(&config, &location) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Rejected location input: {}", e);
            return Err(e.into());
        }
    };

    let client = OpenMeteoClient::new(config.weather.clone())?;
    let series = client
        .fetch_daily_series(&coords)
        .await
        .with_context(|| format!("fetching forecast for {}", name))?;

    let evaluator = AlertEvaluator::new(config.alerts.thresholds());
    println!("Marine forecast for {} ({})", name, coords);
    for day in series.days() {
        let report = evaluator.evaluate(&MarineConditions {
            wave_height_m: day.wave_height_m,
            rainfall_mm: day.rainfall_mm,
            wind_wave_height_m: day.wind_wave_height_m,
        });
        println!(
            "{} {}  [{}] {}",
            report.severity.symbol(),
            day,
            report.severity,
            if report.all_clear {
                "safe for fishing"
            } else {
                "not safe for fishing"
            }
        );
        for alert in &report.alerts {
            println!("    {}", alert);
        }
    }
    if let Some(max_wave) = series.max_wave_height() {
        println!(
            "Peak waves {:.1} m, total rainfall {:.1} mm",
            max_wave,
            series.total_rainfall()
        );
    }
    Ok(())
}

async fn run_monitor(
    config_path: Option<std::path::PathBuf>,
    ticks: Option<u64>,
    offline: bool,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)?;
    let mut schedule = MonitorSchedule::from(&config.monitor);
    schedule.tick_budget = ticks;

    let evaluator = AlertEvaluator::new(config.alerts.thresholds())
        .with_positive_probability(config.alerts.positive_message_probability);

    let mut monitor = WeatherMonitor::new(schedule, evaluator);
    if let Some(seed) = seed {
        monitor = monitor.with_feed(SimulatedFeed::with_seed(seed));
    }
    if !offline {
        let client = OpenMeteoClient::new(config.weather.clone())?;
        monitor = monitor.with_remote(client, config.location.coordinates()?);
    }

    println!("Monitoring {} - press Ctrl+C to stop", config.location.name);
    let (handle, mut events) = monitor.spawn();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    drop(events);
    handle.await.context("monitor task failed")?;
    Ok(())
}

fn print_event(event: &MonitorEvent) {
    let time = chrono::Local::now().format("%H:%M:%S");
    match event {
        MonitorEvent::ForecastUpdated(series) => {
            println!("[{}] Forecast updated ({} days)", time, series.len());
            if let Some(today) = series.days().next() {
                println!("           {}", today);
            }
        }
        MonitorEvent::FetchFailed(message) => {
            println!("[{}] Forecast unavailable: {}", time, message);
        }
        MonitorEvent::ConditionsUpdated { conditions, sample } => {
            let assessment = sample.assess();
            println!("[{}] {} | {}", time, sample.condition(), conditions);
            println!(
                "           waves {} | wind {} | visibility {} | {}",
                assessment.wave.as_str(),
                assessment.wind.as_str(),
                assessment.visibility.as_str(),
                if assessment.overall_safe {
                    "safe for fishing"
                } else {
                    "use caution"
                }
            );
        }
        MonitorEvent::Alert(report) => {
            println!("[{}] {} {}", time, report.severity.symbol(), report.severity.headline());
            for alert in &report.alerts {
                println!("           {}", alert);
            }
        }
        MonitorEvent::PositiveUpdate(message) => {
            println!("[{}] {}", time, message);
        }
    }
}

fn run_chat(question: Option<String>) -> anyhow::Result<()> {
    let mut session = ChatSession::new();

    if let Some(question) = question {
        if let Some(exchange) = session.submit(&question) {
            println!("{}", exchange);
        }
        return Ok(());
    }

    println!("Fisheries assistant. Shortcuts: /weather /prices /spots. Type 'quit' to leave.");
    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
            .context("reading chat input")?;

        let exchange = match line.trim() {
            "quit" | "exit" => break,
            "/weather" => session.quick(QuickAction::Weather),
            "/prices" => session.quick(QuickAction::FishPrices),
            "/spots" => session.quick(QuickAction::FishingSpots),
            other => session.submit(other),
        };
        if let Some(exchange) = exchange {
            println!("Assistant: {}\n", exchange.response_text());
        }
    }

    for exchange in session.exchanges() {
        tracing::debug!(
            at = %exchange.asked_at().format("%H:%M:%S"),
            question = exchange.user_text(),
            "chat exchange"
        );
    }
    Ok(())
}

fn build_sample(args: &cli::SampleArgs) -> WeatherSample {
    let defaults = WeatherSample::default();
    let mut builder = WeatherSample::builder(
        args.condition
            .clone()
            .unwrap_or_else(|| defaults.condition().to_string()),
    );
    if let Some(wave) = args.wave {
        builder = builder.wave_height_m(wave);
    }
    if let Some(wind) = args.wind {
        builder = builder.wind_speed_kmh(wind);
    }
    if let Some(visibility) = args.visibility {
        builder = builder.visibility_km(visibility);
    }
    builder.build()
}

async fn run_report(config_path: Option<std::path::PathBuf>, args: ReportArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)?;
    let format = OutputFormat::from(args.format);

    let spec = ReportSpec::new(args.kind.into(), config.report_dir(args.output_dir.as_ref()))
        .with_username(args.username.as_deref().unwrap_or(&config.report.username))
        .with_location(args.location.as_deref().unwrap_or(&config.location.name))
        .with_sections(!args.no_weather, !args.no_activities, !args.no_safety);

    let sample = build_sample(&args.sample);
    let now = chrono::Local::now();
    let activities = args.activity_lines(now);

    if args.preview {
        let doc = ReportComposer::compose(&spec, &sample, &activities, now);
        print!("{}", TextRenderer.to_text(&doc));
        return Ok(());
    }

    let service = ReportService::new(format.renderer());
    let path = service.generate(spec, sample, activities).await?;
    println!("Report saved to {}", path.display());
    Ok(())
}
