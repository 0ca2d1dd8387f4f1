use crate::error::{FishOpsError, Result};
use crate::logic::alerts::AlertThresholds;
use crate::models::{Coordinates, FishingArea, DEFAULT_USERNAME};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const MARINE_API_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
pub const FORECAST_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const REPORT_DIR_NAME: &str = "Fisheries_Reports";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        let coords = Coordinates::default();
        Self {
            name: "Galle, Sri Lanka".into(),
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub marine_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            marine_url: MARINE_API_URL.into(),
            forecast_url: FORECAST_API_URL.into(),
            timeout_secs: 10,
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub wave_m: f64,
    pub rainfall_mm: f64,
    pub wind_wave_m: f64,
    pub positive_message_probability: f64,
}

impl AlertsConfig {
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            wave_m: self.wave_m,
            rainfall_mm: self.rainfall_mm,
            wind_wave_m: self.wind_wave_m,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        let thresholds = AlertThresholds::default();
        Self {
            wave_m: thresholds.wave_m,
            rainfall_mm: thresholds.rainfall_mm,
            wind_wave_m: thresholds.wind_wave_m,
            positive_message_probability: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub refresh_secs: u64,
    pub simulate_secs: u64,
    pub alert_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 300,
            simulate_secs: 120,
            alert_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub username: String,
    pub output_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.into(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FishOpsError::Config(format!(
                "Config file not found at {:?}. Run `fishops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FishOpsError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Load from the usual locations, or fall back to built-in defaults.
    /// An explicit path must exist.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists() {
            Self::load(config_override)
        } else {
            tracing::info!("No config file found - using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FishOpsError::Config(format!("Failed to parse config: {}", e)))?;

        config.location.coordinates()?;
        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("fishops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists() -> bool {
        Self::find_config_path()
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Default path for writing new config files (~/.config/fishops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FishOpsError::Config("Cannot determine config directory".into()))?
            .join("fishops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up FishOps!");
        println!();

        // --- Fishing area ---
        println!("Home Fishing Area");
        let mut choices: Vec<String> = FishingArea::ALL
            .iter()
            .map(|a| a.display_name())
            .collect();
        choices.push("Custom coordinates".into());

        let picked = Select::new()
            .with_prompt("  Area")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

        let location = match FishingArea::ALL.get(picked) {
            Some(area) => {
                let coords = area.coordinates();
                LocationConfig {
                    name: area.display_name(),
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                }
            }
            None => {
                let defaults = LocationConfig::default();
                let name: String = Input::new()
                    .with_prompt("  Location name")
                    .default(defaults.name)
                    .interact_text()
                    .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

                let latitude: String = Input::new()
                    .with_prompt("  Latitude")
                    .default(format!("{:.2}", defaults.latitude))
                    .interact_text()
                    .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

                let longitude: String = Input::new()
                    .with_prompt("  Longitude")
                    .default(format!("{:.2}", defaults.longitude))
                    .interact_text()
                    .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

                let coords = Coordinates::parse(&latitude, &longitude)?;
                LocationConfig {
                    name,
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                }
            }
        };

        println!();

        // --- Reports ---
        println!("Reports");
        let username: String = Input::new()
            .with_prompt("  Your name")
            .default(DEFAULT_USERNAME.into())
            .interact_text()
            .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

        let default_dir = Self::default_report_dir();
        let output_dir: String = Input::new()
            .with_prompt("  Report folder")
            .default(default_dir.display().to_string())
            .interact_text()
            .map_err(|e| FishOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            location,
            report: ReportConfig {
                username,
                output_dir: Some(PathBuf::from(output_dir)),
            },
            ..Config::default()
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FishOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# FishOps Configuration\n# Generated by `fishops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// `<Documents>/Fisheries_Reports`, or `./Fisheries_Reports` when there is no
    /// documents directory.
    pub fn default_report_dir() -> PathBuf {
        dirs::document_dir()
            .map(|d| d.join(REPORT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(REPORT_DIR_NAME))
    }

    pub fn report_dir(&self, dir_override: Option<&PathBuf>) -> PathBuf {
        dir_override
            .cloned()
            .or_else(|| self.report.output_dir.clone())
            .unwrap_or_else(Self::default_report_dir)
    }
}
