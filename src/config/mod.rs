use crate::models::DashboardConfig;
use anyhow::{Context, Result, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the dashboard configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.yaml";

/// Prefix for environment variable overrides, e.g. `DASHBOARD_PAGE_SIZE`.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Configuration manager for loading and saving `dashboard.yaml`.
///
/// Loading layers two sources, later ones winning:
/// 1. `dashboard.yaml` in the config directory (optional)
/// 2. `DASHBOARD_*` environment variables (nested keys use `__`,
///    e.g. `DASHBOARD_LOGGING__DEBUG=true`)
///
/// Fields missing from both fall back to [`DashboardConfig::default`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the configuration from file and environment.
    ///
    /// # Returns
    /// The validated configuration, or defaults if nothing is configured
    pub fn load(&self) -> Result<DashboardConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.config_path.as_std_path())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        validate(&config)?;

        tracing::info!(
            "Loaded config: endpoint={}, page_size={}, reset_reveal={}",
            config.endpoint,
            config.page_size,
            config.reset_reveal_on_criteria_change
        );
        Ok(config)
    }

    /// Save the configuration file.
    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Write the default configuration if no config file exists yet.
    ///
    /// # Returns
    /// `true` if a file was written
    pub fn ensure_default(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        self.save(&DashboardConfig::default())?;
        Ok(true)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

/// Reject configurations the dashboard cannot work with.
pub fn validate(config: &DashboardConfig) -> Result<()> {
    ensure!(!config.endpoint.trim().is_empty(), "endpoint must not be empty");
    ensure!(config.page_size > 0, "page_size must be greater than zero");

    let range = config.default_price_range;
    ensure!(
        range.min.is_finite() && range.max.is_finite(),
        "default_price_range bounds must be finite numbers, got [{}, {}]",
        range.min,
        range.max
    );
    ensure!(
        range.min <= range.max,
        "default_price_range minimum {} exceeds maximum {}",
        range.min,
        range.max
    );

    Ok(())
}
