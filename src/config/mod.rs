use crate::errors::{AppError, AppResult};
use crate::models::HeadcountMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "rshiftlog";
const CONFIG_FILE: &str = "rshiftlog.conf";
const DATABASE_FILE: &str = "rshiftlog.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Who counts toward the headcount of the threshold lookup.
    #[serde(default)]
    pub threshold_headcount: HeadcountMode,
    #[serde(default = "default_monthly_hours_factor")]
    pub monthly_hours_factor: f64,
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_monthly_hours_factor() -> f64 {
    crate::core::summary::DEFAULT_MONTHLY_HOURS_FACTOR
}
fn default_csv_delimiter() -> String {
    ";".to_string()
}
fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            threshold_headcount: HeadcountMode::default(),
            monthly_hours_factor: default_monthly_hours_factor(),
            csv_delimiter: default_csv_delimiter(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{APP_DIR}"))
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The CSV writer takes a single byte as delimiter.
    pub fn csv_delimiter_byte(&self) -> AppResult<u8> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(AppError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if !(self.monthly_hours_factor.is_finite() && self.monthly_hours_factor > 0.0) {
            return Err(AppError::Config(format!(
                "monthly_hours_factor must be positive, got {}",
                self.monthly_hours_factor
            )));
        }
        self.csv_delimiter_byte()?;
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join(DATABASE_FILE),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
