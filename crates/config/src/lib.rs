//! Configuration loading and validation.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults,
//! 2. a config file (`--config`, or `config.toml` in the platform config
//!    directory when present); TOML, YAML or JSON by extension,
//! 3. `METAGAME_*` environment variables, nested keys split on `__`
//!    (e.g. `METAGAME_SOURCES__TIMEOUT_SECS=30`),
//! 4. whatever the caller merges on top (command line flags).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml, Yaml};
use metagame_cluster::ClusterParams;
use metagame_source::{DEFAULT_DECKS_URL, DEFAULT_RESULTS_URL, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use time::macros::date;
use time::{Date, OffsetDateTime};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

pub const ENV_PREFIX: &str = "METAGAME_";
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("net", "netrunner", "metagame")
}

/// Tournament format to collect decks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Startup,
}
impl Format {
    /// The value used by the results service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Startup => "startup",
        }
    }
}
impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
impl FromStr for Format {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "startup" => Ok(Self::Startup),
            other => Err(format!("unknown format `{other}` (expected `standard` or `startup`)")),
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_samples: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_cards: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

/// Where the two remote services live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub results_url: String,
    pub decks_url: String,
    /// Per-request timeout. Unset means requests never time out.
    pub timeout_secs: Option<u64>,
}
impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            results_url: DEFAULT_RESULTS_URL.to_string(),
            decks_url: DEFAULT_DECKS_URL.to_string(),
            timeout_secs: None,
        }
    }
}
impl SourcesConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub format: Format,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Share of each tournament's swiss standings to collect, 0 to 100.
    pub percentage: i64,
    pub eps: f64,
    pub min_samples: usize,
    pub top_cards: usize,
    pub workers: usize,
    pub page_size: usize,
    pub sources: SourcesConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            format: Format::Standard,
            start_date: date!(2024 - 03 - 18),
            end_date: OffsetDateTime::now_utc().date(),
            percentage: 30,
            eps: 7.5,
            min_samples: 3,
            top_cards: 10,
            workers: default_workers(),
            page_size: MAX_PAGE_SIZE,
            sources: SourcesConfig::default(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".metagame-cache"))
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// The platform config file, if one exists.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

fn file_provider(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

impl Config {
    /// Defaults, then the config file, then the environment.
    ///
    /// An explicitly given `file` must exist; the platform default is used
    /// only when present.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::FileNotFound(path.to_path_buf())),
            Some(path) => figment = file_provider(figment, path),
            None => {
                if let Some(path) = default_config_file() {
                    tracing::debug!(path = %path.display(), "Using platform config file");
                    figment = file_provider(figment, &path);
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract from a (possibly further layered) figment and validate.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().map_err(|e| ErrorKind::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load with no extra layers on top.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(file)?)
    }

    /// Load with command line values on top of everything else.
    pub fn load_with(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::from_figment(Self::figment(file)?.merge(Serialized::defaults(overrides)))
    }

    /// Reject values no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.percentage) {
            exn::bail!(ErrorKind::Invalid(format!(
                "percentage must be between 0 and 100, got {}",
                self.percentage
            )));
        }
        if self.start_date > self.end_date {
            exn::bail!(ErrorKind::Invalid(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        self.cluster_params()?;
        if self.workers == 0 {
            exn::bail!(ErrorKind::Invalid("workers must be at least 1".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            exn::bail!(ErrorKind::Invalid(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// `percentage` as a fraction in `0.0..=1.0`.
    pub fn top_fraction(&self) -> f64 {
        self.percentage as f64 / 100.0
    }

    pub fn cluster_params(&self) -> Result<ClusterParams> {
        ClusterParams::new(self.eps, self.min_samples).or_raise(|| {
            ErrorKind::Invalid(format!("eps {} / min_samples {}", self.eps, self.min_samples))
        })
    }
}
