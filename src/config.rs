//! Server configuration, loaded from environment variables at startup and
//! optionally overridden by command-line flags.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://november7-730026606190.europe-west1.run.app/messages";

/// Which search backend serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => bail!("unknown backend {:?} (expected \"memory\" or \"sqlite\")", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub upstream_url: String,
    /// Ingestion page window, never zero.
    pub page_window: usize,
    pub upstream_timeout: Duration,
    pub max_pages: usize,
    pub backend: BackendKind,
    pub db_path: PathBuf,
    /// In sqlite mode, ingest the upstream feed into the store at startup.
    pub db_import: bool,
    /// Comma-separated origin list; `None` allows any origin.
    pub cors_origins: Option<String>,
    /// `tracing` filter directive, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            page_window: 200,
            upstream_timeout: Duration::from_secs(20),
            max_pages: 10_000,
            backend: BackendKind::Memory,
            db_path: PathBuf::from("messages.db"),
            db_import: false,
            cors_origins: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Builds a [`Config`] from `SEARCH_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(v) = lookup("SEARCH_BIND") {
            config.bind_addr = parse_value("SEARCH_BIND", &v)?;
        }
        if let Some(v) = lookup("SEARCH_UPSTREAM_URL") {
            config.upstream_url = v;
        }
        if let Some(v) = lookup("SEARCH_PAGE_WINDOW") {
            config.page_window = parse_value("SEARCH_PAGE_WINDOW", &v)?;
        }
        if let Some(v) = lookup("SEARCH_UPSTREAM_TIMEOUT_SECS") {
            config.upstream_timeout =
                Duration::from_secs(parse_value("SEARCH_UPSTREAM_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("SEARCH_MAX_PAGES") {
            config.max_pages = parse_value("SEARCH_MAX_PAGES", &v)?;
        }
        if let Some(v) = lookup("SEARCH_BACKEND") {
            config.backend = v.parse()?;
        }
        if let Some(v) = lookup("SEARCH_DB_PATH") {
            config.db_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("SEARCH_DB_IMPORT") {
            config.db_import = v == "1" || v.eq_ignore_ascii_case("true");
        }
        config.cors_origins = lookup("SEARCH_CORS_ORIGINS").filter(|v| !v.trim().is_empty());
        if let Some(v) = lookup("SEARCH_LOG") {
            config.log_level = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies `--bind`, `--upstream`, `--backend` and `--db` overrides.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .with_context(|| format!("{} requires a value", flag))
            };
            match flag {
                "--bind" => {
                    self.bind_addr = parse_value("--bind", value()?)?;
                    i += 2;
                }
                "--upstream" => {
                    self.upstream_url = value()?.clone();
                    i += 2;
                }
                "--backend" => {
                    self.backend = value()?.parse()?;
                    i += 2;
                }
                "--db" => {
                    self.db_path = PathBuf::from(value()?);
                    i += 2;
                }
                _ => {
                    tracing::warn!("Ignoring unknown argument {:?}", flag);
                    i += 1;
                }
            }
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.page_window == 0 {
            bail!("SEARCH_PAGE_WINDOW must be at least 1");
        }
        if self.max_pages == 0 {
            bail!("SEARCH_MAX_PAGES must be at least 1");
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid value {:?} for {}: {}", value, key, e))
}
