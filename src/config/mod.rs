//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;

use crate::cache::CacheConfig;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "akademi";
const ENV_PREFIX: &str = "AKADEMI";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_CACHE_CAPACITY: usize = 1024;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
const DEFAULT_PUBLIC_PAGE_SIZE: u32 = 12;

/// Command-line arguments for the Akademi binary.
#[derive(Debug, Parser)]
#[command(name = "akademi", version, about = "Akademi content server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "AKADEMI_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Upsert the canonical seed content and exit.
    Seed(SeedArgs),
    /// Run pending database migrations and exit.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    /// Override the database connection URL.
    #[arg(long = "database-url", env = "AKADEMI_DATABASE_URL", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    /// Override the listener address.
    #[arg(long = "server-addr", value_name = "ADDR")]
    pub server_addr: Option<SocketAddr>,

    #[command(flatten)]
    pub database: DatabaseOverride,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,
}

#[derive(Debug, Args, Default, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
    pub events: EventsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            logging: LoggingSettings::default(),
            cache: CacheSettings::default(),
            events: EventsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: DEFAULT_LISTEN_ADDR
                .parse()
                .expect("default listen address is valid"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: NonZeroU32::new(DEFAULT_DB_MAX_CONNECTIONS)
                .expect("default connection count is non-zero"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl From<LogLevel> for Directive {
    fn from(level: LogLevel) -> Self {
        LevelFilter::from(level).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub capacity: usize,
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            capacity: settings.capacity,
            ttl: Duration::from_secs(settings.ttl_seconds),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventsSettings {
    /// Organization timezone used to compute "start of today" for the event
    /// partitions.
    pub timezone: Tz,
    pub public_page_size: NonZeroU32,
}

impl Default for EventsSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Istanbul,
            public_page_size: NonZeroU32::new(DEFAULT_PUBLIC_PAGE_SIZE)
                .expect("default page size is non-zero"),
        }
    }
}

/// Load settings from the default file, an optional local file, an optional
/// explicit file and the `AKADEMI__` environment overlay, in that order.
pub fn load(config_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));
    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path.to_path_buf()));
    }
    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Parse the CLI, load settings, then apply CLI overrides on top.
pub fn load_with_cli() -> Result<(CliArgs, Settings), ConfigError> {
    let cli = CliArgs::parse();
    let mut settings = load(cli.config_file.as_deref())?;
    if let Some(command) = &cli.command {
        apply_command_overrides(&mut settings, command);
    }
    Ok((cli, settings))
}

fn apply_command_overrides(settings: &mut Settings, command: &Command) {
    let database = match command {
        Command::Serve(args) => {
            if let Some(addr) = args.server_addr {
                settings.server.addr = addr;
            }
            &args.database
        }
        Command::Seed(args) => &args.database,
        Command::Migrate(args) => &args.database,
    };
    if let Some(url) = &database.database_url {
        settings.database.url = Some(url.clone());
    }
}
