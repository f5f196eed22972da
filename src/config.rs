use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    #[command(flatten)]
    pub notices: NoticeConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "NOTICES_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "NOTICES_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the liveness and readiness probes
    #[arg(long, env = "NOTICES_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests during shutdown
    #[arg(long, env = "NOTICES_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// PostgreSQL via `--database-url`
    Postgres,
}

#[derive(Clone, Debug, Args)]
pub struct StorageConfig {
    /// Where notices are persisted
    #[arg(long = "storage", env = "NOTICES_STORAGE", value_enum, default_value_t = StorageBackend::Memory)]
    pub backend: StorageBackend,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL (required for the postgres backend)
    #[arg(long = "database-url", env = "NOTICES_DATABASE_URL")]
    pub url: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "NOTICES_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "NOTICES_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// Seconds to wait for a free connection
    #[arg(long = "db-acquire-timeout-secs", env = "NOTICES_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Connection attempts at startup before giving up
    #[arg(long = "db-connect-retries", env = "NOTICES_DB_CONNECT_RETRIES", default_value_t = 5)]
    pub connect_retries: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "NOTICES_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces and metrics are only exported when set
    #[arg(long, env = "NOTICES_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct NoticeConfig {
    /// Answer an empty notice list with 204 instead of 200 and `[]`
    #[arg(
        long,
        env = "NOTICES_EMPTY_LIST_NO_CONTENT",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub empty_list_no_content: bool,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
