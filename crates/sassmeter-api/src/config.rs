//! API server configuration.

use sassmeter_agents::NarratorConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Environment prefix, e.g. `SASSMETER_NARRATOR__API_KEY`
pub const ENV_PREFIX: &str = "SASSMETER";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sassmeter";

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Narrative backend configuration
    pub narrator: NarratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address
    pub bind_addr: SocketAddr,

    /// Allowed CORS origins; `*` allows any
    pub allowed_origins: Vec<String>,

    /// Sessions untouched for this long are dropped
    pub session_idle_ttl_secs: u64,

    /// How often idle sessions are swept
    pub session_sweep_interval_secs: u64,
}

impl HttpConfig {
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs.max(1))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
                allowed_origins: vec!["http://localhost:5173".to_string()],
                session_idle_ttl_secs: 30 * 60,
                session_sweep_interval_secs: 60,
            },
            narrator: NarratorConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load defaults, then the config file, then `SASSMETER_*` variables.
    ///
    /// Without an explicit path, `sassmeter.toml` is used if present.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&ApiConfig::default())?)
            .add_source(file)
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load from defaults and environment variables only
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&ApiConfig::default())?)
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}
