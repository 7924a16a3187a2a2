use serde::{Deserialize, Serialize};

/// Service name stamped on every golden log line.
pub const NAME: &str = "payment-gateway";

/// Prefix for environment variable overrides of the file configuration.
pub const ENV_PREFIX: &str = "GATEWAY";

/// Environment variable that selects the runtime environment.
pub const RUN_ENV: &str = "RUN_ENV";

/// Fallback error code used when a provider error body carries none.
pub const NO_ERROR_CODE: &str = "No error code";

/// Fallback error message used when a provider error body carries none.
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Message used when a provider error body is not in the expected format.
pub const UNSUPPORTED_ERROR_MESSAGE: &str = "Unsupported response type";

/// Upper bound for any outbound provider call, seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Environment the process is running in, from `RUN_ENV`.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|env| env.parse().ok())
            .unwrap_or_default()
    }

    /// Name of the configuration file for this environment.
    pub fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
