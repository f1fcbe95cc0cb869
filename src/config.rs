use crate::constants::{DEFAULT_BODY_LIMIT, DEFAULT_PORT, DEVELOPMENT, PRODUCTION, env};
use crate::diagnostics::Diagnostics;
use crate::origin::{AllowedOriginSet, DEFAULT_ALLOWED_ORIGINS};
use crate::policy::{CorsOptions, CredentialsMode, ValidationError};
use crate::telemetry::LogFormat;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Whether failures may expose their detail to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
}

impl RuntimeMode {
    /// Only the exact environment name `development` turns detail on.
    pub fn from_environment(environment: &str) -> Self {
        if environment == DEVELOPMENT {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn exposes_error_detail(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Startup configuration. Parsed once; every value is read-only afterwards.
#[derive(Debug, Clone, Parser)]
#[command(name = "boundary", version, about = "HTTP boundary service with origin policy and error boundary")]
pub struct ServiceConfig {
    /// Listen port. When unset the service binds the default port and
    /// `/health` reports "not set".
    #[arg(long, env = env::PORT)]
    pub port: Option<u16>,

    #[arg(long, env = env::HOST, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Environment name; `development` exposes error detail in 500 bodies.
    #[arg(long, env = env::ENVIRONMENT, default_value = PRODUCTION)]
    pub environment: String,

    /// Replaces the built-in allow-list. Repeat the flag or pass a comma list.
    #[arg(long = "allowed-origin", env = env::ALLOWED_ORIGINS, value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = env::CREDENTIALS, value_enum, default_value_t = CredentialsMode::Echoed)]
    pub credentials: CredentialsMode,

    /// Maximum accepted request body, in bytes.
    #[arg(long, env = env::BODY_LIMIT, default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    #[arg(long, env = env::LOG_FORMAT, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            environment: PRODUCTION.to_string(),
            allowed_origins: Vec::new(),
            credentials: CredentialsMode::default(),
            body_limit: DEFAULT_BODY_LIMIT,
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    pub fn runtime_mode(&self) -> RuntimeMode {
        RuntimeMode::from_environment(&self.environment)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.unwrap_or(DEFAULT_PORT))
    }

    pub fn allowed_origins(&self) -> Result<AllowedOriginSet, ValidationError> {
        let entries: Vec<&str> = self
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .collect();

        if entries.is_empty() {
            return Ok(DEFAULT_ALLOWED_ORIGINS.clone());
        }
        Ok(AllowedOriginSet::new(entries)?)
    }

    pub fn cors_options(&self) -> Result<CorsOptions, ValidationError> {
        Ok(CorsOptions {
            origins: self.allowed_origins()?,
            credentials: self.credentials,
            ..CorsOptions::default()
        })
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.environment.clone(), self.port)
            .with_package_agent(std::env::var(env::PACKAGE_AGENT).ok())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
