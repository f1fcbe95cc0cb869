use chrono::{SecondsFormat, Utc};

const PORT_NOT_SET: &str = "not set";
const AGENT_UNKNOWN: &str = "unknown";

/// Values reported by the diagnostic endpoints, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    environment: String,
    port: Option<u16>,
    runtime_version: String,
    package_agent: Option<String>,
}

impl Diagnostics {
    pub fn new<S: Into<String>>(environment: S, port: Option<u16>) -> Self {
        Self {
            environment: environment.into(),
            port,
            runtime_version: format!("v{}", env!("CARGO_PKG_VERSION")),
            package_agent: None,
        }
    }

    /// User agent of the package manager that launched the service, if any.
    pub fn with_package_agent(mut self, agent: Option<String>) -> Self {
        self.package_agent = agent.filter(|agent| !agent.trim().is_empty());
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    pub fn package_agent_label(&self) -> &str {
        self.package_agent.as_deref().unwrap_or(AGENT_UNKNOWN)
    }

    /// Configured port, or `"not set"` when the service fell back to its default.
    pub fn port_label(&self) -> String {
        self.port
            .map(|port| port.to_string())
            .unwrap_or_else(|| PORT_NOT_SET.to_string())
    }
}

/// Current UTC time in RFC 3339 with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_label_reports_configured_port() {
        let diagnostics = Diagnostics::new("production", Some(8080));
        assert_eq!(diagnostics.port_label(), "8080");
    }

    #[test]
    fn port_label_reports_not_set_without_port() {
        let diagnostics = Diagnostics::new("production", None);
        assert_eq!(diagnostics.port_label(), "not set");
    }

    #[test]
    fn runtime_version_is_prefixed_crate_version() {
        let diagnostics = Diagnostics::new("development", None);
        assert_eq!(
            diagnostics.runtime_version(),
            concat!("v", env!("CARGO_PKG_VERSION"))
        );
        assert_eq!(diagnostics.environment(), "development");
    }

    #[test]
    fn package_agent_label_falls_back_to_unknown() {
        let launched = Diagnostics::new("production", None)
            .with_package_agent(Some("npm/10.2.4 node/v20.11.0 linux x64".into()));
        let blank = Diagnostics::new("production", None).with_package_agent(Some("  ".into()));

        assert_eq!(launched.package_agent_label(), "npm/10.2.4 node/v20.11.0 linux x64");
        assert_eq!(blank.package_agent_label(), "unknown");
        assert_eq!(Diagnostics::new("production", None).package_agent_label(), "unknown");
    }

    #[test]
    fn timestamp_is_utc_with_millis() {
        let value = timestamp();
        assert!(value.ends_with('Z'), "{value}");
        assert_eq!(value.len(), "2024-01-01T00:00:00.000Z".len());
    }
}
