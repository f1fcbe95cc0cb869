use crate::auth::{Authenticator, EchoAuthenticator};
use crate::boundary::ErrorBoundary;
use crate::config::{RuntimeMode, ServiceConfig};
use crate::constants::DEFAULT_BODY_LIMIT;
use crate::diagnostics::Diagnostics;
use crate::headers::ResponseHeaderComposer;
use crate::policy::{CorsPolicy, ValidationError};
use crate::preflight::PreflightResponder;
use std::sync::Arc;

/// Read-only values shared by every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<CorsPolicy>,
    composer: ResponseHeaderComposer,
    preflight: PreflightResponder,
    boundary: ErrorBoundary,
    diagnostics: Arc<Diagnostics>,
    authenticator: Arc<dyn Authenticator>,
    body_limit: usize,
}

impl AppState {
    pub fn new(policy: CorsPolicy, mode: RuntimeMode, diagnostics: Diagnostics) -> Self {
        let policy = Arc::new(policy);
        let diagnostics = Arc::new(diagnostics);
        let composer = ResponseHeaderComposer::new(Arc::clone(&policy));

        Self {
            preflight: PreflightResponder::new(composer.clone()),
            composer,
            policy,
            boundary: ErrorBoundary::new(mode),
            authenticator: Arc::new(EchoAuthenticator::new(Arc::clone(&diagnostics))),
            diagnostics,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ValidationError> {
        let policy = CorsPolicy::new(config.cors_options()?)?;
        Ok(Self::new(policy, config.runtime_mode(), config.diagnostics())
            .with_body_limit(config.body_limit))
    }

    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn policy(&self) -> &CorsPolicy {
        &self.policy
    }

    pub fn composer(&self) -> &ResponseHeaderComposer {
        &self.composer
    }

    pub fn preflight(&self) -> &PreflightResponder {
        &self.preflight
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}
