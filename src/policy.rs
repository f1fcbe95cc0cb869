use crate::constants::{DEFAULT_MAX_AGE_SECS, header, method};
use crate::origin::{AllowedOriginSet, DEFAULT_ALLOWED_ORIGINS, OriginError};
use crate::result::CorsDecision;
use axum::http::{HeaderValue, Method};
use thiserror::Error;

/// When `Access-Control-Allow-Credentials: true` is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CredentialsMode {
    /// Only alongside an echoed origin; wildcard responses omit the header.
    #[default]
    Echoed,
    /// On every response, including wildcard ones.
    Always,
}

#[derive(Debug, Clone)]
pub struct CorsOptions {
    pub origins: AllowedOriginSet,
    pub methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub credentials: CredentialsMode,
    pub max_age: u64,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origins: DEFAULT_ALLOWED_ORIGINS.clone(),
            methods: vec![
                method::GET.into(),
                method::POST.into(),
                method::PUT.into(),
                method::DELETE.into(),
                method::OPTIONS.into(),
            ],
            allowed_headers: vec![
                header::ORIGIN.into(),
                header::X_REQUESTED_WITH.into(),
                header::CONTENT_TYPE.into(),
                header::ACCEPT.into(),
                header::AUTHORIZATION.into(),
            ],
            credentials: CredentialsMode::default(),
            max_age: DEFAULT_MAX_AGE_SECS,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Origin(#[from] OriginError),
    #[error("allowed methods must not be empty")]
    EmptyMethods,
    #[error("'{0}' is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("'{0}' is not a valid header name")]
    InvalidHeaderName(String),
}

/// Validated, immutable CORS policy shared by every request.
///
/// Fixed header values are rendered once at construction.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: AllowedOriginSet,
    credentials: CredentialsMode,
    methods_value: HeaderValue,
    allowed_headers_value: HeaderValue,
    max_age_value: HeaderValue,
}

impl CorsPolicy {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;

        let CorsOptions {
            origins,
            methods,
            allowed_headers,
            credentials,
            max_age,
        } = options;

        Ok(Self {
            origins,
            credentials,
            methods_value: join_header_value(&methods)?,
            allowed_headers_value: join_header_value(&allowed_headers)?,
            max_age_value: HeaderValue::from(max_age),
        })
    }

    pub fn origins(&self) -> &AllowedOriginSet {
        &self.origins
    }

    pub fn credentials(&self) -> CredentialsMode {
        self.credentials
    }

    pub fn evaluate(&self, origin: Option<&str>) -> CorsDecision {
        self.origins.evaluate(origin)
    }

    pub fn is_preflight(&self, method: &Method) -> bool {
        *method == Method::OPTIONS
    }

    pub(crate) fn methods_value(&self) -> &HeaderValue {
        &self.methods_value
    }

    pub(crate) fn allowed_headers_value(&self) -> &HeaderValue {
        &self.allowed_headers_value
    }

    pub(crate) fn max_age_value(&self) -> &HeaderValue {
        &self.max_age_value
    }

    pub(crate) fn sends_credentials(&self, decision: &CorsDecision) -> bool {
        match self.credentials {
            CredentialsMode::Always => true,
            CredentialsMode::Echoed => decision.origin_echoed(),
        }
    }
}

impl CorsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.methods.is_empty() {
            return Err(ValidationError::EmptyMethods);
        }
        for method in &self.methods {
            Method::from_bytes(method.as_bytes())
                .map_err(|_| ValidationError::InvalidMethod(method.clone()))?;
        }
        for name in &self.allowed_headers {
            axum::http::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ValidationError::InvalidHeaderName(name.clone()))?;
        }
        for origin in self.origins.iter() {
            if HeaderValue::from_str(origin).is_err() {
                return Err(OriginError::InvalidCharacters(origin.to_string()).into());
            }
        }
        Ok(())
    }
}

fn join_header_value(values: &[String]) -> Result<HeaderValue, ValidationError> {
    let joined = values.join(", ");
    HeaderValue::from_str(&joined).map_err(|_| ValidationError::InvalidHeaderName(joined))
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
