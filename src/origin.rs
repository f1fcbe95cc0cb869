use crate::constants::WILDCARD;
use crate::result::CorsDecision;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Origins trusted by the service when no override is configured.
pub static DEFAULT_ALLOWED_ORIGINS: Lazy<AllowedOriginSet> = Lazy::new(|| {
    AllowedOriginSet::from_trusted([
        "https://food-security.net",
        "https://food-security-front.azurewebsites.net",
        "http://localhost:3000",
        "http://localhost:3001",
    ])
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OriginError {
    #[error("allowed origin entries must not be empty")]
    Empty,
    #[error("the wildcard origin '*' cannot be part of an allow-list")]
    Wildcard,
    #[error("allowed origin '{0}' contains characters that are not valid in a header value")]
    InvalidCharacters(String),
}

/// Immutable allow-list of origins, compared by exact, case-sensitive match.
///
/// Built once at startup and shared read-only by every request. Insertion
/// order is kept so the list logs the way it was configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOriginSet {
    origins: IndexSet<String>,
}

impl AllowedOriginSet {
    pub fn new<I, S>(origins: I) -> Result<Self, OriginError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for origin in origins {
            let origin = origin.into();
            validate_origin(&origin)?;
            set.insert(origin);
        }
        Ok(Self { origins: set })
    }

    fn from_trusted<const N: usize>(origins: [&str; N]) -> Self {
        Self {
            origins: origins.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.contains(origin)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    /// Decides how the request's origin is reflected. Total over all inputs:
    /// a member is echoed back, anything else (absent, empty, unknown) falls
    /// back to the wildcard.
    pub fn evaluate(&self, origin: Option<&str>) -> CorsDecision {
        match origin {
            Some(origin) if !origin.is_empty() && self.contains(origin) => {
                CorsDecision::echo(origin)
            }
            _ => CorsDecision::wildcard(),
        }
    }
}

fn validate_origin(origin: &str) -> Result<(), OriginError> {
    if origin.trim().is_empty() {
        return Err(OriginError::Empty);
    }
    if origin == WILDCARD {
        return Err(OriginError::Wildcard);
    }
    if !origin.bytes().all(|byte| byte.is_ascii_graphic()) {
        return Err(OriginError::InvalidCharacters(origin.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
