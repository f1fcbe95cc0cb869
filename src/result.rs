use crate::constants::WILDCARD;

/// Value emitted in `Access-Control-Allow-Origin` for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowOrigin {
    /// The request's own origin, echoed back verbatim.
    Echo(String),
    Wildcard,
}

/// Per-request outcome of the origin policy.
///
/// Computed once when the request enters the pipeline, stored on the request
/// for later stages to read, and consumed by the header composer when the
/// response leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsDecision {
    allow_origin: AllowOrigin,
}

impl CorsDecision {
    pub fn echo<S: Into<String>>(origin: S) -> Self {
        Self {
            allow_origin: AllowOrigin::Echo(origin.into()),
        }
    }

    pub fn wildcard() -> Self {
        Self {
            allow_origin: AllowOrigin::Wildcard,
        }
    }

    pub fn origin_echoed(&self) -> bool {
        matches!(self.allow_origin, AllowOrigin::Echo(_))
    }

    pub fn origin_value(&self) -> &str {
        match &self.allow_origin {
            AllowOrigin::Echo(origin) => origin,
            AllowOrigin::Wildcard => WILDCARD,
        }
    }

    pub fn allow_origin(&self) -> &AllowOrigin {
        &self.allow_origin
    }

    pub fn into_allow_origin(self) -> AllowOrigin {
        self.allow_origin
    }
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
