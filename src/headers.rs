use crate::constants::{WILDCARD, header};
use crate::policy::CorsPolicy;
use crate::result::{AllowOrigin, CorsDecision};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, VARY,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;
use std::sync::Arc;

/// Ordered set of access-control headers ready to be written to a response.
#[derive(Debug, Default, Clone)]
pub struct HeaderCollection {
    headers: IndexMap<HeaderName, HeaderValue>,
    vary: Vec<String>,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: HeaderName, value: HeaderValue) {
        if name == VARY {
            if let Ok(value) = value.to_str() {
                self.add_vary(value);
            }
        } else {
            self.headers.insert(name, value);
        }
    }

    pub fn add_vary<S: AsRef<str>>(&mut self, value: S) {
        for entry in split_vary(value.as_ref()) {
            if !self
                .vary
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(entry))
            {
                self.vary.push(entry.to_string());
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&HeaderValue> {
        if name.eq_ignore_ascii_case(VARY.as_str()) {
            return None;
        }
        self.headers
            .iter()
            .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn vary(&self) -> &[String] {
        &self.vary
    }

    pub(crate) fn len(&self) -> usize {
        self.headers.len() + usize::from(!self.vary.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter()
    }

    /// Writes the collection onto `map`. Access-control headers replace any
    /// value a handler set; `Vary` entries are merged with existing ones.
    pub fn apply(self, map: &mut HeaderMap) {
        for (name, value) in self.headers {
            map.insert(name, value);
        }

        if self.vary.is_empty() {
            return;
        }

        let mut merged: Vec<String> = map
            .get_all(VARY)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(split_vary)
            .map(str::to_string)
            .collect();
        for entry in self.vary {
            if !merged
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(&entry))
            {
                merged.push(entry);
            }
        }

        if let Ok(value) = HeaderValue::from_str(&merged.join(", ")) {
            map.insert(VARY, value);
        }
    }
}

fn split_vary(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Renders the access-control header set for a [`CorsDecision`].
#[derive(Debug, Clone)]
pub struct ResponseHeaderComposer {
    policy: Arc<CorsPolicy>,
}

impl ResponseHeaderComposer {
    pub fn new(policy: Arc<CorsPolicy>) -> Self {
        Self { policy }
    }

    /// Consumes the decision; each request composes its headers once.
    pub fn compose(&self, decision: CorsDecision) -> HeaderCollection {
        let mut headers = HeaderCollection::new();
        let sends_credentials = self.policy.sends_credentials(&decision);

        headers.push(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin_value(decision));
        headers.push(
            ACCESS_CONTROL_ALLOW_METHODS,
            self.policy.methods_value().clone(),
        );
        headers.push(
            ACCESS_CONTROL_ALLOW_HEADERS,
            self.policy.allowed_headers_value().clone(),
        );
        if sends_credentials {
            headers.push(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        headers.push(ACCESS_CONTROL_MAX_AGE, self.policy.max_age_value().clone());
        headers.add_vary(header::ORIGIN);

        headers
    }
}

fn allow_origin_value(decision: CorsDecision) -> HeaderValue {
    match decision.into_allow_origin() {
        // Allow-list members are validated as header values on construction.
        AllowOrigin::Echo(origin) => HeaderValue::from_str(&origin)
            .unwrap_or_else(|_| HeaderValue::from_static(WILDCARD)),
        AllowOrigin::Wildcard => HeaderValue::from_static(WILDCARD),
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
