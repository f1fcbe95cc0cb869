//! Seam to the login collaborator.
//!
//! The pipeline never inspects credentials. Whatever status and body the
//! [`Authenticator`] produces is returned to the caller as-is, and any
//! [`AuthError`] is handed to the error boundary.

use crate::diagnostics::{Diagnostics, timestamp};
use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

/// Credentials as submitted. Fields keep whatever JSON type the client sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub status: StatusCode,
    pub body: Value,
}

impl LoginOutcome {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
    #[error("authentication failed unexpectedly: {0}")]
    Internal(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: LoginRequest) -> Result<LoginOutcome, AuthError>;
}

/// Stand-in that accepts any credentials and echoes the username.
#[derive(Debug, Clone)]
pub struct EchoAuthenticator {
    diagnostics: Arc<Diagnostics>,
}

impl EchoAuthenticator {
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self { diagnostics }
    }
}

#[async_trait]
impl Authenticator for EchoAuthenticator {
    async fn authenticate(&self, request: LoginRequest) -> Result<LoginOutcome, AuthError> {
        Ok(LoginOutcome::ok(json!({
            "message": "Login endpoint working",
            "username": request.username,
            "timestamp": timestamp(),
            "nodeVersion": self.diagnostics.runtime_version(),
        })))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
