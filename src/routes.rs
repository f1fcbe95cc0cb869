use crate::auth::LoginRequest;
use crate::body::Payload;
use crate::boundary::BoundaryError;
use crate::diagnostics::timestamp;
use crate::state::AppState;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBody {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
    pub node_version: String,
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBody {
    pub node_version: String,
    pub npm_version: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeBody {
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    pub node_version: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/test", get(basic_probe))
        .route("/minimal-test", get(minimal_probe))
        .route("/html-test", get(html_probe))
        .route("/login", post(login))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let diagnostics = state.diagnostics();
    Json(HealthBody {
        status: "healthy".into(),
        timestamp: timestamp(),
        environment: diagnostics.environment().into(),
        node_version: diagnostics.runtime_version().into(),
        port: diagnostics.port_label(),
    })
}

pub async fn version(State(state): State<AppState>) -> Json<VersionBody> {
    let diagnostics = state.diagnostics();
    Json(VersionBody {
        node_version: diagnostics.runtime_version().into(),
        npm_version: diagnostics.package_agent_label().into(),
        version: env!("CARGO_PKG_VERSION").into(),
        environment: diagnostics.environment().into(),
        timestamp: timestamp(),
    })
}

async fn basic_probe(State(state): State<AppState>) -> Json<ProbeBody> {
    Json(ProbeBody {
        message: "Basic test endpoint working".into(),
        timestamp: timestamp(),
        status: None,
        node_version: state.diagnostics().runtime_version().into(),
    })
}

async fn minimal_probe(State(state): State<AppState>) -> Json<ProbeBody> {
    Json(ProbeBody {
        message: "Minimal test endpoint working".into(),
        timestamp: timestamp(),
        status: Some("success".into()),
        node_version: state.diagnostics().runtime_version().into(),
    })
}

async fn html_probe(State(state): State<AppState>) -> Html<String> {
    let diagnostics = state.diagnostics();
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <title>Boundary Test</title>\n</head>\n<body>\n  \
         <h1>Boundary Service Test</h1>\n  <p>Status: Working!</p>\n  <p>Version: {}</p>\n  \
         <p>Timestamp: {}</p>\n  <p>Environment: {}</p>\n</body>\n</html>\n",
        diagnostics.runtime_version(),
        timestamp(),
        diagnostics.environment(),
    ))
}

/// Hands credentials to the authenticator and returns its answer unchanged.
pub async fn login(
    State(state): State<AppState>,
    Payload(request): Payload<LoginRequest>,
) -> Result<Response, BoundaryError> {
    let outcome = state.authenticator().authenticate(request).await?;
    Ok((outcome.status, Json(outcome.body)).into_response())
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;
