use crate::auth::AuthError;
use crate::config::RuntimeMode;
use crate::pipeline::PipelineState;
use crate::result::CorsDecision;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const REDACTED_ERROR_DETAIL: &str = "Something went wrong";
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Failures raised by any stage after origin evaluation.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("invalid request body: {0}")]
    BodyParse(String),
    #[error("request body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Handler(String),
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl BoundaryError {
    pub fn handler<S: Into<String>>(message: S) -> Self {
        Self::Handler(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::BodyParse(_) | Self::BodyTooLarge { .. } => "body_parse",
            Self::Auth(_) => "auth",
            Self::Handler(_) => "handler",
            Self::Panic(_) => "panic",
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Panic(message)
    }
}

/// A failure travelling outward on a response until the error stage renders it.
#[derive(Debug, Clone)]
pub struct Failure(Arc<BoundaryError>);

impl Failure {
    pub fn error(&self) -> &BoundaryError {
        &self.0
    }
}

impl From<BoundaryError> for Failure {
    fn from(error: BoundaryError) -> Self {
        Self(Arc::new(error))
    }
}

impl IntoResponse for BoundaryError {
    // Bare 500; the error stage renders the body.
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(Failure::from(self));
        response.extensions_mut().insert(PipelineState::ErrorCaught);
        response
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundBody {
    pub message: String,
    pub path: String,
}

/// Renders uncaught failures into the public `500` contract.
#[derive(Debug, Clone, Copy)]
pub struct ErrorBoundary {
    mode: RuntimeMode,
}

impl ErrorBoundary {
    pub fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    pub fn body_for(&self, error: &BoundaryError) -> ErrorBody {
        let detail = if self.mode.exposes_error_detail() {
            error.to_string()
        } else {
            REDACTED_ERROR_DETAIL.to_string()
        };
        ErrorBody {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            error: detail,
        }
    }

    pub fn render(&self, failure: &Failure, method: &Method, path: &str) -> Response {
        let error = failure.error();
        tracing::error!(
            %method,
            path,
            kind = error.kind(),
            error = %error,
            "request failed"
        );

        let mut response =
            (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body_for(error))).into_response();
        response.extensions_mut().insert(PipelineState::ErrorCaught);
        response
    }
}

/// Funnels every failure of the inner stages, including panics, into the
/// [`ErrorBoundary`].
pub async fn error_stage(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let failure = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => match response.extensions().get::<Failure>() {
            Some(failure) => failure.clone(),
            None => return response,
        },
        Err(payload) => Failure::from(BoundaryError::from_panic(payload)),
    };

    state.boundary().render(&failure, &method, &path)
}

/// Fallback for any request no route claimed, whatever its method.
pub async fn not_found(request: Request) -> Response {
    let uri = request.uri();
    let path = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| uri.path())
        .to_string();
    let origin_echoed = request
        .extensions()
        .get::<CorsDecision>()
        .map(CorsDecision::origin_echoed);

    tracing::debug!(method = %request.method(), path, ?origin_echoed, "no route matched");

    let body = NotFoundBody {
        message: NOT_FOUND_MESSAGE.to_string(),
        path,
    };
    let mut response = (StatusCode::NOT_FOUND, Json(body)).into_response();
    response.extensions_mut().insert(PipelineState::NotFound);
    response
}

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;
