use crate::headers::ResponseHeaderComposer;
use crate::pipeline::PipelineState;
use crate::result::CorsDecision;
use axum::body::Body;
use axum::http::StatusCode;
use axum::response::Response;

/// Answers an `OPTIONS` probe without consulting any later stage.
#[derive(Debug, Clone)]
pub struct PreflightResponder {
    composer: ResponseHeaderComposer,
}

impl PreflightResponder {
    pub fn new(composer: ResponseHeaderComposer) -> Self {
        Self { composer }
    }

    /// `200`, empty body, full access-control header set.
    pub fn respond(&self, decision: CorsDecision) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::OK;
        self.composer
            .compose(decision)
            .apply(response.headers_mut());
        response
            .extensions_mut()
            .insert(PipelineState::PreflightResponded);
        response
    }
}

#[cfg(test)]
#[path = "preflight_test.rs"]
mod preflight_test;
