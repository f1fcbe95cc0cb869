//! Ordered request pipeline.
//!
//! Layers, outermost first:
//!
//! 1. CORS stage: evaluates the origin once, answers preflights, and composes
//!    the access-control headers on whatever response comes back.
//! 2. Error stage: turns any failure or panic from the stages below into the
//!    `500` contract.
//! 3. Body-parse stage: decodes structured bodies.
//! 4. Routes, with the not-found handler as fallback.
//!
//! Because the CORS stage wraps every other stage, every terminal state
//! leaves through the header composer.

use crate::body::body_parse_stage;
use crate::boundary::{error_stage, not_found};
use crate::constants::header;
use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use tracing::Instrument;

/// Lifecycle of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Received,
    CorsEvaluated,
    PreflightResponded,
    BodyParsing,
    Routed,
    Handled,
    ErrorCaught,
    NotFound,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::PreflightResponded | Self::Handled | Self::ErrorCaught | Self::NotFound
        )
    }

    pub fn successors(self) -> &'static [PipelineState] {
        match self {
            Self::Received => &[Self::CorsEvaluated],
            Self::CorsEvaluated => &[Self::PreflightResponded, Self::BodyParsing],
            Self::BodyParsing => &[Self::Routed, Self::ErrorCaught],
            Self::Routed => &[Self::Handled, Self::ErrorCaught, Self::NotFound],
            Self::PreflightResponded | Self::Handled | Self::ErrorCaught | Self::NotFound => &[],
        }
    }

    pub fn can_advance_to(self, next: PipelineState) -> bool {
        self.successors().contains(&next)
    }

    /// Moves to `next`, tracing the transition.
    pub fn advance(self, next: PipelineState) -> PipelineState {
        debug_assert!(
            self.can_advance_to(next),
            "invalid pipeline transition {self:?} -> {next:?}"
        );
        tracing::trace!(from = ?self, to = ?next, "pipeline transition");
        next
    }

    /// Terminal state recorded on a response; plain handler responses carry
    /// no marker and count as handled.
    pub fn of(response: &Response) -> Self {
        response
            .extensions()
            .get::<PipelineState>()
            .copied()
            .unwrap_or(Self::Handled)
    }
}

/// First stage of every request.
pub async fn cors_stage(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let decision = state.policy().evaluate(origin.as_deref());
    let evaluated = PipelineState::Received.advance(PipelineState::CorsEvaluated);

    let span = tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        origin = origin.as_deref().unwrap_or(""),
        origin_echoed = decision.origin_echoed(),
    );

    if state.policy().is_preflight(request.method()) {
        let response = state.preflight().respond(decision);
        span.in_scope(|| {
            let terminal = evaluated.advance(PipelineState::PreflightResponded);
            tracing::debug!(state = ?terminal, "preflight answered")
        });
        return response;
    }

    evaluated.advance(PipelineState::BodyParsing);
    request.extensions_mut().insert(decision.clone());

    let mut response = next.run(request).instrument(span.clone()).await;
    let headers = state.composer().compose(decision);
    let header_count = headers.len();
    headers.apply(response.headers_mut());

    let terminal = PipelineState::of(&response);
    debug_assert!(terminal.is_terminal(), "{terminal:?} is not terminal");
    span.in_scope(|| {
        tracing::debug!(
            state = ?terminal,
            status = response.status().as_u16(),
            cors_headers = header_count,
            "request completed"
        )
    });
    response
}

/// Assembles the default routes and any extra ones into a served router.
pub struct RequestPipeline {
    state: AppState,
    routes: Router<AppState>,
}

impl RequestPipeline {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            routes: routes::router(),
        }
    }

    /// Routes without the diagnostic defaults.
    pub fn bare(state: AppState) -> Self {
        Self {
            state,
            routes: Router::new(),
        }
    }

    pub fn merge(mut self, routes: Router<AppState>) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_router(self) -> Router {
        let Self { state, routes } = self;

        routes
            .fallback(not_found)
            .method_not_allowed_fallback(not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                body_parse_stage,
            ))
            .layer(middleware::from_fn_with_state(state.clone(), error_stage))
            .layer(middleware::from_fn_with_state(state.clone(), cors_stage))
            .with_state(state)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
