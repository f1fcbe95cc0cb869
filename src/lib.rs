pub mod auth;
pub mod body;
pub mod boundary;
pub mod config;
pub mod constants;
pub mod diagnostics;
mod headers;
mod origin;
pub mod pipeline;
mod policy;
mod preflight;
mod result;
pub mod routes;
mod state;
pub mod telemetry;

pub use auth::{AuthError, Authenticator, EchoAuthenticator, LoginOutcome, LoginRequest};
pub use body::{BodyKind, ParsedBody, Payload};
pub use boundary::{BoundaryError, ErrorBody, ErrorBoundary, Failure, NotFoundBody};
pub use config::{RuntimeMode, ServiceConfig};
pub use diagnostics::Diagnostics;
pub use headers::{HeaderCollection, ResponseHeaderComposer};
pub use origin::{AllowedOriginSet, DEFAULT_ALLOWED_ORIGINS, OriginError};
pub use pipeline::{PipelineState, RequestPipeline};
pub use policy::{CorsOptions, CorsPolicy, CredentialsMode, ValidationError};
pub use preflight::PreflightResponder;
pub use result::{AllowOrigin, CorsDecision};
pub use state::AppState;
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
