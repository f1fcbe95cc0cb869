use crate::boundary::BoundaryError;
use crate::constants::media;
use crate::pipeline::PipelineState;
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error as _;

/// Structured body decoded by the body-parse stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody(pub Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
}

impl BodyKind {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == media::JSON || essence.ends_with(media::JSON_SUFFIX) {
            Some(Self::Json)
        } else if essence == media::FORM_URLENCODED {
            Some(Self::Form)
        } else {
            None
        }
    }

    pub fn parse(self, bytes: &[u8]) -> Result<Value, BoundaryError> {
        if bytes.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        match self {
            Self::Json => parse_json(bytes),
            Self::Form => Ok(parse_form(bytes)),
        }
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, BoundaryError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| BoundaryError::BodyParse(err.to_string()))?;

    // Strict: only objects and arrays are accepted at the top level.
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(BoundaryError::BodyParse(format!(
            "top-level JSON value must be an object or array, got {}",
            json_type_name(&other)
        ))),
    }
}

fn parse_form(bytes: &[u8]) -> Value {
    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let value = Value::String(value.into_owned());
        match fields.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key.into_owned(), value);
            }
        }
    }
    Value::Object(fields)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<LengthLimitError>() {
            return true;
        }
        source = cause.source();
    }
    false
}

async fn read_body(request: Request, limit: usize) -> Result<Request, BoundaryError> {
    let Some(kind) = BodyKind::from_headers(request.headers()) else {
        return Ok(request);
    };

    let (mut parts, body) = request.into_parts();
    let bytes: Bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|err| {
            if exceeds_limit(&err) {
                BoundaryError::BodyTooLarge { limit }
            } else {
                BoundaryError::BodyParse(err.to_string())
            }
        })?;
    let value = kind.parse(&bytes)?;

    parts.extensions.insert(ParsedBody(value));
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Decodes JSON and urlencoded bodies before routing; failures are handed to
/// the error boundary.
pub async fn body_parse_stage(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let parsing = PipelineState::BodyParsing;
    match read_body(request, state.body_limit()).await {
        Ok(request) => {
            let routed = parsing.advance(PipelineState::Routed);
            let response = next.run(request).await;
            routed.advance(PipelineState::of(&response));
            response
        }
        Err(err) => {
            parsing.advance(PipelineState::ErrorCaught);
            err.into_response()
        }
    }
}

/// Typed view of the parsed request body. Requests without a structured body
/// deserialize from an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequestParts<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BoundaryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .extensions
            .get::<ParsedBody>()
            .map(|ParsedBody(value)| value.clone())
            .unwrap_or_else(|| Value::Object(Map::new()));

        serde_json::from_value(value)
            .map(Payload)
            .map_err(|err| BoundaryError::BodyParse(err.to_string()))
    }
}

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;
