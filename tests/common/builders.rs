use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use boundary_rs::constants::header;
use boundary_rs::{
    AllowedOriginSet, AppState, Authenticator, CorsOptions, CorsPolicy, CredentialsMode,
    Diagnostics, PipelineState, RequestPipeline, RuntimeMode,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

pub struct PipelineBuilder {
    origins: Option<Vec<String>>,
    credentials: CredentialsMode,
    mode: RuntimeMode,
    body_limit: Option<usize>,
    authenticator: Option<Arc<dyn Authenticator>>,
    routes: Router<AppState>,
    defaults: bool,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            origins: None,
            credentials: CredentialsMode::default(),
            mode: RuntimeMode::Production,
            body_limit: None,
            authenticator: None,
            routes: Router::new(),
            defaults: true,
        }
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    pub fn development(mut self) -> Self {
        self.mode = RuntimeMode::Development;
        self
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = Some(limit);
        self
    }

    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn routes(mut self, routes: Router<AppState>) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    pub fn without_default_routes(mut self) -> Self {
        self.defaults = false;
        self
    }

    pub fn build(self) -> Router {
        let mut options = CorsOptions {
            credentials: self.credentials,
            ..CorsOptions::default()
        };
        if let Some(origins) = self.origins {
            options.origins = AllowedOriginSet::new(origins).expect("valid allow-list");
        }
        let environment = match self.mode {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
        };

        let mut state = AppState::new(
            CorsPolicy::new(options).expect("valid CORS configuration"),
            self.mode,
            Diagnostics::new(environment, Some(5002)),
        );
        if let Some(limit) = self.body_limit {
            state = state.with_body_limit(limit);
        }
        if let Some(authenticator) = self.authenticator {
            state = state.with_authenticator(authenticator);
        }

        let pipeline = if self.defaults {
            RequestPipeline::new(state)
        } else {
            RequestPipeline::bare(state)
        };
        pipeline.merge(self.routes).into_router()
    }
}

pub struct RequestBuilder {
    method: Method,
    uri: String,
    origin: Option<String>,
    content_type: Option<String>,
    body: Body,
}

impl RequestBuilder {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            origin: None,
            content_type: None,
            body: Body::empty(),
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn json(mut self, body: impl Into<String>) -> Self {
        self.content_type = Some("application/json".into());
        self.body = Body::from(body.into());
        self
    }

    pub fn form(mut self, body: impl Into<String>) -> Self {
        self.content_type = Some("application/x-www-form-urlencoded".into());
        self.body = Body::from(body.into());
        self
    }

    pub async fn send(self, router: &Router) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(origin) = self.origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(self.body).expect("valid request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let state = PipelineState::of(&response);
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("readable body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
            state,
        }
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub state: PipelineState,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub fn pipeline() -> PipelineBuilder {
    PipelineBuilder::new()
}

pub fn get(uri: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new(Method::GET, uri)
}

pub fn post(uri: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new(Method::POST, uri)
}

pub fn options(uri: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new(Method::OPTIONS, uri)
}

pub fn request(method: Method, uri: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new(method, uri)
}
