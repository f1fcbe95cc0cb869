pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

pub mod media {
    pub const JSON: &str = "application/json";
    pub const JSON_SUFFIX: &str = "+json";
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
}

pub mod env {
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "BOUNDARY_HOST";
    pub const ENVIRONMENT: &str = "APP_ENV";
    pub const ALLOWED_ORIGINS: &str = "BOUNDARY_ALLOWED_ORIGINS";
    pub const CREDENTIALS: &str = "BOUNDARY_CREDENTIALS";
    pub const BODY_LIMIT: &str = "BOUNDARY_BODY_LIMIT";
    pub const LOG_FORMAT: &str = "BOUNDARY_LOG_FORMAT";
    pub const PACKAGE_AGENT: &str = "npm_config_user_agent";
}

pub const WILDCARD: &str = "*";
pub const DEFAULT_MAX_AGE_SECS: u64 = 86_400;
pub const DEFAULT_PORT: u16 = 5002;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;
pub const DEVELOPMENT: &str = "development";
pub const PRODUCTION: &str = "production";
