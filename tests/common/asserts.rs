use super::builders::TestResponse;
use super::headers::{header_value, vary_values};
use boundary_rs::constants::header;

pub fn assert_echoed(response: &TestResponse, origin: &str) {
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(origin),
        "expected origin to be echoed",
    );
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true"),
    );
    assert_fixed_policy_headers(response);
}

pub fn assert_wildcard(response: &TestResponse) {
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*"),
        "expected wildcard fallback",
    );
    assert_fixed_policy_headers(response);
}

pub fn assert_fixed_policy_headers(response: &TestResponse) {
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("GET, POST, PUT, DELETE, OPTIONS"),
    );
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("Origin, X-Requested-With, Content-Type, Accept, Authorization"),
    );
    assert_eq!(
        header_value(&response.headers, header::ACCESS_CONTROL_MAX_AGE),
        Some("86400"),
    );
    assert!(
        vary_values(&response.headers).contains(header::ORIGIN),
        "Vary must list Origin",
    );
}
