use axum::http::HeaderMap;
use boundary_rs::constants::header;
use std::collections::HashSet;

pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn has_header(headers: &HeaderMap, name: &str) -> bool {
    headers.contains_key(name)
}

pub fn vary_values(headers: &HeaderMap) -> HashSet<String> {
    headers
        .get_all(header::VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

pub fn cors_header_snapshot(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = headers
        .iter()
        .filter(|(name, _)| {
            name.as_str().starts_with("access-control-") || name.as_str() == "vary"
        })
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    entries.sort();
    entries
}
