use std::collections::HashMap;

use crate::config::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use crate::core::pagination::PageRequest;

/// Parse a raw query string (`page=2&limit=5`) into key/value pairs.
///
/// Handles URL decoding. Multiple values for the same key are not supported
/// (only the last is kept). A leading `?` is tolerated.
///
/// # Example
/// ```
/// use feedline::core::query_params::parse_query_params;
/// let params = parse_query_params("page=2&full=true");
/// assert_eq!(params.get("page"), Some(&"2".to_string()));
/// assert_eq!(params.get("full"), Some(&"true".to_string()));
/// ```
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let query = query.strip_prefix('?').unwrap_or(query);

    for param in query.split('&').filter(|p| !p.is_empty()) {
        if let Some(eq_idx) = param.find('=') {
            let key = &param[..eq_idx];
            let encoded_value = &param[eq_idx + 1..];
            let decoded = urlencoding::decode(encoded_value)
                .unwrap_or(std::borrow::Cow::Borrowed(encoded_value))
                .to_string();
            params.insert(key.to_string(), decoded);
        } else {
            // Flag parameter without value
            params.insert(param.to_string(), String::new());
        }
    }

    params
}

/// Get a boolean flag parameter (e.g., ?full=true)
pub fn get_bool_flag(params: &HashMap<String, String>, key: &str) -> bool {
    params.get(key).map(|v| v == "true").unwrap_or(false)
}

/// Get a signed integer parameter, falling back to `default` when absent or
/// unparsable. Range checks are left to the caller.
pub fn get_int(params: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    params
        .get(key)
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Read `page` and `limit`, clamped to at least 1.
pub fn get_page_request(params: &HashMap<String, String>) -> PageRequest {
    PageRequest::new(
        get_int(params, "page", DEFAULT_PAGE),
        get_int(params, "limit", DEFAULT_PAGE_LIMIT),
    )
}
