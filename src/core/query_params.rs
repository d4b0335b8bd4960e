use std::collections::HashMap;

/// Parse query parameters from a URI string
///
/// Handles URL decoding and returns a HashMap of parameter key-value pairs.
/// Multiple values for the same key are not supported (only the last is kept).
/// A `#fragment` after the query is ignored.
///
/// # Example
/// ```
/// use skillplus::core::query_params::parse_query_params;
///
/// let params = parse_query_params("/oauth-success?token=abc%3D&next=home");
/// assert_eq!(params.get("token"), Some(&"abc=".to_string()));
/// assert_eq!(params.get("next"), Some(&"home".to_string()));
/// ```
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    let Some(query_start) = uri.find('?') else {
        return params;
    };
    let query = &uri[query_start + 1..];
    let query = query.split('#').next().unwrap_or_default();

    for param in query.split('&').filter(|p| !p.is_empty()) {
        if let Some(eq_idx) = param.find('=') {
            let key = &param[..eq_idx];
            let encoded_value = &param[eq_idx + 1..];
            let plus_decoded = encoded_value.replace('+', " ");
            let decoded = urlencoding::decode(&plus_decoded)
                .map(|v| v.into_owned())
                .unwrap_or(plus_decoded.clone());
            params.insert(key.to_string(), decoded);
        } else {
            // Flag parameter without value
            params.insert(param.to_string(), String::new());
        }
    }

    params
}

/// Get a non-empty string parameter from parsed query params
pub fn get_string(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|s| !s.trim().is_empty()).cloned()
}
