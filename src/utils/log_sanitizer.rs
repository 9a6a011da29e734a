//! Masking of secrets before they reach the logs.

/// Replace the `user:password@` part of a connection URI with `***@`.
///
/// ```ignore
/// assert_eq!(
///     redact_uri_credentials("mongodb://admin:s3cret@db:27017/users"),
///     "mongodb://***@db:27017/users"
/// );
/// ```
pub fn redact_uri_credentials(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest_start = scheme_end + 3;
    let rest = &uri[rest_start..];

    // Credentials can only appear before the first path/query separator
    let authority_end = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}***{}", &uri[..rest_start], &rest[at..]),
        None => uri.to_string(),
    }
}
