/// Pull the opaque token out of an `Authorization` header value.
///
/// Accepts both `Bearer <token>` and a bare token with no scheme word:
/// exactly two whitespace-separated parts mean scheme + token (take the
/// second), anything else falls back to the first part. No further format
/// validation; the provider decides what the token means.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [] => None,
        [_, token] => Some(*token),
        [first, ..] => Some(*first),
    }
}
