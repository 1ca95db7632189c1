//! Redirect-location construction.

use url::form_urlencoded;

/// Builds the redirect location for a resolved deployment entry point.
///
/// The originally-requested path travels in the routing marker parameter;
/// every other query parameter survives the hop (any stray marker from a
/// previous hop is dropped), and the hash is appended verbatim. Works
/// whether or not `entry_path` already carries a query string.
pub fn build_redirect_location(
    entry_path: &str,
    original_pathname: &str,
    search: &str,
    hash: &str,
    marker_param: &str,
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(marker_param, original_pathname);
    for (key, value) in form_urlencoded::parse(search.trim_start_matches('?').as_bytes()) {
        if key != marker_param {
            serializer.append_pair(&key, &value);
        }
    }
    let query = serializer.finish();

    let joiner = if entry_path.contains('?') { '&' } else { '?' };
    format!("{}{}{}{}", entry_path, joiner, query, hash)
}
