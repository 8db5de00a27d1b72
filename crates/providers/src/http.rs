//! Request and response helpers shared by the provider clients.

use reqwest::Url;

/// `base` with `segments` appended to its path.
///
/// Each segment is percent-encoded on its own, so ids carrying `/`, `?`, `#`
/// or `%` stay inside the segment instead of changing the request target.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("invalid base URL '{base}': {e}"))?;
    url.path_segments_mut()
        .map_err(|()| format!("base URL '{base}' cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Split a response into `Ok(response)` for 2xx statuses, or the status code
/// and body text otherwise.
pub(crate) async fn split_failure(
    response: reqwest::Response,
) -> Result<reqwest::Response, (u16, String)> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err((status.as_u16(), body))
}
