use axum::http::{header, HeaderMap};
use tracing::error;

use api_errors::ProblemResponse;

use crate::api::rest::error::ACCOUNTS_UNSUPPORTED_MEDIA_TYPE;

/// Reject the request unless `Content-Type` is exactly `expected`.
/// A missing header counts as a mismatch.
pub fn check_content_type(
    headers: &HeaderMap,
    expected: &str,
    instance: &str,
) -> Result<(), ProblemResponse> {
    let received = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap_or("<non-ascii>"));

    if received == Some(expected) {
        return Ok(());
    }

    error!("Invalid Content-Type: {}", received.unwrap_or("<none>"));
    Err(ACCOUNTS_UNSUPPORTED_MEDIA_TYPE.respond(
        format!("Content-Type must be {expected}"),
        instance,
    ))
}
