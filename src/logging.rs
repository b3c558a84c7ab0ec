//! Logging for outbound requests and the responses they receive.

use crate::request::Method;

/// Request and response bodies longer than this many bytes are truncated in
/// `info` logs and logged in full at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The form fields whose values must never be written to the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "password_confirmation"];

/// Log an outbound request at the `info` level.
///
/// The values of password fields in `data` are replaced with asterisks.
pub(crate) fn log_request(method: Method, url: &str, data: &[(String, String)]) {
    let data_text = serde_urlencoded::to_string(data).unwrap_or_default();
    let data_text = REDACTED_FIELDS
        .iter()
        .fold(data_text, |text, field_name| redact_field(&text, field_name));

    if data_text.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending request: {method} {url}\ndata: {}...",
            truncate(&data_text)
        );
        tracing::debug!("Full request data: {data_text:?}");
    } else {
        tracing::info!("Sending request: {method} {url}\ndata: {data_text:?}");
    }
}

/// Log the body of a response at the `info` level.
pub(crate) fn log_response(method: Method, url: &str, status: u16, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received response to {method} {url}: {status}\nbody: {}...",
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Received response to {method} {url}: {status}\nbody: {body:?}");
    }
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let needle = format!("{field_name}=");
    let start = match form_text.find(&needle) {
        // Only match whole field names, e.g. not "old_password=".
        Some(position) if position == 0 || form_text[..position].ends_with('&') => position,
        _ => return form_text.to_string(),
    };

    let end = match form_text[start..].find('&') {
        Some(end) => start + end,
        None => form_text.len(),
    };
    let field = &form_text[start..end];

    form_text.replace(field, &format!("{field_name}=********"))
}

/// Cut `text` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
