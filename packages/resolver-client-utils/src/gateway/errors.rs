use crate::common::error::ResolverError;

impl From<reqwest::Error> for ResolverError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ResolverError::ParseError(value.to_string())
        } else {
            ResolverError::ClientError(value.to_string())
        }
    }
}

impl From<serde_json::error::Error> for ResolverError {
    fn from(value: serde_json::error::Error) -> Self {
        ResolverError::ParseError(value.to_string())
    }
}

/// picks the most readable message out of an error response body.
///
/// json bodies carrying `message` or `error` win, anything else is used as
/// plain text. an empty body falls back to the http status line.
pub(crate) fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key) {
                return message.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("resolver returned {status}")
    } else {
        body.to_string()
    }
}
