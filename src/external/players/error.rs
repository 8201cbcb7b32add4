use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a call to the player service.
///
/// The `Display` form is the human-readable message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection, timeout, TLS)
    #[error("{message}")]
    Transport { message: String, detail: String },

    /// The server rejected the payload with a field -> message map
    #[error("{}", join_field_errors(.fields))]
    Validation {
        status: u16,
        fields: BTreeMap<String, String>,
    },

    /// Any other non-success response
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// A success response whose body could not be read
    #[error("{message}")]
    Decode { message: String, detail: String },

    /// Rejected locally before any I/O
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

fn join_field_errors(fields: &BTreeMap<String, String>) -> String {
    fields.values().cloned().collect::<Vec<_>>().join(", ")
}

/// Longest plain-text error body shown verbatim.
const MAX_TEXT_BODY: usize = 300;

impl FetchError {
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        FetchError::Server {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn transport(fallback: &str, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("{} The server did not respond in time.", fallback)
        } else {
            fallback.to_string()
        };
        FetchError::Transport {
            message,
            detail: error.to_string(),
        }
    }

    pub(crate) fn decode(fallback: &str, detail: impl ToString) -> Self {
        FetchError::Decode {
            message: fallback.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Interpret a non-success response body.
    ///
    /// A JSON object of strings is a validation map, a Spring-style error
    /// object contributes its `message`, a JSON string or short plain text is
    /// used as is, and anything else falls back to `fallback`.
    pub(crate) fn from_response(status: StatusCode, body: &str, fallback: &str) -> Self {
        let code = status.as_u16();
        let text = body.trim();
        if text.is_empty() {
            return FetchError::server(Some(code), fallback);
        }

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => {
                if map.contains_key("status") && map.contains_key("error") {
                    let message = map
                        .get("message")
                        .and_then(Value::as_str)
                        .filter(|m| !m.trim().is_empty())
                        .or_else(|| map.get("error").and_then(Value::as_str))
                        .unwrap_or(fallback);
                    return FetchError::server(Some(code), message);
                }

                let fields: Option<BTreeMap<String, String>> = map
                    .iter()
                    .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect();
                match fields {
                    Some(fields) if !fields.is_empty() => FetchError::Validation {
                        status: code,
                        fields,
                    },
                    _ => FetchError::server(Some(code), fallback),
                }
            }
            Ok(Value::String(s)) if !s.trim().is_empty() => FetchError::server(Some(code), s),
            Ok(_) => FetchError::server(Some(code), fallback),
            Err(_) if text.len() <= MAX_TEXT_BODY && !text.starts_with('<') => {
                FetchError::server(Some(code), text)
            }
            Err(_) => FetchError::server(Some(code), fallback),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Validation { status, .. } => Some(*status),
            FetchError::Server { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Field-level messages when the server returned a validation map.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FetchError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}
