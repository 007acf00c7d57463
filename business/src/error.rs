//! Errors returned by the users service and the shared error handler.

use serde::Deserialize;
use thiserror::Error;

use crate::http::{HttpError, Response};
use crate::notify::{Notifier, Severity};

/// Shown when an error carries no usable detail.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong.";

/// One entry of a server-side validation failure (`{"detail": [...]}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationDetail {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected individual fields.
    #[error("validation failed with status {status}: {}", first_message(details))]
    Validation {
        status: u16,
        details: Vec<ValidationDetail>,
    },
    /// Any other non-2xx status.
    #[error("server returned status {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a body we could not make sense of.
    #[error("unexpected response with status {status}: {message}")]
    Decode { status: u16, message: String },
    /// The request could not be built.
    #[error("could not encode request: {0}")]
    Encode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationDetail>),
    Other(serde::de::IgnoredAny),
}

fn first_message(details: &[ValidationDetail]) -> &str {
    details
        .first()
        .map(|d| d.msg.as_str())
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
}

impl ApiError {
    /// Builds the error for a non-2xx response.
    pub fn from_response(response: &Response) -> Self {
        let status = response.status;
        if response.body.is_empty() {
            return Self::Server {
                status,
                detail: None,
            };
        }

        match response.json::<ErrorBody>() {
            Ok(ErrorBody {
                detail: Some(Detail::Message(detail)),
            }) => Self::Server {
                status,
                detail: Some(detail),
            },
            Ok(ErrorBody {
                detail: Some(Detail::Validation(details)),
            }) => Self::Validation { status, details },
            Ok(ErrorBody {
                detail: Some(Detail::Other(_)) | None,
            }) => Self::Server {
                status,
                detail: None,
            },
            Err(err) => Self::Decode {
                status,
                message: err.to_string(),
            },
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. }
            | Self::Server { status, .. }
            | Self::Decode { status, .. } => Some(*status),
            Self::Transport(_) | Self::Encode(_) => None,
        }
    }

    /// Message to show to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { details, .. } => first_message(details).to_owned(),
            Self::Server {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            Self::Server { .. } | Self::Transport(_) | Self::Decode { .. } | Self::Encode(_) => {
                FALLBACK_ERROR_MESSAGE.to_owned()
            }
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message)
    }
}

/// Shared error presentation: logs `err` and shows it as an error toast.
pub fn handle_error(err: &ApiError, notifier: &dyn Notifier) {
    log::error!("Request failed: {err}");
    notifier.notify("Error", &err.user_message(), Severity::Error);
}
