use shared::{domain::EmployeeId, error::ProtocolError};
use thiserror::Error;

/// Failures that are not field-scoped: the exchange itself broke or the
/// server answered with something other than a page or a validation body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },
    #[error("request to {path} timed out")]
    Timeout { path: String },
    #[error("server returned {status}{}", detail_suffix(.message))]
    Server { status: u16, message: Option<String> },
    #[error("invalid page payload: {0}")]
    Decode(#[from] ProtocolError),
    #[error("gave up after {0} redirects")]
    TooManyRedirects(usize),
    #[error("redirect from {path} carried no location")]
    MissingLocation { path: String },
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl TransportError {
    /// Message suitable for a flash banner or a form-level failure line.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            TransportError::Network { .. } | TransportError::Timeout { .. } => {
                "Unable to reach the server. Please try again.".to_string()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("the current page has no employee form")]
    NoActiveForm,
    #[error("the current page is not the employee list")]
    NotAListView,
    #[error("the server rejected a page load as invalid")]
    UnexpectedRejection,
    #[error("employee {0} is not on the current page")]
    UnknownEmployee(EmployeeId),
}
