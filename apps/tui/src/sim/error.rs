use thiserror::Error;

/// Local input problem; the request is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure talking to `/simulate`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `detail` holds whatever the body yielded.
    #[error("{}", server_message(.status, .detail.as_deref()))]
    Server { status: u16, detail: Option<String> },

    #[error("Could not decode simulation results: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background request task ended without an answer.
    #[error("Request interrupted: {0}")]
    Interrupted(String),
}

fn server_message(status: &u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("HTTP error! Status: {status} - {detail}"),
        None => format!("HTTP error! Status: {status}"),
    }
}

/// Failure while placing map overlay items. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Cannot update map due to invalid coordinates.")]
    InvalidCoordinates,
}
