//! Errors surfaced by HTTP calls to the finance API.

use finboard_shared::ApiErrorBody;
use thiserror::Error;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";
pub const REQUEST_FAILED_MESSAGE: &str = "Erro na requisição";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the uniform error for a non-success response: the server's
    /// `message` (or `error`) field, `"Erro {status}"` when the JSON body has
    /// neither, `"Erro desconhecido"` when the body is not JSON at all.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed
                .server_message()
                .map_or_else(|| format!("Erro {status}"), str::to_string),
            Err(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
        };
        Self::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Text shown to the user in an error toast.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            REQUEST_FAILED_MESSAGE.to_string()
        } else {
            text
        }
    }
}
