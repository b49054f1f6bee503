use serde_json::Value;
use thiserror::Error;

/// Outcome of a failed API call, classified by what the caller can do about it.
///
/// Display texts are the Uzbek messages shown in place of a failed page.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Avtorizatsiya tokeni topilmadi, tizimga kiring")]
    AuthMissing,

    #[error("Sessiya yaroqsiz, qaytadan tizimga kiring")]
    Unauthorized,

    #[error("So'ralgan ma'lumot serverda topilmadi")]
    NotFound {
        /// `message` (or `detail`) reported by the backend, when present.
        message: Option<String>,
    },

    #[error("Server xatosi (status {status})")]
    ServerError {
        status: u16,
        message: Option<String>,
    },

    #[error("So'rov rad etildi (status {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Server bilan bog'lanib bo'lmadi: {0}")]
    Network(String),

    #[error("Serverdan noto'g'ri javob keldi: {0}")]
    Malformed(String),

    #[error("Ilova sozlamalarida xatolik: {0}")]
    Configuration(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether the failure means the user has to sign in (again).
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthMissing | ApiError::Unauthorized)
    }

    /// Backend-provided explanation, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message }
            | ApiError::ServerError { message, .. }
            | ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Extracts a human-readable message from an error body.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Maps an HTTP status and raw body to the decoded JSON payload or an [`ApiError`].
pub fn classify_response(status: u16, body: &str) -> ApiResult<Value> {
    match status {
        200..=299 => {
            if body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                Ok(serde_json::from_str(body)?)
            }
        }
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound {
            message: extract_message(body),
        }),
        500..=599 => Err(ApiError::ServerError {
            status,
            message: extract_message(body),
        }),
        _ => Err(ApiError::Rejected {
            status,
            message: extract_message(body),
        }),
    }
}
