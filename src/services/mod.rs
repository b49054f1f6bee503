//! Use cases behind each dashboard page.
//!
//! Every function takes the API as `&R where R: ApiTransport + ?Sized` so it
//! can run against the HTTP client or an in-process fake.

use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

pub mod attendance;
pub mod auth;
pub mod clients;
pub mod employees;
pub mod shifts;

/// Shown when an add form is submitted with an empty field.
pub const FIELDS_REQUIRED: &str = "Iltimos, barcha maydonlarni to'ldiring.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Form input was rejected; the message is shown to the user as is.
    #[error("{0}")]
    Form(String),

    /// Localized login failure shown as a transient notification.
    #[error("{0}")]
    Login(String),

    #[error("Noto'g'ri qiymat: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Whether the failure means the user has to sign in (again).
    pub fn is_auth(&self) -> bool {
        matches!(self, ServiceError::Api(err) if err.is_auth())
    }
}
