//! Form definitions backing the dashboard's input screens.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod login;
pub mod shift;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("Maydonlar noto'g'ri to'ldirilgan: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Filial noto'g'ri tanlangan")]
    InvalidBranchId,

    #[error("Nom noto'g'ri kiritilgan")]
    InvalidName,

    #[error("Telefon raqam noto'g'ri")]
    InvalidPhoneNumber,

    #[error("Vaqt noto'g'ri kiritilgan")]
    InvalidTime,
}
