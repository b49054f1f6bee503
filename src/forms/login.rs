use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
/// Credentials typed into the login screen.
pub struct LoginForm {
    /// Phone number; whitespace is ignored.
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST /accounts/login/`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LoginPayload {
    pub phone_number: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }

    /// Copy of the form with all whitespace removed from the phone number.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            phone: self.phone.chars().filter(|c| !c.is_whitespace()).collect(),
            password: self.password.clone(),
        }
    }

    pub fn to_payload(&self) -> LoginPayload {
        let normalized = self.normalized();
        LoginPayload {
            phone_number: normalized.phone,
            password: normalized.password,
        }
    }
}
