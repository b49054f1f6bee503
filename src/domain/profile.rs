use serde::{Deserialize, Serialize};

/// Profile of the signed-in user as returned by `/accounts/me/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserProfile {
    pub id: i32,
    pub full_name: String,
    pub gender: String,
    pub birth_date: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub face_id: Option<String>,
    pub company_id: Option<i32>,
    pub avatar: Option<String>,
    pub salary_type: Option<String>,
    pub phone_number: String,
}

impl UserProfile {
    /// Role label shown on the home page; directors are shown as `Rahbar`.
    pub fn role_label(&self) -> &str {
        if self.role == "director" {
            "Rahbar"
        } else {
            &self.role
        }
    }
}
