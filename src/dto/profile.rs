use serde::Serialize;

use crate::domain::profile::UserProfile;
use crate::dto::MISSING_VALUE;

/// Data required to render the home (profile) page.
#[derive(Debug, Serialize)]
pub struct ProfilePageData {
    pub full_name: String,
    pub role: String,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub birth_date: String,
}

impl From<&UserProfile> for ProfilePageData {
    fn from(profile: &UserProfile) -> Self {
        let or_dash = |value: Option<&str>| {
            value
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(MISSING_VALUE)
                .to_string()
        };
        Self {
            full_name: profile.full_name.clone(),
            role: profile.role_label().to_string(),
            phone_number: profile.phone_number.clone(),
            email: or_dash(profile.email.as_deref()),
            gender: or_dash(Some(profile.gender.as_str())),
            birth_date: or_dash(profile.birth_date.as_deref()),
        }
    }
}
