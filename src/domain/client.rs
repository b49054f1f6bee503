use serde::{Deserialize, Serialize};

use crate::domain::types::{BranchId, ClientName, PhoneNumber};

/// Client record returned by `/company/clients/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Client {
    pub id: i32,
    pub branch: Option<i32>,
    pub branch_name: String,
    pub name: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub license_file: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Payload for creating a client.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: PhoneNumber,
    pub branch: BranchId,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, phone: PhoneNumber, branch: BranchId) -> Self {
        Self {
            name,
            phone,
            branch,
        }
    }
}
