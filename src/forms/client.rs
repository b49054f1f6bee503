use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::types::{BranchId, ClientName, PhoneNumber};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for adding a client.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    /// Selected branch; the selector starts with no branch chosen.
    pub branch: Option<i32>,
}

impl AddClientForm {
    /// Validates the form and converts it into the creation payload.
    pub fn to_new_client(&self) -> Result<NewClient, FormError> {
        self.validate()?;

        let name = ClientName::new(self.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let phone =
            PhoneNumber::new(self.phone.as_str()).map_err(|_| FormError::InvalidPhoneNumber)?;
        let branch = self
            .branch
            .ok_or(FormError::InvalidBranchId)
            .and_then(|id| BranchId::new(id).map_err(|_| FormError::InvalidBranchId))?;

        Ok(NewClient::new(name, phone, branch))
    }
}
