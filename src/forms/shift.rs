use serde::Deserialize;
use validator::Validate;

use crate::domain::shift::NewShift;
use crate::domain::types::{BranchId, ShiftName, TimeOfDay};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Form data for creating a shift; every field is required.
pub struct AddShiftForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub branch: String,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
}

impl AddShiftForm {
    pub fn to_new_shift(&self) -> Result<NewShift, FormError> {
        self.validate()?;

        let branch = self
            .branch
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(|id| BranchId::new(id).ok())
            .ok_or(FormError::InvalidBranchId)?;

        Ok(NewShift {
            name: ShiftName::new(self.name.as_str()).map_err(|_| FormError::InvalidName)?,
            branch,
            start_time: TimeOfDay::new(self.start_time.as_str())
                .map_err(|_| FormError::InvalidTime)?,
            end_time: TimeOfDay::new(self.end_time.as_str()).map_err(|_| FormError::InvalidTime)?,
        })
    }
}
