use serde::{Deserialize, Serialize};

use crate::domain::types::{BranchId, ShiftName, TimeOfDay};

/// Work shift defined for a branch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Shift {
    pub id: i32,
    pub name: String,
    pub branch: i32,
    pub start_time: String,
    pub end_time: String,
}

/// Payload for `/company/shift-create/`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewShift {
    pub name: ShiftName,
    pub branch: BranchId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}
