use serde::Serialize;

use crate::controller::ListState;
use crate::domain::branch::{Branch, SHIFT_BRANCHES};
use crate::domain::shift::Shift;
use crate::dto::{ListView, NO_DATA};
use crate::services::shifts::{format_time, group_by_branch};

#[derive(Debug, Clone, Serialize)]
pub struct ShiftRow {
    pub id: i32,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&Shift> for ShiftRow {
    fn from(shift: &Shift) -> Self {
        Self {
            id: shift.id,
            name: shift.name.clone(),
            start_time: format_time(&shift.start_time),
            end_time: format_time(&shift.end_time),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftGroup {
    pub branch: &'static str,
    pub shifts: Vec<ShiftRow>,
}

/// Data required to render the shifts page.
#[derive(Serialize)]
pub struct ShiftsPageData {
    /// Rows of the current page grouped under their branch.
    pub groups: Vec<ShiftGroup>,
    /// Branches offered by the add-shift form.
    pub branches: &'static [Branch],
    pub shifts: ListView<ShiftRow>,
}

impl ShiftsPageData {
    pub fn new(state: &ListState<Shift>) -> Self {
        let groups = group_by_branch(&state.items)
            .into_iter()
            .map(|(branch, shifts)| ShiftGroup {
                branch,
                shifts: shifts.into_iter().map(ShiftRow::from).collect(),
            })
            .collect();

        Self {
            groups,
            branches: SHIFT_BRANCHES,
            shifts: ListView::from_state(state, NO_DATA, |s| ShiftRow::from(s)),
        }
    }
}
