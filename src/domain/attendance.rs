use serde::{Deserialize, Serialize};

/// Work status label the backend reports for employees currently on shift.
pub const AT_WORK_STATUS: &str = "Ishda";

/// One attendance row (a check-in with an optional check-out).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Attendance {
    pub id: i32,
    /// Identifier of the employee; resolved to a name through a lookup.
    pub employee: i32,
    pub check_in: String,
    pub check_out: Option<String>,
    pub working_hours: Option<String>,
    pub created_at: Option<String>,
    pub check_in_data: Option<String>,
    pub check_out_data: Option<String>,
    pub work_status_data: String,
}

impl Attendance {
    pub fn is_at_work(&self) -> bool {
        self.work_status_data == AT_WORK_STATUS
    }
}
