use std::collections::HashMap;

use serde::Serialize;

use crate::controller::ListState;
use crate::domain::attendance::Attendance;
use crate::dto::{ListView, MISSING_VALUE, NO_DATA, format_optional_timestamp, format_timestamp};
use crate::lookup::display_name;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub id: i32,
    pub employee: String,
    pub check_in: String,
    pub check_out: String,
    pub working_hours: String,
    pub status: String,
    pub at_work: bool,
}

impl AttendanceRow {
    pub fn new(attendance: &Attendance, names: &HashMap<i32, String>) -> Self {
        Self {
            id: attendance.id,
            employee: display_name(names, attendance.employee),
            check_in: format_timestamp(&attendance.check_in),
            check_out: format_optional_timestamp(attendance.check_out.as_deref()),
            working_hours: attendance
                .working_hours
                .clone()
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            status: attendance.work_status_data.clone(),
            at_work: attendance.is_at_work(),
        }
    }
}

/// Data required to render the attendance page.
#[derive(Serialize)]
pub struct AttendancePageData {
    pub attendances: ListView<AttendanceRow>,
}

impl AttendancePageData {
    pub fn new(state: &ListState<Attendance>, names: &HashMap<i32, String>) -> Self {
        Self {
            attendances: ListView::from_state(state, NO_DATA, |attendance| {
                AttendanceRow::new(attendance, names)
            }),
        }
    }
}
