use serde::{Deserialize, Serialize};

/// Personal data nested inside an employee record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EmployeeUser {
    pub full_name: String,
    pub gender: Option<String>,
    pub phone_number: String,
    pub passport_number: Option<String>,
    pub jshshr: Option<String>,
    pub birth_date: Option<String>,
    pub salary_type: Option<String>,
    pub salary: Option<String>,
}

/// Employee record returned by the `/employee/employees/` endpoints.
///
/// The branch listing nests personal data under `user`, while the flat
/// listing used for name lookups carries `first_name`/`last_name`; both shapes
/// deserialize into this struct.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Employee {
    pub id: i32,
    pub user: Option<EmployeeUser>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_full_name: Option<String>,
    pub user_role: Option<String>,
    pub branch_id: Option<i32>,
    pub department_id: Option<i32>,
    pub shift_id: Option<i32>,
    pub branch_name: Option<String>,
    pub branch_location: Option<String>,
    pub position: Option<String>,
    pub salary: Option<String>,
    pub official_salary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl Employee {
    /// Best available display name, `None` when the record carries no name at all.
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        if !first.is_empty() || !last.is_empty() {
            return Some(format!("{first} {last}").trim().to_string());
        }

        self.user
            .as_ref()
            .map(|user| user.full_name.trim())
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.user_full_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
            })
            .map(str::to_string)
    }
}
