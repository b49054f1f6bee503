use serde::Serialize;

use crate::controller::ListState;
use crate::domain::branch::BRANCHES;
use crate::domain::employee::Employee;
use crate::domain::types::BranchId;
use crate::dto::{ListView, MISSING_VALUE, NO_DATA};

#[derive(Debug, Clone, Serialize)]
pub struct BranchOption {
    pub id: i32,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub phone: String,
    pub branch: String,
    pub salary: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        let text = |value: Option<&str>| value.unwrap_or(MISSING_VALUE).to_string();
        Self {
            id: employee.id,
            name: employee
                .display_name()
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            position: text(employee.position.as_deref()),
            phone: text(employee.user.as_ref().map(|user| user.phone_number.as_str())),
            branch: text(employee.branch_name.as_deref()),
            salary: text(
                employee
                    .salary
                    .as_deref()
                    .or_else(|| employee.user.as_ref().and_then(|user| user.salary.as_deref())),
            ),
        }
    }
}

/// Data required to render the employees page.
#[derive(Serialize)]
pub struct EmployeesPageData {
    pub branches: Vec<BranchOption>,
    pub employees: ListView<EmployeeRow>,
}

impl EmployeesPageData {
    pub fn new(selected: BranchId, state: &ListState<Employee>) -> Self {
        Self {
            branches: BRANCHES
                .iter()
                .map(|branch| BranchOption {
                    id: branch.id,
                    name: branch.name,
                    selected: branch.id == selected.get(),
                })
                .collect(),
            employees: ListView::from_state(state, NO_DATA, |e| EmployeeRow::from(e)),
        }
    }
}
