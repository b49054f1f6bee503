//! Text rendering of dashboard pages with Tera.
//!
//! Templates live under `templates/` and are embedded at compile time.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::dto::attendance::AttendancePageData;
use crate::dto::clients::ClientsPageData;
use crate::dto::employees::EmployeesPageData;
use crate::dto::profile::ProfilePageData;
use crate::dto::shifts::ShiftsPageData;
use crate::routes::Route;

const TEMPLATES: [(&str, &str); 8] = [
    ("layout.txt", include_str!("../../templates/layout.txt")),
    ("macros.txt", include_str!("../../templates/macros.txt")),
    ("login.txt", include_str!("../../templates/login.txt")),
    ("profile.txt", include_str!("../../templates/profile.txt")),
    ("employees.txt", include_str!("../../templates/employees.txt")),
    ("attendance.txt", include_str!("../../templates/attendance.txt")),
    ("clients.txt", include_str!("../../templates/clients.txt")),
    ("shifts.txt", include_str!("../../templates/shifts.txt")),
];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Serialize)]
struct NavItem {
    label: &'static str,
    path: &'static str,
    active: bool,
}

/// Builds the context shared by every page: navigation and an optional notice.
pub fn base_context(current: Route, notice: Option<&str>) -> Context {
    let nav: Vec<NavItem> = Route::NAVIGATION
        .into_iter()
        .map(|route| NavItem {
            label: route.label(),
            path: route.path(),
            active: route == current,
        })
        .collect();

    let mut context = Context::new();
    context.insert("nav", &nav);
    context.insert("notice", &notice);
    context
}

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render_template(&self, template: &str, context: &Context) -> Result<String, ViewError> {
        self.tera.render(template, context).map_err(|err| {
            log::error!("Failed to render template '{template}': {err}");
            ViewError::from(err)
        })
    }

    pub fn login(&self, phone: &str, notice: Option<&str>) -> Result<String, ViewError> {
        let mut context = base_context(Route::Login, notice);
        context.insert("phone", phone);
        self.render_template("login.txt", &context)
    }

    /// Home page; with neither a profile nor an error the page is still loading.
    pub fn profile(
        &self,
        profile: Option<&ProfilePageData>,
        error: Option<&str>,
    ) -> Result<String, ViewError> {
        let mut context = base_context(Route::Home, None);
        context.insert("profile", &profile);
        context.insert("error", &error);
        self.render_template("profile.txt", &context)
    }

    pub fn employees(&self, data: &EmployeesPageData) -> Result<String, ViewError> {
        let mut context = base_context(Route::Employees, None);
        context.insert("branches", &data.branches);
        context.insert("employees", &data.employees);
        self.render_template("employees.txt", &context)
    }

    pub fn attendance(&self, data: &AttendancePageData) -> Result<String, ViewError> {
        let mut context = base_context(Route::Attendance, None);
        context.insert("attendances", &data.attendances);
        self.render_template("attendance.txt", &context)
    }

    pub fn clients(
        &self,
        data: &ClientsPageData,
        notice: Option<&str>,
    ) -> Result<String, ViewError> {
        let mut context = base_context(Route::Clients, notice);
        context.insert("filters", &data.filters);
        context.insert("clients", &data.clients);
        self.render_template("clients.txt", &context)
    }

    pub fn shifts(&self, data: &ShiftsPageData, notice: Option<&str>) -> Result<String, ViewError> {
        let mut context = base_context(Route::Shifts, notice);
        context.insert("groups", &data.groups);
        context.insert("branches", &data.branches);
        context.insert("shifts", &data.shifts);
        self.render_template("shifts.txt", &context)
    }
}
