//! DTO modules that bridge list state and services with templates.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::controller::{ListPhase, ListState};
use crate::pagination::Paginated;

pub mod attendance;
pub mod clients;
pub mod employees;
pub mod profile;
pub mod shifts;

/// Rendered in place of a value that is missing or cannot be parsed.
pub const MISSING_VALUE: &str = "-";

/// Shown when a list loaded successfully but has no rows.
pub const NO_DATA: &str = "Ma'lumot topilmadi.";

/// Formats a backend timestamp as `dd.MM.yyyy HH:mm` in its own offset.
pub fn format_timestamp(value: &str) -> String {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.format("%d.%m.%Y %H:%M").to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map_or_else(
            || MISSING_VALUE.to_string(),
            |parsed| parsed.format("%d.%m.%Y %H:%M").to_string(),
        )
}

pub fn format_optional_timestamp(value: Option<&str>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), format_timestamp)
}

/// Template view of a list controller's state with rows already shaped.
#[derive(Serialize)]
pub struct ListView<T> {
    pub loading: bool,
    pub error: Option<String>,
    /// Message for the empty table; `None` while rows are present.
    pub empty_message: Option<String>,
    pub search: String,
    pub total_count: usize,
    pub list: Paginated<T>,
}

impl<T> ListView<T> {
    pub fn from_state<S, F>(state: &ListState<S>, empty_message: &str, to_row: F) -> Self
    where
        F: FnMut(&S) -> T,
    {
        let rows: Vec<T> = state.items.iter().map(to_row).collect();
        let empty_message = (state.phase == ListPhase::Loaded && rows.is_empty())
            .then(|| empty_message.to_string());

        Self {
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            empty_message,
            search: state.search_input.clone(),
            total_count: state.total_count,
            list: Paginated::new(rows, state.query.page, state.total_pages(), state.is_loading()),
        }
    }
}
