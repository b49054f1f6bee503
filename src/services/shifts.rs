use std::collections::BTreeMap;

use validator::Validate;

use crate::api::{ApiError, ApiRequest, ApiTransport};
use crate::domain::branch::{SHIFT_BRANCHES, branch_name};
use crate::domain::list::{ListResult, decode_list};
use crate::domain::shift::Shift;
use crate::forms::shift::AddShiftForm;
use crate::services::{FIELDS_REQUIRED, ServiceError, ServiceResult};

/// Fetches every shift; the endpoint answers with an envelope, `{"shifts": [..]}` or a bare array.
pub async fn list_shifts<R>(api: &R) -> ServiceResult<ListResult<Shift>>
where
    R: ApiTransport + ?Sized,
{
    let body = api
        .request(ApiRequest::get("/company/shifts/"))
        .await
        .map_err(|err| {
            log::error!("Failed to fetch shifts: {err}");
            err
        })?;

    decode_list(body, Some("shifts")).map_err(|err| ApiError::from(err).into())
}

/// Validates the form and creates the shift.
pub async fn add_shift<R>(api: &R, form: &AddShiftForm) -> ServiceResult<()>
where
    R: ApiTransport + ?Sized,
{
    if let Err(err) = form.validate() {
        log::warn!("Rejected shift form: {err}");
        return Err(ServiceError::Form(FIELDS_REQUIRED.to_string()));
    }
    let new_shift = form.to_new_shift()?;

    let request = ApiRequest::post("/company/shift-create/", &new_shift)?;
    api.request(request).await.map_err(|err| {
        log::error!("Failed to create shift {}: {err}", new_shift.name);
        err
    })?;

    log::info!("Created shift {} for branch {}", new_shift.name, new_shift.branch);
    Ok(())
}

/// `HH:MM` part of a backend time such as `09:00:00`.
pub fn format_time(value: &str) -> String {
    value.trim().chars().take(5).collect()
}

/// Shifts grouped under their branch name, ordered by branch name.
pub fn group_by_branch(shifts: &[Shift]) -> BTreeMap<&'static str, Vec<&Shift>> {
    let mut groups: BTreeMap<&'static str, Vec<&Shift>> = BTreeMap::new();
    for shift in shifts {
        groups.entry(branch_name(SHIFT_BRANCHES, shift.branch)).or_default().push(shift);
    }
    groups
}
