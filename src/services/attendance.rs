use crate::api::{ApiError, ApiRequest, ApiTransport};
use crate::domain::attendance::Attendance;
use crate::domain::list::{ListQuery, ListResult, decode_list};
use crate::services::ServiceResult;

/// Fetches one page of attendance records matching the committed search term.
pub async fn list_attendances<R>(api: &R, query: &ListQuery) -> ServiceResult<ListResult<Attendance>>
where
    R: ApiTransport + ?Sized,
{
    let request = ApiRequest::get("/employee/attendances/")
        .query("search", &query.search_term)
        .query("limit", query.limit())
        .query("offset", query.offset())
        .require_auth();

    let body = api.request(request).await.map_err(|err| {
        log::error!("Failed to fetch attendances: {err}");
        err
    })?;

    decode_list(body, None).map_err(|err| ApiError::from(err).into())
}
