use std::collections::BTreeSet;

use validator::Validate;

use crate::api::{ApiError, ApiRequest, ApiTransport};
use crate::domain::client::Client;
use crate::domain::list::{ListResult, decode_list};
use crate::forms::client::AddClientForm;
use crate::services::{FIELDS_REQUIRED, ServiceError, ServiceResult};

/// Branch filter value that matches every client.
pub const ALL_BRANCHES: &str = "all";

/// Shown instead of the table when the selected branch has no clients.
pub const NO_CLIENTS_IN_BRANCH: &str = "Ushbu filialda mijozlar topilmadi.";

/// Fetches every client visible to the current user.
pub async fn list_clients<R>(api: &R) -> ServiceResult<Vec<Client>>
where
    R: ApiTransport + ?Sized,
{
    let body = api
        .request(ApiRequest::get("/company/clients/"))
        .await
        .map_err(|err| {
            log::error!("Failed to fetch clients: {err}");
            err
        })?;

    let result: ListResult<Client> = decode_list(body, None).map_err(ApiError::from)?;
    Ok(result.items)
}

/// Options of the branch selector: `all` followed by each branch name once.
pub fn branch_filter_options(clients: &[Client]) -> Vec<String> {
    let names: BTreeSet<&str> = clients
        .iter()
        .map(|client| client.branch_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    std::iter::once(ALL_BRANCHES.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}

/// Keeps clients of the selected branch whose name or phone contains `search`.
pub fn filter_clients(clients: Vec<Client>, branch: &str, search: &str) -> Vec<Client> {
    let needle = search.trim().to_lowercase();
    clients
        .into_iter()
        .filter(|client| branch == ALL_BRANCHES || client.branch_name == branch)
        .filter(|client| {
            needle.is_empty()
                || client.name.to_lowercase().contains(&needle)
                || client.phone.contains(&needle)
        })
        .collect()
}

/// Validates the form and creates the client.
pub async fn add_client<R>(api: &R, form: &AddClientForm) -> ServiceResult<Client>
where
    R: ApiTransport + ?Sized,
{
    if let Err(err) = form.validate() {
        log::warn!("Rejected client form: {err}");
        return Err(ServiceError::Form(FIELDS_REQUIRED.to_string()));
    }
    let new_client = form.to_new_client()?;

    let request = ApiRequest::post("/company/clients/", &new_client)?;
    let body = api.request(request).await.map_err(|err| {
        log::error!("Failed to create client {}: {err}", new_client.name);
        err
    })?;

    let created: Client = serde_json::from_value(body).map_err(ApiError::from)?;
    log::info!("Created client {}", created.id);
    Ok(created)
}
