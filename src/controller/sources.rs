//! [`ListSource`] implementations backing the dashboard's list pages.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::api::ApiTransport;
use crate::controller::ListSource;
use crate::domain::attendance::Attendance;
use crate::domain::branch::DEFAULT_BRANCH_ID;
use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::list::{ListQuery, ListResult, paginate_locally};
use crate::domain::shift::Shift;
use crate::domain::types::BranchId;
use crate::services::ServiceResult;
use crate::services::attendance::list_attendances;
use crate::services::clients::{
    ALL_BRANCHES, branch_filter_options, filter_clients, list_clients,
};
use crate::services::employees::list_branch_employees;
use crate::services::shifts::list_shifts;

/// Attendance records, searched and paginated by the backend.
pub struct AttendanceSource {
    api: Arc<dyn ApiTransport>,
}

impl AttendanceSource {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListSource for AttendanceSource {
    type Item = Attendance;

    async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<Attendance>> {
        list_attendances(self.api.as_ref(), query).await
    }
}

/// Employees of the selected branch, paginated by the backend.
pub struct BranchEmployeesSource {
    api: Arc<dyn ApiTransport>,
    branch: RwLock<BranchId>,
}

impl BranchEmployeesSource {
    pub fn new(api: Arc<dyn ApiTransport>, branch: BranchId) -> Self {
        Self {
            api,
            branch: RwLock::new(branch),
        }
    }

    /// Source preselecting [`DEFAULT_BRANCH_ID`].
    pub fn with_default_branch(api: Arc<dyn ApiTransport>) -> ServiceResult<Self> {
        Ok(Self::new(api, BranchId::new(DEFAULT_BRANCH_ID)?))
    }

    pub fn branch(&self) -> BranchId {
        *self.branch.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Selects another branch; the caller restarts the controller afterwards.
    pub fn set_branch(&self, branch: BranchId) {
        *self.branch.write().unwrap_or_else(PoisonError::into_inner) = branch;
    }
}

#[async_trait]
impl ListSource for BranchEmployeesSource {
    type Item = Employee;

    async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<Employee>> {
        list_branch_employees(self.api.as_ref(), self.branch(), query.page).await
    }
}

/// Clients filtered by branch name and search term on this side.
pub struct ClientsSource {
    api: Arc<dyn ApiTransport>,
    branch_filter: RwLock<String>,
    options: RwLock<Vec<String>>,
}

impl ClientsSource {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self {
            api,
            branch_filter: RwLock::new(ALL_BRANCHES.to_string()),
            options: RwLock::new(vec![ALL_BRANCHES.to_string()]),
        }
    }

    pub fn branch_filter(&self) -> String {
        self.branch_filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_branch_filter(&self, branch: impl Into<String>) {
        *self
            .branch_filter
            .write()
            .unwrap_or_else(PoisonError::into_inner) = branch.into();
    }

    /// Branch filter options seen in the last fetch.
    pub fn filter_options(&self) -> Vec<String> {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ListSource for ClientsSource {
    type Item = Client;

    async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<Client>> {
        let clients = list_clients(self.api.as_ref()).await?;

        *self.options.write().unwrap_or_else(PoisonError::into_inner) =
            branch_filter_options(&clients);

        let filtered = filter_clients(clients, &self.branch_filter(), &query.search_term);
        Ok(paginate_locally(filtered, query))
    }
}

/// Shifts matched by name and paginated on this side.
pub struct ShiftsSource {
    api: Arc<dyn ApiTransport>,
}

impl ShiftsSource {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListSource for ShiftsSource {
    type Item = Shift;

    async fn fetch(&self, query: &ListQuery) -> ServiceResult<ListResult<Shift>> {
        let shifts = list_shifts(self.api.as_ref()).await?;
        let needle = query.search_term.trim().to_lowercase();
        let matching = shifts
            .items
            .into_iter()
            .filter(|shift| needle.is_empty() || shift.name.to_lowercase().contains(&needle))
            .collect();
        Ok(paginate_locally(matching, query))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::test::StubTransport;

    #[tokio::test]
    async fn clients_source_remembers_filter_options() {
        let api = StubTransport::new().respond(
            "/company/clients/",
            Ok(json!([
                {"id": 1, "name": "Jasur", "phone": "+998901111111", "branch_name": "Yashnabod 1"},
                {"id": 2, "name": "Malika", "phone": "+998902222222", "branch_name": "Chilonzor filiali 1"}
            ])),
        );
        let source = ClientsSource::new(Arc::new(api));
        source.set_branch_filter("Yashnabod 1");

        let page = source.fetch(&ListQuery::default()).await.unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, 1);
        assert_eq!(
            source.filter_options(),
            vec!["all", "Chilonzor filiali 1", "Yashnabod 1"]
        );
    }

    #[tokio::test]
    async fn clients_source_cuts_pages_locally() {
        let api = StubTransport::new().respond(
            "/company/clients/",
            Ok(json!({"count": 3, "results": [
                {"id": 1, "name": "Jasur", "phone": "+998901111111", "branch_name": "Yashnabod 1"},
                {"id": 2, "name": "Malika", "phone": "+998902222222", "branch_name": "Chilonzor filiali 1"},
                {"id": 3, "name": "Javlon", "phone": "+998903333333", "branch_name": "Yashnabod 1"}
            ]})),
        );
        let source = ClientsSource::new(Arc::new(api));

        let page = source.fetch(&ListQuery::new(2).page(2)).await.unwrap();

        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 3);
    }

    #[tokio::test]
    async fn employees_source_follows_selected_branch() {
        let api = Arc::new(
            StubTransport::new()
                .respond("/employee/employees/branch/1/", Ok(json!({"count": 0, "results": []})))
                .respond("/employee/employees/branch/4/", Ok(json!({"count": 0, "results": []}))),
        );
        let source = BranchEmployeesSource::with_default_branch(api.clone()).unwrap();
        source.fetch(&ListQuery::default()).await.unwrap();

        source.set_branch(BranchId::new(4).unwrap());
        source.fetch(&ListQuery::default()).await.unwrap();

        let paths: Vec<String> = api.sent().iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec!["/employee/employees/branch/1/", "/employee/employees/branch/4/"]
        );
    }

    #[tokio::test]
    async fn shifts_source_searches_by_name() {
        let api = StubTransport::new().respond(
            "/company/shifts/",
            Ok(json!({"shifts": [
                {"id": 1, "name": "Ertalabki", "branch": 1, "start_time": "08:00:00", "end_time": "16:00:00"},
                {"id": 2, "name": "Kechki", "branch": 1, "start_time": "16:00:00", "end_time": "23:00:00"}
            ]})),
        );
        let source = ShiftsSource::new(Arc::new(api));

        let page = source
            .fetch(&ListQuery::default().search("kech"))
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, 2);
    }
}
