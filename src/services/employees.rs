use std::collections::HashMap;

use crate::api::{ApiError, ApiRequest, ApiTransport};
use crate::domain::employee::Employee;
use crate::domain::list::{ListResult, decode_list};
use crate::domain::types::BranchId;
use crate::services::ServiceResult;

/// Fetches one server-side page of a branch's employees.
pub async fn list_branch_employees<R>(
    api: &R,
    branch: BranchId,
    page: usize,
) -> ServiceResult<ListResult<Employee>>
where
    R: ApiTransport + ?Sized,
{
    let request = ApiRequest::get(format!("/employee/employees/branch/{branch}/"))
        .query("page", page.max(1))
        .require_auth();

    let body = api.request(request).await.map_err(|err| {
        log::error!("Failed to fetch employees of branch {branch}: {err}");
        err
    })?;

    decode_list(body, None).map_err(|err| ApiError::from(err).into())
}

/// Fetches the full employee directory.
pub async fn list_all_employees<R>(api: &R) -> ServiceResult<Vec<Employee>>
where
    R: ApiTransport + ?Sized,
{
    let body = api
        .request(ApiRequest::get("/employee/employees/").require_auth())
        .await
        .map_err(|err| {
            log::error!("Failed to fetch employee directory: {err}");
            err
        })?;

    let result: ListResult<Employee> =
        decode_list(body, None).map_err(ApiError::from)?;
    Ok(result.items)
}

/// Maps employee ids to display names, skipping records without a name.
pub fn employee_names(employees: &[Employee]) -> HashMap<i32, String> {
    employees
        .iter()
        .filter_map(|employee| employee.display_name().map(|name| (employee.id, name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::AuthPolicy;
    use crate::api::test::StubTransport;
    use crate::services::ServiceError;

    #[tokio::test]
    async fn branch_page_is_requested_with_page_number() {
        let api = StubTransport::new().respond(
            "/employee/employees/branch/3/",
            Ok(json!({
                "count": 9,
                "next": null,
                "previous": null,
                "results": [{"id": 5, "user": {"full_name": "Aziz Karimov"}}]
            })),
        );

        let page = list_branch_employees(&api, BranchId::new(3).unwrap(), 2)
            .await
            .unwrap();

        assert_eq!(page.total_count, 9);
        assert_eq!(page.items[0].display_name().as_deref(), Some("Aziz Karimov"));

        let sent = api.sent();
        assert_eq!(sent[0].path_and_query().unwrap(), "/employee/employees/branch/3/?page=2");
        assert_eq!(sent[0].auth, AuthPolicy::Required);
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let api = StubTransport::new()
            .respond("/employee/employees/", Ok(json!({"unexpected": true})));

        let result = list_all_employees(&api).await;

        assert!(matches!(
            result,
            Err(ServiceError::Api(ApiError::Malformed(_)))
        ));
    }

    #[test]
    fn names_skip_unnamed_records() {
        let employees = vec![
            Employee {
                id: 1,
                first_name: Some("Ali".into()),
                last_name: Some("Valiyev".into()),
                ..Employee::default()
            },
            Employee {
                id: 2,
                ..Employee::default()
            },
        ];

        let names = employee_names(&employees);

        assert_eq!(names.get(&1).map(String::as_str), Some("Ali Valiyev"));
        assert!(!names.contains_key(&2));
    }
}
