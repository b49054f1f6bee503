use std::sync::Arc;

use noventer_dashboard::api::{ApiError, HttpApiClient};
use noventer_dashboard::cli::{App, PageParams};
use noventer_dashboard::domain::credential::Credential;
use noventer_dashboard::routes::{Navigation, Route, RouteGuard};
use noventer_dashboard::session::{FileSessionStore, MemorySessionStore, SessionStore};
use serde_json::json;

mod common;

use common::{FixedBackend, ScriptedTransport, envelope};

#[test]
fn protected_routes_redirect_to_login_without_credential() {
    let session = Arc::new(MemorySessionStore::new());
    let guard = RouteGuard::new(session.clone());

    assert_eq!(
        guard.navigate(Route::Employees),
        Navigation::Redirect(Route::Login)
    );
    assert_eq!(guard.navigate(Route::Login), Navigation::Render(Route::Login));

    session.set_credential(Credential::new("a", "r")).unwrap();

    assert_eq!(
        guard.navigate(Route::Employees),
        Navigation::Render(Route::Employees)
    );
    assert_eq!(guard.navigate(Route::Login), Navigation::Redirect(Route::Home));
    assert_eq!(guard.navigate_path("/nowhere"), None);
}

#[test]
fn logout_through_file_store_locks_pages_again() {
    let dir = tempfile::tempdir().unwrap();
    let session = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    let guard = RouteGuard::new(session.clone());

    session.set_credential(Credential::new("a", "r")).unwrap();
    assert_eq!(
        guard.navigate_path("/attendance?page=2"),
        Some(Navigation::Render(Route::Attendance))
    );

    session.clear().unwrap();
    assert_eq!(
        guard.navigate_path("/attendance"),
        Some(Navigation::Redirect(Route::Login))
    );
}

#[tokio::test]
async fn employees_page_renders_only_after_sign_in() {
    let api = Arc::new(ScriptedTransport::new().respond(
        "/employee/employees/branch/1/?page=1",
        Ok(envelope(
            1,
            vec![json!({
                "id": 9,
                "user": {"full_name": "Dilnoza Rahimova", "phone_number": "+998901112233"},
                "position": "Kassir",
                "branch_name": "Uchtepa filiali 1"
            })],
        )),
    ));
    let session = Arc::new(MemorySessionStore::new());
    let app = App::with_parts(api.clone(), session.clone()).unwrap();

    let page = app
        .show(Route::Employees, PageParams::default())
        .await
        .unwrap();
    assert!(page.contains("Tizimga kirish"));
    assert!(api.sent().is_empty());

    session.set_credential(Credential::new("a", "r")).unwrap();
    let page = app
        .show(Route::Employees, PageParams::default())
        .await
        .unwrap();

    assert!(page.contains("[Xodimlar]"));
    assert!(page.contains("Dilnoza Rahimova"));
    assert!(page.contains("[1. Uchtepa filiali 1]"));
}

#[tokio::test]
async fn rejected_token_shows_an_error_and_keeps_the_session() {
    let backend = FixedBackend::start(401, r#"{"detail": "Given token not valid"}"#).await;
    let credential = Credential::new("expired", "refresh");
    let session: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::with_credential(credential.clone()));
    let api = HttpApiClient::new(backend.base_url(), Arc::clone(&session), None).unwrap();
    let app = App::with_parts(Arc::new(api), Arc::clone(&session)).unwrap();

    let page = app
        .show(Route::Attendance, PageParams::default())
        .await
        .unwrap();

    assert!(page.contains(&format!("Xatolik: {}", ApiError::Unauthorized)));
    assert_eq!(session.credential(), Some(credential));
    assert!(
        backend
            .requests()
            .iter()
            .any(|head| head.starts_with("get /api/v1/employee/attendances/")
                && head.contains("authorization: bearer expired"))
    );
}
