use std::sync::Arc;
use std::time::Duration;

use noventer_dashboard::api::ApiError;
use noventer_dashboard::controller::sources::{AttendanceSource, ClientsSource};
use noventer_dashboard::controller::{ListController, ListPhase, SEARCH_DEBOUNCE};
use noventer_dashboard::dto::{ListView, NO_DATA};
use noventer_dashboard::pagination::DEFAULT_ITEMS_PER_PAGE;

mod common;

use common::{ScriptedTransport, attendance, clients, envelope};

const FIRST_PAGE: &str = "/employee/attendances/?search=&limit=7&offset=0";
const SECOND_PAGE: &str = "/employee/attendances/?search=&limit=7&offset=7";

fn page(ids: std::ops::RangeInclusive<i32>) -> Vec<serde_json::Value> {
    ids.map(|id| attendance(id, id)).collect()
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_commit_one_search() {
    let api = Arc::new(
        ScriptedTransport::new()
            .respond(FIRST_PAGE, Ok(envelope(20, page(1..=7))))
            .respond(
                "/employee/attendances/?search=Ali&limit=7&offset=0",
                Ok(envelope(1, page(3..=3))),
            ),
    );
    let controller = ListController::new(AttendanceSource::new(api.clone()), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();
    controller.settled().await;

    for term in ["A", "Al", "Ali"] {
        controller.input_search(term);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(controller.snapshot().query.search_term, "");
    assert_eq!(controller.snapshot().search_input, "Ali");

    tokio::time::sleep(SEARCH_DEBOUNCE).await;
    let state = controller.settled().await;

    assert_eq!(state.query.search_term, "Ali");
    assert_eq!(state.query.page, 1);
    assert_eq!(state.total_count, 1);
    assert_eq!(
        api.sent(),
        vec![
            FIRST_PAGE.to_string(),
            "/employee/attendances/?search=Ali&limit=7&offset=0".to_string()
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn late_response_for_previous_page_is_discarded() {
    let api = Arc::new(
        ScriptedTransport::new()
            .respond(FIRST_PAGE, Ok(envelope(20, page(1..=7))))
            .respond_after(FIRST_PAGE, Duration::from_secs(2), Ok(envelope(20, page(100..=106))))
            .respond_after(SECOND_PAGE, Duration::from_millis(50), Ok(envelope(20, page(8..=14)))),
    );
    let controller = ListController::new(AttendanceSource::new(api.clone()), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();
    controller.settled().await;

    controller.refresh();
    controller.go_to_page(2);
    let state = controller.settled().await;
    assert_eq!(state.query.page, 2);
    assert_eq!(state.items[0].id, 8);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let state = controller.snapshot();
    assert_eq!(state.phase, ListPhase::Loaded);
    assert_eq!(state.query.page, 2);
    assert_eq!(state.items[0].id, 8);
    assert_eq!(api.sent_to(FIRST_PAGE).len(), 2);
}

#[tokio::test]
async fn page_past_the_end_is_clamped_and_reloaded() {
    let api = Arc::new(
        ScriptedTransport::new()
            .respond("/company/clients/", Ok(clients(20)))
            .respond("/company/clients/", Ok(clients(20)))
            .respond("/company/clients/", Ok(clients(5)))
            .respond("/company/clients/", Ok(clients(5))),
    );
    let controller = ListController::new(ClientsSource::new(api.clone()), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();
    controller.settled().await;

    controller.go_to_page(3);
    assert_eq!(controller.settled().await.items.len(), 6);

    controller.refresh();
    let state = controller.settled().await;

    assert_eq!(state.query.page, 1);
    assert_eq!(state.total_count, 5);
    assert_eq!(state.items.len(), 5);
    assert_eq!(api.sent().len(), 4);
}

#[tokio::test]
async fn unauthorized_fetch_fails_the_list() {
    let api = Arc::new(ScriptedTransport::new().respond(FIRST_PAGE, Err(ApiError::Unauthorized)));
    let controller = ListController::new(AttendanceSource::new(api), DEFAULT_ITEMS_PER_PAGE);

    controller.mount();
    let state = controller.settled().await;

    assert_eq!(
        state.phase,
        ListPhase::Failed(ApiError::Unauthorized.to_string())
    );
    assert!(state.items.is_empty());
}

#[tokio::test]
async fn failure_clears_previous_items() {
    let api = Arc::new(
        ScriptedTransport::new()
            .respond(FIRST_PAGE, Ok(envelope(20, page(1..=7))))
            .respond(
                FIRST_PAGE,
                Err(ApiError::ServerError {
                    status: 502,
                    message: None,
                }),
            ),
    );
    let controller = ListController::new(AttendanceSource::new(api), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();
    assert_eq!(controller.settled().await.items.len(), 7);

    controller.refresh();
    let state = controller.settled().await;

    assert_eq!(state.error(), Some("Server xatosi (status 502)"));
    assert!(state.items.is_empty());
    assert_eq!(state.total_count, 0);
}

#[tokio::test]
async fn empty_envelope_shows_no_data_row() {
    let api = Arc::new(ScriptedTransport::new().respond(FIRST_PAGE, Ok(envelope(0, vec![]))));
    let controller = ListController::new(AttendanceSource::new(api), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();
    let state = controller.settled().await;

    let view = ListView::from_state(&state, NO_DATA, |row| row.id);

    assert_eq!(state.phase, ListPhase::Loaded);
    assert_eq!(view.empty_message.as_deref(), Some(NO_DATA));
    assert_eq!(state.total_pages(), 0);
    assert!(state.controls().next_disabled);
}

#[tokio::test]
async fn loading_disables_every_control() {
    let api = Arc::new(
        ScriptedTransport::new().respond_after(FIRST_PAGE, Duration::from_millis(20), Ok(envelope(20, page(1..=7)))),
    );
    let controller = ListController::new(AttendanceSource::new(api), DEFAULT_ITEMS_PER_PAGE);
    controller.mount();

    let controls = controller.snapshot().controls();
    assert!(controls.first_disabled && controls.prev_disabled);
    assert!(controls.next_disabled && controls.last_disabled && controls.pages_disabled);

    let state = controller.settled().await;
    assert!(!state.controls().next_disabled);
}
