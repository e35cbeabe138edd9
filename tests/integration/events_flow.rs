//! End-to-end view flows against a mocked events service

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;
use tokio_test::assert_ok;

use eventsync_client::{
    config::AppConfig,
    models::{Credentials, LoginRequest},
    navigation::{History, Route},
    session::{CredentialStore, FileCredentialStore, MemoryCredentialStore},
    views::{DetailState, EventDetailView, EventListView, FilterPanel, ListState},
    AppError, AppState,
};

const EVENT_ID: &str = "0d6f2a52-8f7e-4d4b-a8c5-2a0f5f0e9b11";

fn summary(name: &str) -> serde_json::Value {
    json!({
        "id": EVENT_ID,
        "name": name,
        "date": "2099-11-02",
        "startTime": "09:00:00",
        "location": null,
        "categoryName": "Tech"
    })
}

fn page(name: &str, total_pages: u32) -> String {
    json!({
        "content": [summary(name)],
        "number": 0,
        "size": 10,
        "totalElements": total_pages * 10,
        "totalPages": total_pages,
        "numberOfElements": 1
    })
    .to_string()
}

fn app(server: &mockito::Server, credentials: Arc<dyn CredentialStore>) -> (AppState, Arc<History>) {
    let mut config = AppConfig::default();
    config.api.base_url = server.url();
    let history = Arc::new(History::new());
    let state = AppState::new(config, credentials, history.clone()).unwrap();
    (state, history)
}

#[tokio::test]
async fn test_filtered_list_shows_three_pages() {
    let mut server = mockito::Server::new_async().await;
    let categories = server
        .mock("GET", "/api/categories")
        .with_status(200)
        .with_body(json!([{ "id": "4c0f0f7e-1d0e-4a55-9a51-6a1c2f3b4d5e", "name": "Tech" }]).to_string())
        .create_async()
        .await;
    let unfiltered = server
        .mock("POST", "/api/events/filter")
        .match_query(Matcher::UrlEncoded("page".into(), "0".into()))
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(page("Jazz Night", 1))
        .expect(1)
        .create_async()
        .await;
    let filtered = server
        .mock("POST", "/api/events/filter")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "0".into()),
            Matcher::UrlEncoded("size".into(), "10".into()),
        ]))
        .match_body(Matcher::Json(json!({ "name": "Conf", "categoryName": ["Tech"] })))
        .with_status(200)
        .with_body(page("RustConf", 3))
        .expect(1)
        .create_async()
        .await;

    let (state, _) = app(&server, Arc::new(MemoryCredentialStore::new()));
    let mut list = EventListView::new(state.services.events.clone());
    list.mount().await;
    assert!(list.pagination().is_none());

    let mut panel = FilterPanel::new();
    panel
        .open(list.filter(), state.services.categories.as_ref())
        .await;
    panel.set_name("Conf");
    panel.toggle_category("Tech");
    let filter = assert_ok!(panel.apply());
    list.apply_filter(filter).await;

    match list.state() {
        ListState::Loaded { events, total_pages } => {
            assert_eq!(events[0].name, "RustConf");
            assert_eq!(*total_pages, 3);
        }
        other => panic!("unexpected state: {:?}", other),
    }
    let pagination = list.pagination().unwrap();
    assert_eq!(pagination.pages.len(), 3);
    assert!(pagination.previous.is_none());
    assert_eq!(pagination.next, Some(1));

    categories.assert_async().await;
    unfiltered.assert_async().await;
    filtered.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_redirects_to_login() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/api/events/{}", EVENT_ID).as_str())
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .create_async()
        .await;

    let store = Arc::new(MemoryCredentialStore::with(Credentials {
        access_token: "expired".into(),
        email: "ana@example.com".into(),
    }));
    let (state, history) = app(&server, store.clone());

    let mut detail = EventDetailView::new(
        state.services.events.clone(),
        state.credentials().clone(),
        state.navigator().clone(),
    );
    detail.load(Some(EVENT_ID)).await;

    assert!(matches!(detail.state(), DetailState::Error(_)));
    assert!(!store.is_authenticated());
    assert_eq!(history.current(), Some(Route::Login));
}

#[tokio::test]
async fn test_login_persists_session_to_file() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(json!({ "token": "abc.def.ghi" }).to_string())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = Arc::new(FileCredentialStore::open(&path).unwrap());
    let (state, history) = app(&server, store);

    assert_ok!(
        state
            .services
            .auth
            .login(&LoginRequest {
                email: "ana@example.com".into(),
                password: "correct horse".into(),
            })
            .await
    );
    assert_eq!(history.current(), Some(Route::Home));

    let reopened = FileCredentialStore::open(&path).unwrap();
    assert_eq!(reopened.token().as_deref(), Some("abc.def.ghi"));
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("correct horse"));
}

#[tokio::test]
async fn test_invalid_login_is_rejected_before_sending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let (state, _) = app(&server, Arc::new(MemoryCredentialStore::new()));
    let err = state
        .services
        .auth
        .login(&LoginRequest {
            email: "not-an-email".into(),
            password: "short".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    mock.assert_async().await;
}
