//! Shared fixtures for unit tests

use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    config::ApiConfig,
    models::Credentials,
    navigation::History,
    services::api_client::ApiClient,
    session::MemoryCredentialStore,
};

pub const EVENT_ID: &str = "0d6f2a52-8f7e-4d4b-a8c5-2a0f5f0e9b11";
pub const CATEGORY_ID: &str = "4c0f0f7e-1d0e-4a55-9a51-6a1c2f3b4d5e";

pub fn summary_json(name: &str) -> Value {
    json!({
        "id": EVENT_ID,
        "name": name,
        "date": "2099-11-02",
        "startTime": "09:00:00",
        "location": "São Paulo",
        "categoryName": "Tech"
    })
}

pub fn page_json(total_pages: u32) -> Value {
    json!({
        "content": [summary_json("RustConf")],
        "number": 0,
        "size": 10,
        "totalElements": total_pages * 10,
        "totalPages": total_pages,
        "numberOfElements": 1
    })
}

pub fn detail_json(checked_in: bool) -> Value {
    json!({
        "id": EVENT_ID,
        "name": "RustConf",
        "description": "Talks and workshops",
        "location": "São Paulo",
        "date": "2099-11-02",
        "startTime": "09:00:00",
        "endTime": "18:00:00",
        "eventType": "HIBRIDO",
        "ticketUrl": "https://tickets.example.com/rustconf",
        "officialSiteUrl": "",
        "onlineUrl": null,
        "category": { "id": CATEGORY_ID, "name": "Tech" },
        "organizer": { "email": "ana@example.com", "name": "Ana" },
        "userIsCheckedIn": checked_in,
        "_links": {
            "self": { "href": format!("http://localhost:8080/api/events/{}", EVENT_ID) }
        }
    })
}

pub fn api_client(server: &mockito::Server) -> ApiClient {
    api_client_with(server, None).0
}

/// Client against `server`, optionally logged in as ana@example.com
pub fn api_client_with(
    server: &mockito::Server,
    token: Option<&str>,
) -> (ApiClient, Arc<MemoryCredentialStore>, Arc<History>) {
    let store = Arc::new(match token {
        Some(token) => MemoryCredentialStore::with(Credentials {
            access_token: token.to_string(),
            email: "ana@example.com".to_string(),
        }),
        None => MemoryCredentialStore::new(),
    });
    let history = Arc::new(History::new());
    let config = ApiConfig {
        base_url: server.url(),
        timeout_secs: None,
    };
    let api = ApiClient::new(&config, store.clone(), history.clone()).unwrap();
    (api, store, history)
}
