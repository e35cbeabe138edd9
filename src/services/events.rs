//! Events service

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        schema::{today, validate_request},
        CreateEvent, EventCollection, EventDetail, EventPage, EventSummary, FilterRequest,
        PaginatedEvents, UpdateEvent,
    },
};

use super::api_client::ApiClient;

/// Page size of every filtered query
pub const PAGE_SIZE: u32 = 10;

/// Operations the views need from the events service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Validate `filter` and fetch one zero-based page of matching events.
    /// An invalid filter fails without a request being sent.
    async fn fetch_filtered(&self, filter: &FilterRequest, page: u32) -> AppResult<EventPage>;

    /// `None` when the service answers without an event
    async fn get(&self, id: Uuid) -> AppResult<Option<EventDetail>>;

    async fn create(&self, event: &CreateEvent) -> AppResult<EventDetail>;

    async fn update(&self, id: Uuid, event: &UpdateEvent) -> AppResult<EventDetail>;

    /// Returns the success status (200 or 204)
    async fn delete(&self, id: Uuid) -> AppResult<StatusCode>;

    async fn check_in(&self, id: Uuid) -> AppResult<StatusCode>;

    async fn uncheck_in(&self, id: Uuid) -> AppResult<StatusCode>;

    /// Events the current user organizes or is checked into
    async fn my_events(&self) -> AppResult<Vec<EventSummary>>;
}

#[derive(Clone)]
pub struct EventsService {
    api: ApiClient,
}

impl EventsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EventsApi for EventsService {
    async fn fetch_filtered(&self, filter: &FilterRequest, page: u32) -> AppResult<EventPage> {
        if let Err(e) = validate_request(filter, today()) {
            error!(error = %e, "Invalid event filter");
            return Err(e);
        }

        let query = [("page", page.to_string()), ("size", PAGE_SIZE.to_string())];
        let response = self
            .api
            .post("/api/events/filter", &query, filter)
            .await
            .map_err(|e| {
                error!(page, error = %e, "Failed to fetch events");
                e
            })?;

        let decoded: PaginatedEvents = response.decode().map_err(|e| {
            error!(page, error = %e, "Events page failed schema validation");
            e
        })?;

        debug!(page, total_pages = decoded.total_pages, "Fetched events page");
        Ok(decoded.into())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<EventDetail>> {
        let response = self.api.get(&format!("/api/events/{}", id)).await?;
        let body = String::from_utf8_lossy(&response.body);
        if matches!(body.trim(), "" | "null") {
            debug!(event_id = %id, "Event response carried no event");
            return Ok(None);
        }
        response.decode().map(Some)
    }

    async fn create(&self, event: &CreateEvent) -> AppResult<EventDetail> {
        validate_request(event, today())?;
        let response = self.api.post("/api/events", &[], event).await?;
        let created: EventDetail = response.decode()?;
        info!(event_id = %created.id, "Event created");
        Ok(created)
    }

    async fn update(&self, id: Uuid, event: &UpdateEvent) -> AppResult<EventDetail> {
        validate_request(event, today())?;
        let response = self.api.put(&format!("/api/events/{}", id), event).await?;
        let updated: EventDetail = response.decode()?;
        info!(event_id = %updated.id, "Event updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<StatusCode> {
        let response = self.api.delete(&format!("/api/events/{}", id)).await?;
        Ok(response.status)
    }

    async fn check_in(&self, id: Uuid) -> AppResult<StatusCode> {
        let response = self
            .api
            .post_empty(&format!("/api/events/{}/checkin", id))
            .await?;
        Ok(response.status)
    }

    async fn uncheck_in(&self, id: Uuid) -> AppResult<StatusCode> {
        let response = self
            .api
            .delete(&format!("/api/events/{}/checkin", id))
            .await?;
        Ok(response.status)
    }

    async fn my_events(&self) -> AppResult<Vec<EventSummary>> {
        let response = self.api.get("/api/me/events").await?;
        let collection: EventCollection = response.decode().map_err(|e| {
            error!(error = %e, "My events failed schema validation");
            e
        })?;
        Ok(collection.into_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::{api_client, detail_json, page_json, EVENT_ID};
    use mockito::Matcher;
    use serde_json::json;

    fn service(server: &mockito::Server) -> EventsService {
        EventsService::new(api_client(server))
    }

    #[tokio::test]
    async fn test_filter_posts_normalized_body_with_page_and_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/events/filter")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "0".into()),
                Matcher::UrlEncoded("size".into(), "10".into()),
            ]))
            .match_body(Matcher::Json(json!({ "name": "Conf", "categoryName": ["Tech"] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page_json(3).to_string())
            .expect(1)
            .create_async()
            .await;

        let filter = FilterRequest {
            name: Some("Conf".into()),
            date: None,
            category_name: Some(vec!["Tech".into()]),
        };
        let page = service(&server).fetch_filtered(&filter, 0).await.unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.events.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_filter_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let filter = FilterRequest {
            date: Some("someday".into()),
            ..FilterRequest::default()
        };
        let err = service(&server).fetch_filtered(&filter, 0).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_page_is_a_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/events/filter")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "content": [{ "id": "nope" }], "totalPages": 1 }).to_string())
            .create_async()
            .await;

        let err = service(&server)
            .fetch_filtered(&FilterRequest::default(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_check_in_returns_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/api/events/{}/checkin", EVENT_ID).as_str())
            .with_status(204)
            .create_async()
            .await;

        let id = Uuid::parse_str(EVENT_ID).unwrap();
        let status = service(&server).check_in(id).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_get_decodes_detail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/api/events/{}", EVENT_ID).as_str())
            .with_status(200)
            .with_body(detail_json(false).to_string())
            .create_async()
            .await;

        let id = Uuid::parse_str(EVENT_ID).unwrap();
        let event = service(&server).get(id).await.unwrap().unwrap();
        assert_eq!(event.id.to_string(), EVENT_ID);
        assert_eq!(event.organizer.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_get_without_event_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/api/events/{}", EVENT_ID).as_str())
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let id = Uuid::parse_str(EVENT_ID).unwrap();
        assert!(service(&server).get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_my_events_reads_embedded_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/me/events")
            .with_status(200)
            .with_body(
                json!({
                    "_embedded": { "eventSummaryResponseDTOList": page_json(1)["content"] },
                    "_links": { "self": { "href": "/api/me/events" } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let events = service(&server).my_events().await.unwrap();
        assert_eq!(events.len(), 1);
    }
}
