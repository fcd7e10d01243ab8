//! Event CRUD endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use eventcal_core::{Event, EventId, EventInput};
use serde::Serialize;

use crate::routes::{AppError, OrFail};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[derive(Serialize)]
pub struct EventResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub event: Event,
}

#[derive(Serialize)]
pub struct EventListResponse {
    pub success: bool,
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

fn parse_id(raw: &str) -> Result<EventId, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request("Invalid or missing event ID"))
}

/// Unwrap a JSON body, validating it as an event payload
fn event_input(body: Result<Json<EventInput>, JsonRejection>) -> Result<EventInput, AppError> {
    let Json(input) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    input.validate()?;
    Ok(input)
}

/// POST /api/events - Create an event
async fn create_event(
    State(state): State<AppState>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<Json<EventResponse>, AppError> {
    let input = event_input(body)?;

    let event = state
        .store
        .write()
        .await
        .create(input)
        .or_fail("Failed to create event")?;

    tracing::info!(event_id = event.id, title = %event.title, "created event");

    Ok(Json(EventResponse {
        success: true,
        message: None,
        event,
    }))
}

/// GET /api/events - All events, earliest start first
async fn list_events(State(state): State<AppState>) -> Result<Json<EventListResponse>, AppError> {
    let events = state
        .store
        .read()
        .await
        .list()
        .or_fail("Failed to fetch events")?;

    Ok(Json(EventListResponse {
        success: true,
        events,
    }))
}

/// GET /api/events/:id
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>, AppError> {
    let id = parse_id(&id)?;

    let event = state
        .store
        .read()
        .await
        .get(id)
        .or_fail("Failed to fetch event")?;

    Ok(Json(EventResponse {
        success: true,
        message: None,
        event,
    }))
}

/// PUT /api/events/:id - Replace an event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<Json<EventResponse>, AppError> {
    let id = parse_id(&id)?;
    let input = event_input(body)?;

    let event = state
        .store
        .write()
        .await
        .update(id, input)
        .or_fail("Failed to update event")?;

    tracing::info!(event_id = event.id, "updated event");

    Ok(Json(EventResponse {
        success: true,
        message: Some("Event updated successfully"),
        event,
    }))
}

/// DELETE /api/events/:id
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .write()
        .await
        .delete(id)
        .or_fail("Failed to delete event")?;

    tracing::info!(event_id = id, "deleted event");

    Ok(Json(MessageResponse {
        success: true,
        message: "Event deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use eventcal_core::recurrence::ExpandOptions;
    use eventcal_core::store::MemoryStore;
    use serde_json::{Value, json};

    use crate::routes::app;
    use crate::routes::test_support::send;
    use crate::state::AppState;

    fn test_app() -> axum::Router {
        app(AppState::new(MemoryStore::new(), ExpandOptions::default()))
    }

    fn standup() -> Value {
        json!({
            "title": "Standup",
            "description": "Daily sync",
            "startDate": "2024-03-04T09:00",
            "endDate": "2024-03-04T09:15",
            "isRecurring": true,
            "frequency": "WEEKLY",
            "daysOfWeek": ["MONDAY", "FRIDAY"],
            "recurrenceEnd": null
        })
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/api/events", Some(standup())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["event"]["id"], 1);
        assert_eq!(body["event"]["startDate"], "2024-03-04T09:00:00");
        assert_eq!(body["event"]["daysOfWeek"], json!(["MONDAY", "FRIDAY"]));

        let (status, body) = send(&app, "GET", "/api/events/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["title"], "Standup");
        assert_eq!(body["event"]["frequency"], "WEEKLY");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_start() {
        let app = test_app();

        let mut later = standup();
        later["title"] = json!("Later");
        later["startDate"] = json!("2024-04-01T09:00");
        later["endDate"] = json!("2024-04-01T10:00");
        send(&app, "POST", "/api/events", Some(later)).await;
        send(&app, "POST", "/api/events", Some(standup())).await;

        let (status, body) = send(&app, "GET", "/api/events", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Standup", "Later"]);
    }

    #[tokio::test]
    async fn test_invalid_payloads_are_rejected() {
        let app = test_app();

        let mut inverted = standup();
        inverted["endDate"] = json!("2024-03-03T09:00");
        let (status, body) = send(&app, "POST", "/api/events", Some(inverted)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["field"], "endDate");

        let mut no_days = standup();
        no_days["daysOfWeek"] = json!([]);
        let (status, body) = send(&app, "POST", "/api/events", Some(no_days)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "daysOfWeek");

        let (status, body) = send(&app, "POST", "/api/events", Some(json!({ "title": 3 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_bad_and_unknown_ids() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/api/events/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid or missing event ID");

        let (status, body) = send(&app, "GET", "/api/events/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Event not found");

        let (status, _) = send(&app, "PUT", "/api/events/42", Some(standup())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/api/events/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_replaces_recurrence_fields() {
        let app = test_app();
        send(&app, "POST", "/api/events", Some(standup())).await;

        let replacement = json!({
            "title": "Standup (monthly)",
            "startDate": "2024-03-15T09:00",
            "endDate": "2024-03-15T09:15",
            "isRecurring": true,
            "frequency": "MONTHLY",
            "recurrenceEnd": "2024-12-31"
        });
        let (status, body) = send(&app, "PUT", "/api/events/1", Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event updated successfully");
        assert_eq!(body["event"]["frequency"], "MONTHLY");
        assert_eq!(body["event"]["daysOfWeek"], json!([]));
        assert_eq!(body["event"]["description"], Value::Null);
        assert_eq!(body["event"]["recurrenceEnd"], "2024-12-31T00:00:00");
    }

    #[tokio::test]
    async fn test_delete_removes_event() {
        let app = test_app();
        send(&app, "POST", "/api/events", Some(standup())).await;

        let (status, body) = send(&app, "DELETE", "/api/events/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event deleted successfully");

        let (status, _) = send(&app, "GET", "/api/events/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
