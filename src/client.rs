//! HTTP client for communicating with eventcal-server

use anyhow::{Context, Result};
use eventcal_core::{Event, EventId, EventInput};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for eventcal-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Response types matching server API

#[derive(Deserialize)]
struct EventBody {
    event: Event,
}

#[derive(Deserialize)]
struct EventListBody {
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct FieldErrorBody {
    field: String,
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldErrorBody>,
}

impl ErrorResponse {
    fn describe(&self) -> String {
        let mut text = self.message.clone();
        if let Some(error) = &self.error {
            text.push_str(&format!(": {error}"));
        }
        for field in &self.errors {
            text.push_str(&format!("\n  {}: {}", field.field, field.message));
        }
        text
    }
}

impl Client {
    /// Connect to the server, failing early if it does not answer
    pub async fn connect(base_url: &str) -> Result<Self> {
        let client = Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        client.health_check().await.with_context(|| {
            format!(
                "Could not reach eventcal-server at {}.\n\
                Start it with:\n  eventcal-server",
                client.base_url
            )
        })?;

        Ok(client)
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Send a request and decode the success body, or turn the error
    /// envelope into an error.
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await.context("Failed to connect to server")?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let err: ErrorResponse = serde_json::from_str(&body)
                .map_err(|_| anyhow::anyhow!("Server returned {status}"))?;
            anyhow::bail!("{}", err.describe());
        }

        serde_json::from_str(&body).context("Unexpected response from server")
    }

    /// GET /api/events
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let body: EventListBody = self
            .call(self.http.get(format!("{}/api/events", self.base_url)))
            .await?;
        Ok(body.events)
    }

    /// GET /api/events/:id
    pub async fn get_event(&self, id: EventId) -> Result<Event> {
        let body: EventBody = self
            .call(self.http.get(format!("{}/api/events/{}", self.base_url, id)))
            .await?;
        Ok(body.event)
    }

    /// POST /api/events
    pub async fn create_event(&self, input: &EventInput) -> Result<Event> {
        let body: EventBody = self
            .call(
                self.http
                    .post(format!("{}/api/events", self.base_url))
                    .json(input),
            )
            .await?;
        Ok(body.event)
    }

    /// PUT /api/events/:id
    pub async fn update_event(&self, id: EventId, input: &EventInput) -> Result<Event> {
        let body: EventBody = self
            .call(
                self.http
                    .put(format!("{}/api/events/{}", self.base_url, id))
                    .json(input),
            )
            .await?;
        Ok(body.event)
    }

    /// DELETE /api/events/:id
    pub async fn delete_event(&self, id: EventId) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/api/events/{}", self.base_url, id))
            .send()
            .await
            .context("Failed to connect to server")?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => anyhow::bail!("Event {} not found", id),
            status => {
                let err: ErrorResponse = resp
                    .json()
                    .await
                    .map_err(|_| anyhow::anyhow!("Server returned {status}"))?;
                anyhow::bail!("{}", err.describe())
            }
        }
    }
}
