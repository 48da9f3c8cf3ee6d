use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use tracing::instrument;

use crate::{traits::SubmitTransport, Status};

/// Client for the areweanticheatyet submission endpoint.
#[derive(Clone, Debug)]
pub struct ReviewApi {
    url: String,
    client: reqwest::Client,
}

impl ReviewApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Status> {
        // No cookie store is configured, so no credentials travel with the
        // request.
        let client = reqwest::Client::builder()
            .referer(false)
            .timeout(timeout)
            .build()?;

        Ok(ReviewApi {
            url: url.into(),
            client,
        })
    }

    pub fn default_endpoint() -> &'static str {
        SUBMIT_ENDPOINT
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(level = "trace", skip(self, body), fields(bytes = body.len()))]
    async fn send(&self, body: String) -> Result<StatusCode, Status> {
        let resp = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CACHE_CONTROL, "no-cache")
            .body(body)
            .send()
            .await;

        match resp {
            Ok(resp) => Ok(resp.status()),
            Err(e) => Err(Status::internal(format!(
                "Request failed: {e}\nurl: {}",
                self.url
            ))),
        }
    }
}

#[async_trait]
impl SubmitTransport for ReviewApi {
    async fn post(&self, body: String) -> Result<StatusCode, Status> {
        self.send(body).await
    }
}

const SUBMIT_ENDPOINT: &str = "https://export.areweanticheatyet.com/submit";
