use async_trait::async_trait;
use reqwest::StatusCode;

use crate::Status;

/// One-shot delivery of an encoded collection to the review endpoint.
///
/// Implementations perform a single exchange per call and report the
/// endpoint's status code. Any failure to complete the exchange is an `Err`.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn post(&self, body: String) -> Result<StatusCode, Status>;
}
