//! CARG API client
//!
//! Owns the HTTP transport (built once, reused for every request), the
//! process-wide concurrency gate, and the retry/fallback policy. The client
//! is constructed explicitly and passed into the sync path; there is no
//! module-level singleton.

use super::page::Page;
use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::fixtures;
use crate::types::{FallbackPolicy, JsonValue, ResourceKind};
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::{Client, Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Client for the CARG resource API
pub struct CargClient {
    http: Client,
    config: ConnectorConfig,
    /// Caps simultaneous in-flight requests process-wide. A throttle on the
    /// remote, not an ordering mechanism.
    gate: Arc<Semaphore>,
}

impl CargClient {
    /// Create a client from connector configuration
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("carg-sync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let gate = Arc::new(Semaphore::new(config.max_concurrency));

        info!(api_url = %config.api_url, "CARG client initialized");
        if config.is_mock_mode() {
            warn!("API configuration incomplete, serving fixture data");
        }

        Ok(Self { http, config, gate })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Send one API request, with bounded 429 retry and fallback recovery
    ///
    /// A 429 response is reissued at the same offset after sleeping for the
    /// Retry-After duration (exponential fallback delay when the header is
    /// absent), up to `rate_limit_retries` attempts. Any other HTTP or
    /// transport failure goes through the fallback policy.
    pub async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        if self.config.is_mock_mode() {
            debug!(endpoint, "no API config, serving fixture data");
            return Ok(fixture_for_endpoint(endpoint));
        }

        let url = format!("{}/api/v1/{}", self.config.api_url, endpoint);
        let mut attempt = 0u32;

        loop {
            let outcome = self.issue(&method, &url, query, body.as_ref()).await;

            match outcome {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    if attempt >= self.config.rate_limit_retries {
                        let err = Error::RetryBudgetExhausted { attempts: attempt };
                        return self.recover(endpoint, err);
                    }
                    let delay = retry_after(&response)
                        .unwrap_or_else(|| backoff_delay(self.config.retry_delay_secs, attempt));
                    warn!(
                        endpoint,
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs(),
                        "rate limited (429), backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Ok(response) if !response.status().is_success() => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    return self.recover(endpoint, Error::http_status(status, body));
                }
                Ok(response) => {
                    return match response.json::<JsonValue>().await {
                        Ok(json) => Ok(json),
                        Err(e) => self.recover(endpoint, Error::Http(e)),
                    };
                }
                Err(e) => return self.recover(endpoint, Error::Http(e)),
            }
        }
    }

    /// Issue one wire request under the concurrency gate
    async fn issue(
        &self,
        method: &Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&JsonValue>,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let _permit = self.gate.acquire().await;

        let mut req = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.config.api_token);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await
    }

    /// Apply the fallback policy to a failed request
    fn recover(&self, endpoint: &str, err: Error) -> Result<JsonValue> {
        match self.config.fallback_policy {
            FallbackPolicy::SubstituteFixture => {
                warn!(endpoint, error = %err, "request failed, substituting fixture data");
                Ok(fixture_for_endpoint(endpoint))
            }
            FallbackPolicy::FailFast => Err(err),
        }
    }

    /// Fetch one page of raw items for a resource kind
    pub async fn fetch_page(
        &self,
        kind: ResourceKind,
        offset: u32,
        page_size: u32,
    ) -> Result<Page> {
        let query = [("skip", offset.to_string()), ("take", page_size.to_string())];
        let body = self
            .send_request(Method::GET, kind.endpoint(), &query, None)
            .await?;
        Ok(Page::from_response(body, offset))
    }

    /// Lazily fetch all pages for a resource kind
    ///
    /// Yields pages until exhaustion; an empty item list terminates without
    /// yielding. Not restartable mid-stream, a fresh call starts at offset 0.
    pub fn fetch_all(&self, kind: ResourceKind) -> BoxStream<'_, Result<Page>> {
        let page_size = self.config.page_size;
        stream::try_unfold(Some(0u32), move |state| async move {
            let Some(offset) = state else {
                return Ok(None);
            };
            let page = self.fetch_page(kind, offset, page_size).await?;
            if page.is_empty() {
                return Ok(None);
            }
            debug!(kind = %kind, offset, count = page.len(), "fetched page");
            let next = if page.is_last(page_size) {
                None
            } else {
                Some(offset + page_size)
            };
            Ok(Some((page, next)))
        })
        .boxed()
    }

    /// Check whether the CARG API reports itself healthy
    pub async fn health_check(&self) -> bool {
        match self.send_request(Method::GET, "health", &[], None).await {
            Ok(body) => body["status"] == "healthy",
            Err(e) => {
                warn!(error = %e, "CARG API health check failed");
                false
            }
        }
    }

    /// Check whether the token may create webhooks
    pub async fn has_webhook_permission(&self) -> bool {
        match self
            .send_request(Method::GET, "webhooks/permissions", &[], None)
            .await
        {
            Ok(body) => body["canCreateWebhooks"].as_bool().unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "could not check webhook permissions");
                false
            }
        }
    }

    /// Register the resync webhook, skipping if one already targets our URL
    ///
    /// Best-effort: permission and existence checks degrade to a log line,
    /// never an error for the caller.
    pub async fn ensure_webhook(&self, app_host: &str) -> Result<()> {
        if !self.has_webhook_permission().await {
            warn!("no permission to create webhooks");
            return Ok(());
        }

        let webhook_url = format!("{}/integration/webhook", app_host.trim_end_matches('/'));

        match self.send_request(Method::GET, "webhooks", &[], None).await {
            Ok(existing) => {
                let hooks = existing["data"].as_array().cloned().unwrap_or_default();
                if hooks.iter().any(|hook| hook["url"] == webhook_url.as_str()) {
                    info!(url = %webhook_url, "webhook already exists");
                    return Ok(());
                }
            }
            Err(e) => warn!(error = %e, "could not list existing webhooks"),
        }

        let webhook_config = json!({
            "name": "carg-sync-webhook",
            "url": webhook_url,
            "events": [
                "project.created", "project.updated", "project.deleted",
                "service.created", "service.updated", "service.deleted",
                "component.created", "component.updated", "component.deleted",
                "deployment.created", "deployment.updated", "deployment.completed"
            ],
            "active": true
        });

        match self
            .send_request(Method::POST, "webhooks", &[], Some(webhook_config))
            .await
        {
            Ok(_) => {
                info!(url = %webhook_url, "webhook created");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to create webhook");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for CargClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CargClient")
            .field("api_url", &self.config.api_url)
            .field("mock_mode", &self.config.is_mock_mode())
            .finish_non_exhaustive()
    }
}

/// Pick the fixture body matching an endpoint
fn fixture_for_endpoint(endpoint: &str) -> JsonValue {
    for kind in ResourceKind::all() {
        if endpoint.starts_with(kind.endpoint()) {
            return fixtures::fixture_response(kind);
        }
    }
    json!({ "data": [] })
}

/// Read the Retry-After header as a duration
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Exponential fallback delay when Retry-After is absent
fn backoff_delay(base_secs: u64, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    Duration::from_secs(base_secs.saturating_mul(factor))
}

#[cfg(test)]
mod backoff_tests {
    use super::*;

    #[test]
    fn test_backoff_delay_grows_exponentially() {
        assert_eq!(backoff_delay(60, 0), Duration::from_secs(60));
        assert_eq!(backoff_delay(60, 1), Duration::from_secs(120));
        assert_eq!(backoff_delay(60, 2), Duration::from_secs(240));
    }

    #[test]
    fn test_fixture_for_endpoint() {
        let body = fixture_for_endpoint("projects");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let body = fixture_for_endpoint("deployments?skip=0");
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let body = fixture_for_endpoint("health");
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}
