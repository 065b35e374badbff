use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, trace};
use wc_core::ports::{ClockPort, SyncTransportPort};
use wc_core::{ClipSnapshot, TransportError, WireFormat, WireSnapshot};

/// Resolves the `/clip` resource for a configured relay address.
///
/// Accepts `host:port`, a base URL, or a URL already ending in `/clip`.
pub fn clip_endpoint(relay_url: &str) -> Result<Url, TransportError> {
    let trimmed = relay_url.trim();
    if trimmed.is_empty() {
        return Err(TransportError::InvalidAddress("relay url is empty".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let mut url = Url::parse(&with_scheme)
        .map_err(|e| TransportError::InvalidAddress(format!("{relay_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidAddress(format!(
            "{relay_url}: unsupported scheme {}",
            url.scheme()
        )));
    }

    let path = url.path().trim_end_matches('/').to_string();
    if !path.ends_with("/clip") {
        url.set_path(&format!("{path}/clip"));
    }
    Ok(url)
}

/// [`SyncTransportPort`] over the relay's HTTP API.
pub struct HttpSyncTransport {
    client: Client,
    endpoint: Url,
    wire_format: WireFormat,
    clock: Arc<dyn ClockPort>,
}

impl HttpSyncTransport {
    pub fn new(
        relay_url: &str,
        wire_format: WireFormat,
        timeout: Duration,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, TransportError> {
        let endpoint = clip_endpoint(relay_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            wire_format,
            clock,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SyncTransportPort for HttpSyncTransport {
    async fn pull(&self) -> Result<ClipSnapshot, TransportError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let wire = WireSnapshot::from_json(&body)?;
        let snapshot = wire.into_snapshot(self.clock.now_secs());
        trace!(
            kind = %snapshot.mime,
            timestamp = snapshot.timestamp,
            "Pulled relay snapshot"
        );
        Ok(snapshot)
    }

    async fn push(&self, snapshot: &ClipSnapshot) -> Result<(), TransportError> {
        let body = WireSnapshot::encode(snapshot, self.wire_format);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // The acknowledgement body carries nothing we need.
        let _ = response.bytes().await;
        if !status.is_success() {
            debug!(status = status.as_u16(), "Relay rejected push");
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if let Some(status) = error.status() {
        TransportError::Status(status.as_u16())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
