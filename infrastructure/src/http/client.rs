//! HTTP client for the digital twin backend

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use twin_application::{ChatGateway, GatewayError, StreamSession};
use twin_domain::StreamEvent;

use super::decoder::SseDecoder;
use super::error::{map_reqwest_error, BackendError, Result};
use super::protocol::{error_message, ChatRequest, GenerationResponse, StatusResponse};

/// Default base URL of the digital twin service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/digital-twin";

/// Events buffered before the stream pump waits for the consumer
const STREAM_CHANNEL_CAPACITY: usize = 64;

/// [`ChatGateway`] implementation over the backend's REST API.
///
/// One shared `reqwest::Client` serves all requests. There is no overall
/// request timeout — a streaming generation runs as long as the model keeps
/// producing — but connection establishment can be bounded.
pub struct HttpChatGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatGateway {
    /// Create a gateway for `base_url` (trailing slashes are tolerated).
    ///
    /// `connect_timeout` bounds connection establishment only; pass `None`
    /// to leave dialing unbounded as well.
    pub fn new(base_url: impl Into<String>, connect_timeout: Option<Duration>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");
        Self { base_url, client }
    }

    fn status_url(&self) -> String {
        self.base_url.clone()
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    fn generate_url(&self) -> String {
        format!("{}/ai/generate", self.base_url)
    }

    fn generate_stream_url(&self) -> String {
        format!("{}/ai/generateStream", self.base_url)
    }

    /// GET `url` and unwrap the `status` field of the response body.
    async fn fetch_status(&self, url: String) -> Result<String> {
        debug!(url = %url, "checking backend status");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: format!("Status check failed: {}", status.as_u16()),
            });
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| BackendError::UnexpectedBody(e.to_string()))?;
        Ok(body.status)
    }

    async fn request_generation(&self, message: &str) -> Result<String> {
        let url = self.generate_url();
        debug!(url = %url, "requesting generation");
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body, "Request failed"),
            });
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| BackendError::UnexpectedBody(e.to_string()))?;
        Ok(body.generation)
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn status(&self) -> std::result::Result<String, GatewayError> {
        Ok(self.fetch_status(self.status_url()).await?)
    }

    async fn health(&self) -> std::result::Result<String, GatewayError> {
        Ok(self.fetch_status(self.health_url()).await?)
    }

    async fn generate(&self, message: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.request_generation(message).await?)
    }

    fn generate_stream(&self, message: &str) -> StreamSession {
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        let client = self.client.clone();
        let url = self.generate_stream_url();
        let request = ChatRequest {
            message: message.to_string(),
        };
        let cancellation = token.clone();
        tokio::spawn(async move {
            pump_stream(client, url, request, tx, cancellation).await;
        });

        StreamSession::new(rx, token)
    }
}

/// Drive one streaming request to completion, feeding decoded events into
/// `tx`.
///
/// Sends exactly one terminal event (`Done` or `Error`) unless cancelled;
/// on cancellation it returns without a terminal event and the dropped
/// sender closes the channel.
async fn pump_stream(
    client: reqwest::Client,
    url: String,
    request: ChatRequest,
    tx: mpsc::Sender<StreamEvent>,
    cancellation: CancellationToken,
) {
    debug!(url = %url, "starting streaming generation");

    let send = client.post(&url).json(&request).send();
    let outcome = tokio::select! {
        biased;
        _ = cancellation.cancelled() => return,
        outcome = send => outcome,
    };

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            let message = map_reqwest_error(e).to_string();
            send_event(&tx, StreamEvent::Error(message)).await;
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &body, "Stream failed");
        warn!(status = status.as_u16(), "streaming request rejected: {message}");
        send_event(&tx, StreamEvent::Error(message)).await;
        return;
    }

    let mut decoder = SseDecoder::new();
    let mut body = response.bytes_stream();

    loop {
        let item = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return,
            item = body.next() => item,
        };
        match item {
            Some(Ok(bytes)) => {
                let chunks = match decoder.feed(&bytes) {
                    Ok(chunks) => chunks,
                    Err(e) => {
                        let message = BackendError::Decode(e.to_string()).to_string();
                        send_event(&tx, StreamEvent::Error(message)).await;
                        return;
                    }
                };
                for chunk in chunks {
                    if !send_event(&tx, StreamEvent::Chunk(chunk)).await {
                        return;
                    }
                }
            }
            Some(Err(e)) => {
                let message = map_reqwest_error(e).to_string();
                send_event(&tx, StreamEvent::Error(message)).await;
                return;
            }
            None => break,
        }
    }

    // Body ended cleanly: flush any unterminated tail line, then signal done
    if let Some(chunk) = decoder.finish() {
        if !send_event(&tx, StreamEvent::Chunk(chunk)).await {
            return;
        }
    }
    send_event(&tx, StreamEvent::Done).await;
}

/// Send one event; returns false when the receiver is gone.
async fn send_event(tx: &mpsc::Sender<StreamEvent>, event: StreamEvent) -> bool {
    tx.send(event).await.is_ok()
}

// ==================== Tests ====================
