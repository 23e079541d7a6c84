use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::message::RenderedMessage;

/// Destination for a rendered notification.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn send(&self, message: &RenderedMessage) -> Result<()>;
}

#[derive(Serialize)]
struct Payload<'a> {
    content: &'a str,
}

pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.webhook_url.clone(),
        }
    }
}

#[async_trait]
impl Sink for WebhookSink {
    async fn send(&self, message: &RenderedMessage) -> Result<()> {
        let payload = Payload {
            content: message.as_str(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .with_context(|| "Sending webhook request")?;
        debug!(status = %response.status(), "webhook responded");
        response
            .error_for_status()
            .with_context(|| "Webhook returned an error status")?;
        Ok(())
    }
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed { reason: String },
}

/// Send `message` once. Errors are folded into [`Delivery::Failed`].
pub async fn deliver(sink: &dyn Sink, message: &RenderedMessage) -> Delivery {
    match sink.send(message).await {
        Ok(()) => Delivery::Sent,
        Err(err) => {
            let reason = format!("{err:#}");
            debug!(%reason, "notification delivery failed");
            Delivery::Failed { reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{render, NotificationRequest, Status};
    use assert_matches::assert_matches;
    use chrono::Local;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSink {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Sink for CountingSink {
        async fn send(&self, _message: &RenderedMessage) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    fn sample_message() -> RenderedMessage {
        let req = NotificationRequest {
            status: Status::Start,
            start_time: None,
            warnings: 0,
            errors: 0,
            message: String::new(),
        };
        render(&req, &Local::now())
    }

    #[tokio::test]
    async fn successful_send_reports_sent() {
        let sink = CountingSink::new(false);
        let outcome = deliver(&sink, &sample_message()).await;
        assert_eq!(outcome, Delivery::Sent);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_captured_without_retry() {
        let sink = CountingSink::new(true);
        let outcome = deliver(&sink, &sample_message()).await;
        assert_matches!(outcome, Delivery::Failed { ref reason } if reason.contains("connection refused"));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_webhook_fails() {
        let config = Config {
            webhook_url: "http://127.0.0.1:9/hook".to_string(),
        };
        let sink = WebhookSink::new(&config);
        let outcome = deliver(&sink, &sample_message()).await;
        assert_matches!(outcome, Delivery::Failed { ref reason } if reason.contains("Sending webhook request"));
    }

    #[tokio::test]
    async fn webhook_posts_content_json() {
        let mut server = mockito::Server::new_async().await;
        let message = sample_message();
        let mock = server
            .mock("POST", "/api/webhooks/1/token")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"content": message.as_str()}),
            ))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let config = Config {
            webhook_url: format!("{}/api/webhooks/1/token", server.url()),
        };
        let outcome = deliver(&WebhookSink::new(&config), &message).await;
        assert_eq!(outcome, Delivery::Sent);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_a_failed_delivery() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(429)
            .expect(1)
            .create_async()
            .await;

        let config = Config {
            webhook_url: format!("{}/hook", server.url()),
        };
        let outcome = deliver(&WebhookSink::new(&config), &sample_message()).await;
        assert_matches!(outcome, Delivery::Failed { ref reason } if reason.contains("429"));
        mock.assert_async().await;
    }

    #[test]
    fn payload_shape() {
        let value = serde_json::to_value(Payload { content: "hi" }).unwrap();
        assert_eq!(value, serde_json::json!({"content": "hi"}));
    }
}
