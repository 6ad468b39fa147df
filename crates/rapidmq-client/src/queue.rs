//! Queue operations behind the voice commands.

use bytes::Bytes;
use http::Method;
use rapidmq_core::CommandOutcome;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::transport::{RequestBody, Transport};

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    queue_name: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConsumedMessage {
    content: String,
}

/// Client for `POST /queue/{name}`, `POST /publish` and
/// `GET /consume/{name}`.
#[derive(Debug, Clone)]
pub struct QueueServiceClient {
    transport: Transport,
}

impl QueueServiceClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            transport: Transport::new(base_url)?,
        })
    }

    /// Create a queue. Whatever the service answers is reported verbatim;
    /// "already exists" and "created" are not told apart.
    pub async fn create_queue(&self, name: &str) -> CommandOutcome {
        let path = format!("/queue/{}", urlencoding::encode(name));
        match self.transport.send(Method::POST, &path, None).await {
            Ok(resp) => {
                debug!(queue = %name, status = %resp.status, "create queue answered");
                CommandOutcome::success(resp.body)
            }
            Err(e) => transport_failure("create_queue", e),
        }
    }

    /// Publish `message` to `queue_name` with a JSON body.
    pub async fn publish_message(&self, queue_name: &str, message: &str) -> CommandOutcome {
        let body = match serde_json::to_vec(&PublishRequest {
            queue_name,
            message,
        }) {
            Ok(bytes) => RequestBody {
                content_type: "application/json",
                bytes: Bytes::from(bytes),
            },
            Err(e) => return transport_failure("publish_message", ClientError::Encode(e)),
        };

        match self.transport.send(Method::POST, "/publish", Some(body)).await {
            Ok(resp) => {
                debug!(queue = %queue_name, status = %resp.status, "publish answered");
                CommandOutcome::success(resp.body)
            }
            Err(e) => transport_failure("publish_message", e),
        }
    }

    /// Consume one message.
    ///
    /// Any rejected or unreadable response is reported as `Empty`, the
    /// backend's way of saying the queue has nothing to hand out. Only a
    /// transport failure is a `Failure`.
    pub async fn consume_message(&self, queue_name: &str) -> CommandOutcome {
        let path = format!("/consume/{}", urlencoding::encode(queue_name));
        let resp = match self.transport.send(Method::GET, &path, None).await {
            Ok(resp) => resp,
            Err(e) => return transport_failure("consume_message", e),
        };

        if !resp.status.is_success() {
            debug!(queue = %queue_name, status = %resp.status, "consume rejected, reporting empty queue");
            return CommandOutcome::Empty;
        }

        match serde_json::from_str::<ConsumedMessage>(&resp.body) {
            Ok(msg) => CommandOutcome::success(format!("Consumed message: {}", msg.content)),
            Err(e) => {
                debug!(queue = %queue_name, error = %e, "consume body unreadable, reporting empty queue");
                CommandOutcome::Empty
            }
        }
    }
}

fn transport_failure(operation: &str, err: ClientError) -> CommandOutcome {
    warn!(%operation, error = %err, "queue service request failed");
    CommandOutcome::failure(err.to_string())
}
