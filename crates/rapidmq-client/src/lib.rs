//! rapidmq-client — HTTP client for the RapidMQ queue service.
//!
//! Issues the three queue operations the voice commands need and fetches
//! the `/metrics` exposition payload. Every call opens its own HTTP/1
//! connection; there are no retries, timeouts, or credentials.
//!
//! # Outcome classification
//!
//! | Operation | HTTP response | Transport error |
//! |---|---|---|
//! | `create_queue` | `Success(body)`, any status | `Failure` |
//! | `publish_message` | `Success(body)`, any status | `Failure` |
//! | `consume_message` | 2xx + `{"content"}` → `Success`, otherwise `Empty` | `Failure` |

pub mod error;
pub mod metrics_source;
pub mod queue;
mod transport;

pub use error::ClientError;
pub use metrics_source::HttpMetricsSource;
pub use queue::QueueServiceClient;
