//! `/metrics` fetch for the poller.

use http::Method;
use rapidmq_metrics::poller::FetchFuture;
use rapidmq_metrics::{FetchError, MetricsSource};

use crate::error::ClientError;
use crate::transport::Transport;

/// Fetches the exposition payload over HTTP. Non-2xx is an error.
#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    transport: Transport,
    path: String,
}

impl HttpMetricsSource {
    pub fn new(base_url: &str, path: &str) -> Result<Self, ClientError> {
        Ok(Self {
            transport: Transport::new(base_url)?,
            path: path.to_string(),
        })
    }
}

impl MetricsSource for HttpMetricsSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let resp = self
                .transport
                .send(Method::GET, &self.path, None)
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            if !resp.status.is_success() {
                return Err(FetchError::Status {
                    status: resp.status.as_u16(),
                    body: resp.body,
                });
            }
            Ok(resp.body)
        })
    }
}
