//! Minimal HTTP/1 transport over a fresh TCP connection per request.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, USER_AGENT};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::{BodyExt, Full};
use tracing::debug;

use crate::error::ClientError;

const CLIENT_AGENT: &str = concat!("rapidmq-dash/", env!("CARGO_PKG_VERSION"));

/// A fully read response.
#[derive(Debug)]
pub(crate) struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Request body with its content type.
pub(crate) struct RequestBody {
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    /// `host:port`, used for both the TCP connect and the Host header.
    authority: String,
    /// Path prefix from the base URL, without a trailing slash.
    prefix: String,
}

impl Transport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = base_url.parse().map_err(|_| invalid("not a valid URI"))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(_) => return Err(invalid("only http:// is supported")),
            None => return Err(invalid("missing scheme")),
        }
        let host = uri.host().ok_or_else(|| invalid("missing host"))?;
        let port = uri.port_u16().unwrap_or(80);
        let prefix = uri.path().trim_end_matches('/').to_string();

        Ok(Self {
            authority: format!("{host}:{port}"),
            prefix,
        })
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<HttpResponse, ClientError> {
        let target = format!("{}{}", self.prefix, path);

        let stream = tokio::net::TcpStream::connect(&self.authority)
            .await
            .map_err(|source| ClientError::Connect {
                address: self.authority.clone(),
                source,
            })?;

        let io = hyper_util::rt::TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(ClientError::Handshake)?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "connection closed with error");
            }
        });

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(&target)
            .header(HOST, &self.authority)
            .header(USER_AGENT, CLIENT_AGENT);

        let payload = match body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, body.content_type);
                Full::new(body.bytes)
            }
            None => Full::new(Bytes::new()),
        };
        let req = builder.body(payload)?;

        let resp = sender.send_request(req).await.map_err(ClientError::Request)?;
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(ClientError::Body)?
            .to_bytes();

        debug!(%method, %target, %status, bytes = bytes.len(), "queue service responded");
        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
