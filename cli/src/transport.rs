//! Blocking HTTP transport backed by ureq.

use std::io::ErrorKind;

use spycats_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;

/// Executes core requests over the network.
///
/// Status codes are never turned into errors here: 4xx/5xx responses come
/// back as data so the core can read their error bodies.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.path), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&req.path), &req.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&req.path), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.path), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&req.path), &req.headers).send_empty(),
        };
        let mut response = result.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

/// Sort ureq failures into "never reached the backend" and everything else.
fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => TransportError::Unreachable,
        ureq::Error::Io(e) if is_connect_failure(e.kind()) => TransportError::Unreachable,
        other => TransportError::Other(other.to_string()),
    }
}

fn is_connect_failure(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_unreachable() {
        assert_eq!(classify(ureq::Error::ConnectionFailed), TransportError::Unreachable);
        assert_eq!(classify(ureq::Error::HostNotFound), TransportError::Unreachable);
        let refused = std::io::Error::from(ErrorKind::ConnectionRefused);
        assert_eq!(classify(ureq::Error::Io(refused)), TransportError::Unreachable);
    }

    #[test]
    fn other_io_errors_are_reported() {
        let denied = std::io::Error::from(ErrorKind::PermissionDenied);
        assert!(matches!(classify(ureq::Error::Io(denied)), TransportError::Other(_)));
    }

    #[test]
    fn refused_port_maps_to_unreachable() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = spycats_core::SpyCatClient::new(&format!("http://127.0.0.1:{port}"));
        let result = UreqTransport::new().execute(client.build_list_cats());
        assert_eq!(result.unwrap_err(), TransportError::Unreachable);
    }
}
