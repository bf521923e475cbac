//! Browser transport over `fetch` via gloo-net.
//!
//! Requests go out with `credentials: same-origin`, so the WordPress auth
//! cookies ride along only when the API root shares the page's origin.

use gloo_net::http::{Request, RequestCredentials};

use super::Transport;
use crate::error::TransportError;
use crate::request::{ApiRequest, Credentials, Method};
use crate::response::RawResponse;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn fetch_credentials(credentials: Credentials) -> RequestCredentials {
    match credentials {
        Credentials::SameOrigin => RequestCredentials::SameOrigin,
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        }
        .credentials(fetch_credentials(request.credentials));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => {
                let req = builder
                    .body(body)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                req.send().await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
