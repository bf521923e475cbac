//! Request descriptors and the GET cache buster.
//!
//! DESIGN
//! ======
//! A descriptor is rebuilt from the current [`ClientConfig`] on every call,
//! so a `configure` between two calls is fully visible to the second one.
//! Transports only translate descriptors; they never add headers of their own.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use crate::config::ClientConfig;

pub const NONCE_HEADER: &str = "X-WP-Nonce";
pub const CONTENT_TYPE_HEADER: &str = "Content-type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const CACHE_BUSTER_PARAM: &str = "_cacheBuster";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Cookie policy for a request. Only same-origin is ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    SameOrigin,
}

/// A fully resolved HTTP request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub credentials: Credentials,
    pub body: Option<String>,
}

impl ApiRequest {
    /// GET `url` with the nonce header and a fresh cache buster.
    pub(crate) fn get(config: &ClientConfig, url: &str, now_millis: u64) -> Self {
        Self {
            method: Method::Get,
            url: add_cache_buster(url, now_millis),
            headers: base_headers(config),
            credentials: Credentials::SameOrigin,
            body: None,
        }
    }

    /// POST an already-serialized JSON `body` to `url`.
    pub(crate) fn post(config: &ClientConfig, url: &str, body: String) -> Self {
        let mut headers = base_headers(config);
        headers.push((CONTENT_TYPE_HEADER.to_owned(), JSON_CONTENT_TYPE.to_owned()));
        Self {
            method: Method::Post,
            url: url.to_owned(),
            headers,
            credentials: Credentials::SameOrigin,
            body: Some(body),
        }
    }

    /// First header value matching `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn base_headers(config: &ClientConfig) -> Vec<(String, String)> {
    vec![(NONCE_HEADER.to_owned(), config.nonce.clone())]
}

/// Append `_cacheBuster=<now_millis>` to `url`, keeping any existing query.
///
/// Only the text between the first and second `?` is treated as the query.
#[must_use]
pub fn add_cache_buster(url: &str, now_millis: u64) -> String {
    let (path, query) = match url.split_once('?') {
        Some((path, rest)) => (path, rest.split('?').next().unwrap_or_default()),
        None => (url, ""),
    };
    let buster = format!("{CACHE_BUSTER_PARAM}={now_millis}");
    if query.is_empty() {
        format!("{path}?{buster}")
    } else {
        format!("{path}?{query}&{buster}")
    }
}

/// Milliseconds since the Unix epoch, from the platform clock.
#[must_use]
pub fn now_millis() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = js_sys::Date::now() as u64;
        millis
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};

        let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
            return 0;
        };
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }
}
