//! HTTP transports that execute [`ApiRequest`] descriptors.
//!
//! SYSTEM CONTEXT
//! ==============
//! `native` wraps reqwest for desktop/server use, `browser` wraps gloo-net
//! `fetch` for the `hydrate` (WASM) build. Tests drive the client with an
//! in-memory transport instead.
//!
//! In the browser every future is `!Send`, so the trait is declared with
//! `?Send` under `hydrate` and as `Send + Sync` everywhere else.

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "hydrate")]
pub use browser::GlooTransport;
#[cfg(feature = "native")]
pub use native::ReqwestTransport;

use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::response::RawResponse;

/// `Send + Sync` natively, no bound in the browser.
#[cfg(not(feature = "hydrate"))]
pub trait MaybeSync: Send + Sync {}
#[cfg(not(feature = "hydrate"))]
impl<T: Send + Sync> MaybeSync for T {}

/// `Send + Sync` natively, no bound in the browser.
#[cfg(feature = "hydrate")]
pub trait MaybeSync {}
#[cfg(feature = "hydrate")]
impl<T> MaybeSync for T {}

/// Executes a single request and reports status and body text.
///
/// Implementations must not retry, cache, or reorder requests.
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
pub trait Transport: MaybeSync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response could be obtained.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}
