//! Client for the Jetpack `jetpack/v4` WordPress REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin UI talks to its host WordPress site through a fixed catalogue of
//! endpoints (connection, modules, settings, stats, site data, notices).
//! [`RestApiClient`] turns each into one typed async method of
//! [`JetpackApi`] and classifies every failure as an [`ApiError`].
//!
//! `api` declares the operations, `client` implements them, `request` and
//! `response` build and classify HTTP exchanges, `endpoints` owns the URL
//! layout, and `transport` executes requests (reqwest natively, gloo-net
//! `fetch` under the `hydrate` feature).

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use api::{ApiResult, JetpackApi, JumpStartAction};
pub use client::RestApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, TransportError};
pub use transport::Transport;
