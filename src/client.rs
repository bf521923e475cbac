//! `RestApiClient`: the [`JetpackApi`] implementation over a [`Transport`].
//!
//! DESIGN
//! ======
//! All operations borrow the client immutably, so any number may be in
//! flight at once and complete in any order. Reconfiguring takes `&mut self`
//! and therefore cannot race an in-flight call. There is no retry, caching,
//! timeout, or queueing here; the transport owns whatever it imposes.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::{ApiResult, JetpackApi, JumpStartAction};
use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::{ApiRequest, now_millis};
use crate::response::{RawResponse, check_status, parse_encoded_data, parse_json};
use crate::transport::Transport;

pub struct RestApiClient<T> {
    transport: T,
    config: ClientConfig,
}

#[derive(Serialize)]
struct JumpStartBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
}

impl<T: Transport> RestApiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Replace both the API root and the nonce.
    pub fn configure(&mut self, api_root: impl Into<String>, nonce: impl Into<String>) {
        self.config = ClientConfig::new(api_root, nonce);
    }

    pub fn set_api_root(&mut self, api_root: impl Into<String>) {
        self.config.api_root = api_root.into();
    }

    pub fn set_api_nonce(&mut self, nonce: impl Into<String>) {
        self.config.nonce = nonce.into();
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn root(&self) -> &str {
        &self.config.api_root
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "jetpack api request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "jetpack api response");
        Ok(response)
    }

    async fn get_json(&self, url: String) -> ApiResult {
        let request = ApiRequest::get(&self.config, &url, now_millis());
        let response = check_status(self.dispatch(request).await?)?;
        parse_json(&response.body)
    }

    async fn get_encoded_json(&self, url: String) -> ApiResult {
        let envelope = self.get_json(url).await?;
        parse_encoded_data(&envelope)
    }

    async fn post_json<B>(&self, url: String, body: &B) -> ApiResult
    where
        B: Serialize + ?Sized + Sync,
    {
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        let request = ApiRequest::post(&self.config, &url, body);
        let response = check_status(self.dispatch(request).await?)?;
        parse_json(&response.body)
    }
}

#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
impl<T: Transport> JetpackApi for RestApiClient<T> {
    async fn fetch_site_connection_status(&self) -> ApiResult {
        self.get_json(endpoints::connection(self.root())).await
    }

    async fn fetch_user_connection_data(&self) -> ApiResult {
        self.get_json(endpoints::connection_data(self.root())).await
    }

    async fn disconnect_site(&self) -> ApiResult {
        self.post_json(endpoints::connection(self.root()), &json!({ "isActive": false }))
            .await
    }

    async fn fetch_connect_url(&self) -> ApiResult {
        self.get_json(endpoints::connection_url(self.root())).await
    }

    async fn unlink_user(&self) -> ApiResult {
        self.post_json(endpoints::connection_user(self.root()), &json!({ "linked": false }))
            .await
    }

    async fn jump_start(&self, action: &str) -> ApiResult {
        let body = JumpStartBody { active: JumpStartAction::from_token(action).map(JumpStartAction::is_active) };
        self.post_json(endpoints::jumpstart(self.root()), &body).await
    }

    async fn fetch_modules(&self) -> ApiResult {
        self.get_json(endpoints::module_all(self.root())).await
    }

    async fn fetch_module(&self, slug: &str) -> ApiResult {
        self.get_json(endpoints::module(self.root(), slug)).await
    }

    async fn activate_module(&self, slug: &str) -> ApiResult {
        self.post_json(endpoints::module_active(self.root(), slug), &json!({ "active": true }))
            .await
    }

    async fn deactivate_module(&self, slug: &str) -> ApiResult {
        self.post_json(endpoints::module_active(self.root(), slug), &json!({ "active": false }))
            .await
    }

    async fn update_module_options(&self, slug: &str, options: &Value) -> ApiResult {
        self.post_json(endpoints::module(self.root(), slug), options).await
    }

    async fn update_settings(&self, options: &Value) -> ApiResult {
        self.post_json(endpoints::settings(self.root()), options).await
    }

    async fn get_protect_count(&self) -> ApiResult {
        self.get_json(endpoints::protect_data(self.root())).await
    }

    async fn reset_options(&self, options_key: &str) -> ApiResult {
        self.post_json(endpoints::options(self.root(), options_key), &json!({ "reset": true }))
            .await
    }

    async fn get_vault_press_data(&self) -> ApiResult {
        self.get_json(endpoints::vaultpress_data(self.root())).await
    }

    async fn get_akismet_data(&self) -> ApiResult {
        self.get_json(endpoints::akismet_data(self.root())).await
    }

    async fn check_akismet_key(&self) -> ApiResult {
        self.get_json(endpoints::akismet_key_check(self.root())).await
    }

    async fn check_akismet_key_typed(&self, api_key: &str) -> ApiResult {
        self.post_json(endpoints::akismet_key_check(self.root()), &json!({ "api_key": api_key }))
            .await
    }

    async fn fetch_stats_data(&self, range: &str) -> ApiResult {
        self.get_json(endpoints::stats_data(self.root(), range)).await
    }

    async fn get_plugin_updates(&self) -> ApiResult {
        self.get_json(endpoints::plugin_updates(self.root())).await
    }

    async fn fetch_settings(&self) -> ApiResult {
        self.get_json(endpoints::settings(self.root())).await
    }

    async fn update_setting(&self, setting: &Value) -> ApiResult {
        self.post_json(endpoints::settings(self.root()), setting).await
    }

    async fn fetch_site_data(&self) -> ApiResult {
        self.get_encoded_json(endpoints::site(self.root())).await
    }

    async fn fetch_site_features(&self) -> ApiResult {
        self.get_encoded_json(endpoints::site_features(self.root())).await
    }

    async fn dismiss_jetpack_notice(&self, notice: &str) -> ApiResult {
        self.post_json(endpoints::notice(self.root(), notice), &json!({ "dismissed": true }))
            .await
    }

    async fn fetch_plugins_data(&self) -> ApiResult {
        self.get_json(endpoints::plugins(self.root())).await
    }
}
