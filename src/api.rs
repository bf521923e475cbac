//! The Jetpack REST operation catalogue.
//!
//! DESIGN
//! ======
//! One method per operation, instead of a generic request dispatcher, so each
//! call site names exactly which endpoint it talks to. Response shapes are
//! owned by the host application and are passed through as
//! [`serde_json::Value`] untouched.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::error::ApiError;

pub type ApiResult = Result<Value, ApiError>;

/// Jump start toggle. Parsed from the `"activate"` / `"deactivate"` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpStartAction {
    Activate,
    Deactivate,
}

impl JumpStartAction {
    /// Map a UI token to an action. Unrecognized tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "activate" => Some(Self::Activate),
            "deactivate" => Some(Self::Deactivate),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Activate)
    }
}

/// Every operation resolves to the parsed JSON body on a 2xx response.
///
/// # Errors
///
/// Each method fails with [`ApiError::Network`] when the transport fails,
/// [`ApiError::Api`] on a non-2xx status, and [`ApiError::ResponseParse`]
/// when a body is not JSON.
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
#[allow(clippy::missing_errors_doc)]
pub trait JetpackApi {
    /// `GET connection`
    async fn fetch_site_connection_status(&self) -> ApiResult;

    /// `GET connection/data`
    async fn fetch_user_connection_data(&self) -> ApiResult;

    /// `POST connection` with `{"isActive":false}`.
    async fn disconnect_site(&self) -> ApiResult;

    /// `GET connection/url`
    async fn fetch_connect_url(&self) -> ApiResult;

    /// `POST connection/user` with `{"linked":false}`.
    async fn unlink_user(&self) -> ApiResult;

    /// `POST jumpstart` with `{"active":bool}`.
    ///
    /// Tokens other than `"activate"` / `"deactivate"` send `{}` and leave
    /// the outcome to the server.
    async fn jump_start(&self, action: &str) -> ApiResult;

    /// `GET module/all`
    async fn fetch_modules(&self) -> ApiResult;

    /// `GET module/{slug}`
    async fn fetch_module(&self, slug: &str) -> ApiResult;

    /// `POST module/{slug}/active` with `{"active":true}`.
    async fn activate_module(&self, slug: &str) -> ApiResult;

    /// `POST module/{slug}/active` with `{"active":false}`.
    async fn deactivate_module(&self, slug: &str) -> ApiResult;

    /// `POST module/{slug}` with the option values as the body.
    async fn update_module_options(&self, slug: &str, options: &Value) -> ApiResult;

    /// `POST settings` with the option values as the body.
    async fn update_settings(&self, options: &Value) -> ApiResult;

    /// `GET module/protect/data`
    async fn get_protect_count(&self) -> ApiResult;

    /// `POST options/{options_key}` with `{"reset":true}`.
    async fn reset_options(&self, options_key: &str) -> ApiResult;

    /// `GET module/vaultpress/data`
    async fn get_vault_press_data(&self) -> ApiResult;

    /// `GET module/akismet/data`
    async fn get_akismet_data(&self) -> ApiResult;

    /// `GET module/akismet/key/check` against the stored key.
    async fn check_akismet_key(&self) -> ApiResult;

    /// `POST module/akismet/key/check` with `{"api_key":...}`.
    async fn check_akismet_key_typed(&self, api_key: &str) -> ApiResult;

    /// `GET module/stats/data?range={range}`
    async fn fetch_stats_data(&self, range: &str) -> ApiResult;

    /// `GET updates/plugins`
    async fn get_plugin_updates(&self) -> ApiResult;

    /// `GET settings`
    async fn fetch_settings(&self) -> ApiResult;

    /// `POST settings` with a single changed setting as the body.
    async fn update_setting(&self, setting: &Value) -> ApiResult;

    /// `GET site`, resolving to the decoded `data` field.
    ///
    /// An undecodable `data` field fails with [`ApiError::EncodedData`].
    async fn fetch_site_data(&self) -> ApiResult;

    /// `GET site/features`, resolving to the decoded `data` field.
    async fn fetch_site_features(&self) -> ApiResult;

    /// `POST notice/{notice}` with `{"dismissed":true}`.
    async fn dismiss_jetpack_notice(&self, notice: &str) -> ApiResult;

    /// `GET plugins`
    async fn fetch_plugins_data(&self) -> ApiResult;
}
