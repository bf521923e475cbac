//! Endpoint URL builders for the `jetpack/v4` REST namespace.
//!
//! Every builder takes the configured API root verbatim as a prefix.
//! Identifiers (module slugs, option keys, notice ids) are embedded as given.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

const NAMESPACE: &str = "jetpack/v4";

fn endpoint(root: &str, path: &str) -> String {
    format!("{root}{NAMESPACE}/{path}")
}

pub fn connection(root: &str) -> String {
    endpoint(root, "connection")
}

pub fn connection_data(root: &str) -> String {
    endpoint(root, "connection/data")
}

pub fn connection_url(root: &str) -> String {
    endpoint(root, "connection/url")
}

pub fn connection_user(root: &str) -> String {
    endpoint(root, "connection/user")
}

pub fn jumpstart(root: &str) -> String {
    endpoint(root, "jumpstart")
}

pub fn module_all(root: &str) -> String {
    endpoint(root, "module/all")
}

pub fn module(root: &str, slug: &str) -> String {
    endpoint(root, &format!("module/{slug}"))
}

pub fn module_active(root: &str, slug: &str) -> String {
    endpoint(root, &format!("module/{slug}/active"))
}

pub fn protect_data(root: &str) -> String {
    endpoint(root, "module/protect/data")
}

pub fn options(root: &str, options_key: &str) -> String {
    endpoint(root, &format!("options/{options_key}"))
}

pub fn vaultpress_data(root: &str) -> String {
    endpoint(root, "module/vaultpress/data")
}

pub fn akismet_data(root: &str) -> String {
    endpoint(root, "module/akismet/data")
}

pub fn akismet_key_check(root: &str) -> String {
    endpoint(root, "module/akismet/key/check")
}

/// Stats data URL with `range` appended as a URL-encoded query parameter.
///
/// Unlike `encodeURIComponent`, this also escapes `!'()*`.
pub fn stats_data(root: &str, range: &str) -> String {
    let url = endpoint(root, "module/stats/data");
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}range={}", urlencoding::encode(range))
}

pub fn plugin_updates(root: &str) -> String {
    endpoint(root, "updates/plugins")
}

pub fn settings(root: &str) -> String {
    endpoint(root, "settings")
}

pub fn site(root: &str) -> String {
    endpoint(root, "site")
}

pub fn site_features(root: &str) -> String {
    endpoint(root, "site/features")
}

pub fn notice(root: &str, notice: &str) -> String {
    endpoint(root, &format!("notice/{notice}"))
}

pub fn plugins(root: &str) -> String {
    endpoint(root, "plugins")
}
