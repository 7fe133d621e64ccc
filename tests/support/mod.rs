#![allow(dead_code)]

use std::sync::Arc;

use amazon_ads_oxide::{AdsContext, Credentials, Endpoints, SessionSettings};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN_PATH: &str = "/auth/o2/token";

pub fn credentials() -> Credentials {
    Credentials::new("A", "B", "R0", "P")
}

pub fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints::new(server.uri(), format!("{}{TOKEN_PATH}", server.uri()))
}

/// Token endpoint handing out `access_token`/`refresh_token` on every call.
pub async fn mount_token(server: &MockServer, access_token: &str, refresh_token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "token_type": "bearer",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

/// Context holding `access_token` without talking to the token endpoint.
pub fn resume(server: &MockServer, access_token: &str, settings: SessionSettings) -> Arc<AdsContext> {
    Arc::new(AdsContext::resume(
        credentials().with_access_token(access_token),
        endpoints(server),
        settings,
    ))
}

/// Runs blocking client code off the async runtime driving the mock server.
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
