//! Test helpers: an in-process axum backend and clients pointed at it.

use crate::config::{ClientConfig, FallbackPolicy};
use crate::http::ApiClient;
use crate::token::{MemoryTokenStore, TokenStore};
use axum::Router;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test backend");
    });
    format!("http://{addr}/")
}

pub(crate) fn config_for(base: &str, fallback: FallbackPolicy) -> ClientConfig {
    ClientConfig::new(
        Url::parse(base).expect("test base url"),
        Duration::from_secs(5),
        None,
        fallback,
    )
}

pub(crate) fn client_for(base: &str, tokens: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::new(&config_for(base, FallbackPolicy::Disabled), tokens).expect("client")
}

/// A base URL nothing listens on: the port is bound once and released.
pub(crate) fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/")
}

pub(crate) fn unreachable_client() -> ApiClient {
    client_for(&unreachable_base(), Arc::new(MemoryTokenStore::new()))
}
