//! Request lifecycle hooks for [`ResourceClient`](super::ResourceClient).
//!
//! Observers are called synchronously around every call and only ever look:
//! they receive borrowed data and return nothing, so they cannot change what
//! the client returns.

use super::ClientError;
use reqwest::Method;
use tracing::{error, info};

pub trait RequestObserver: Send + Sync {
    /// Called before the request is dispatched.
    fn on_request(&self, method: &Method, url: &str);

    /// Called once when the call fails, whatever the cause.
    fn on_failure(&self, method: &Method, url: &str, error: &ClientError);
}

/// Emits one structured event per request and one per failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &str) {
        info!(http.method = %method, url = %url, "[API] {method} {url}");
    }

    fn on_failure(&self, method: &Method, url: &str, error: &ClientError) {
        error!(
            http.method = %method,
            url = %url,
            http.status = error.status(),
            "[API ERROR] {error}"
        );
    }
}
