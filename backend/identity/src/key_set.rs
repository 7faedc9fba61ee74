//! Lazily fetched, process-lifetime cache of the auth server's signing keys.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use docsmith_core::{DocError, DocResult};

/// Where signing keys come from.
#[async_trait]
pub trait KeySetSource: Send + Sync {
    async fn fetch(&self) -> DocResult<Value>;
}

/// Fetches `{base_url}/.well-known/jwks.json`.
pub struct HttpKeySetSource {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpKeySetSource {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: format!("{}/.well-known/jwks.json", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    async fn fetch(&self) -> DocResult<Value> {
        let response = self
            .client
            .get(&self.url)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| DocError::upstream("jwks", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocError::upstream("jwks", format!("returned {status}")));
        }
        response.json().await.map_err(|e| DocError::upstream("jwks", e))
    }
}

/// Fetch-once cache. Concurrent first callers share one fetch; a failed fetch
/// is not stored, so the next call tries again.
pub struct KeySetCache {
    source: Arc<dyn KeySetSource>,
    keys: OnceCell<Value>,
}

impl KeySetCache {
    pub fn new(source: Arc<dyn KeySetSource>) -> Self {
        Self {
            source,
            keys: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> DocResult<&Value> {
        self.keys
            .get_or_try_init(|| async {
                debug!("Fetching signing key set");
                let keys = self.source.fetch().await;
                if let Err(e) = &keys {
                    warn!(error = %e, "Signing key set fetch failed");
                }
                keys
            })
            .await
    }

    pub fn is_loaded(&self) -> bool {
        self.keys.initialized()
    }
}
