use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use docsmith_core::{DocError, DocResult, Identity, IdentityProvider};

use crate::bearer_token;
use crate::key_set::{HttpKeySetSource, KeySetCache};

const SERVICE: &str = "supabase";

/// Resolves bearer tokens through the Supabase auth API
/// (`GET {url}/auth/v1/user`).
///
/// The signing key set is held for local JWT verification. `resolve` does not
/// read it yet: every token is checked by the auth API, and the key set is
/// only fetched when a caller asks [`KeySetCache::get`] for it.
pub struct SupabaseIdentity {
    client: Client,
    base_url: String,
    anon_key: String,
    key_set: Arc<KeySetCache>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseIdentity {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let client = Client::new();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let anon_key = anon_key.into();
        let source = HttpKeySetSource::new(client.clone(), &base_url, anon_key.clone());
        Self {
            client,
            base_url,
            anon_key,
            key_set: Arc::new(KeySetCache::new(Arc::new(source))),
        }
    }

    /// Share an existing key-set cache instead of the one built by `new`.
    pub fn with_key_set(mut self, key_set: Arc<KeySetCache>) -> Self {
        self.key_set = key_set;
        self
    }

    /// Signing keys for verifying tokens locally. Not consulted by `resolve`.
    pub fn key_set(&self) -> &Arc<KeySetCache> {
        &self.key_set
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

fn parse_user(body: &str) -> DocResult<Identity> {
    let user: UserResponse = serde_json::from_str(body)
        .map_err(|e| DocError::upstream(SERVICE, format!("unexpected user payload: {e}")))?;
    Ok(Identity {
        user_id: user.id,
        email: user.email,
    })
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn resolve(&self, bearer: &str) -> DocResult<Identity> {
        let token = bearer_token(bearer);
        if token.is_empty() {
            return Err(DocError::Unauthorized("missing credentials".into()));
        }

        let response = self
            .client
            .get(self.user_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DocError::upstream(SERVICE, e))?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| DocError::upstream(SERVICE, e))?;
                let identity = parse_user(&body)?;
                debug!(user_id = %identity.user_id, "Resolved identity");
                Ok(identity)
            }
            status if status.is_server_error() => {
                Err(DocError::upstream(SERVICE, format!("auth API returned {status}")))
            }
            status => {
                warn!(status = %status, "Rejected bearer token");
                Err(DocError::Unauthorized("invalid or expired token".into()))
            }
        }
    }
}
