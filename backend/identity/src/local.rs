use async_trait::async_trait;

use docsmith_core::{DocResult, Identity, IdentityProvider};

/// Resolves every credential to one fixed user. For single-user local runs.
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self, _bearer: &str) -> DocResult<Identity> {
        Ok(Identity {
            user_id: self.user_id.clone(),
            email: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_identity() {
        let identity = StaticIdentity::new("local").resolve("anything").await.unwrap();
        assert_eq!(identity.user_id, "local");
        assert!(identity.email.is_none());
    }
}
