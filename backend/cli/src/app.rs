//! Wiring shared by every command: stores, identity and the text generator
//! are built from [`Config`] on first use.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use docsmith_core::{DocError, Identity, IdentityProvider, Project, ProjectStore};
use docsmith_identity::{bearer_token, StaticIdentity, SupabaseIdentity};
use docsmith_planner::{OpenAiProvider, TextGenerator};
use docsmith_store::SqliteStore;

use crate::config::Config;

pub struct App {
    pub config: Config,
    token: Option<String>,
}

impl App {
    pub fn new(config: Config, token: Option<String>) -> Self {
        Self { config, token }
    }

    pub fn store(&self) -> Result<Arc<SqliteStore>> {
        let store = SqliteStore::open(&self.config.db_path)
            .with_context(|| format!("failed to open database '{}'", self.config.db_path))?;
        debug!(db = %self.config.db_path, "Opened store");
        Ok(Arc::new(store))
    }

    pub fn generator(&self) -> Result<TextGenerator> {
        let api_key = self
            .config
            .openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY is not set")?;

        let provider = OpenAiProvider::new(api_key).with_base_url(&self.config.openai_base_url);
        Ok(TextGenerator::new(Arc::new(provider)).with_model(&self.config.model))
    }

    fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        match self.config.supabase() {
            Some((url, anon_key)) => Arc::new(SupabaseIdentity::new(url, anon_key)),
            None => Arc::new(StaticIdentity::new(&self.config.local_user)),
        }
    }

    /// Resolve the caller. Without Supabase configured every caller is the
    /// local user; with it a bearer token is required.
    pub async fn user(&self) -> Result<Identity> {
        let token = self.token.as_deref().map(bearer_token).unwrap_or_default();
        if token.is_empty() && self.config.supabase().is_some() {
            bail!("a bearer token is required (--token)");
        }
        let identity = self.identity_provider().resolve(token).await?;
        info!(user_id = %identity.user_id, "Resolved caller");
        Ok(identity)
    }

    /// Load a project and check that `user` owns it.
    pub async fn owned_project(
        &self,
        store: &dyn ProjectStore,
        user: &Identity,
        project_id: Uuid,
    ) -> Result<Project> {
        let project = store.get_project(project_id).await?;
        if !project.is_owned_by(&user.user_id) {
            return Err(DocError::Forbidden(format!(
                "project '{project_id}' belongs to another user"
            ))
            .into());
        }
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use docsmith_core::DocKind;
    use docsmith_store::InMemoryStore;

    use super::*;

    fn app(config: Config, token: Option<&str>) -> App {
        App::new(config, token.map(str::to_string))
    }

    #[tokio::test]
    async fn test_local_user_without_supabase() {
        let config = Config {
            local_user: "dana".into(),
            ..Config::default()
        };
        let user = app(config, None).user().await.unwrap();
        assert_eq!(user.user_id, "dana");
    }

    #[tokio::test]
    async fn test_supabase_requires_token() {
        let config = Config {
            supabase_url: Some("http://127.0.0.1:9".into()),
            supabase_anon_key: Some("anon".into()),
            ..Config::default()
        };
        let err = app(config, Some("Bearer ")).user().await.unwrap_err();
        assert!(err.to_string().contains("bearer token is required"));
    }

    #[test]
    fn test_generator_requires_api_key() {
        let err = app(Config::default(), None).generator().err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let config = Config {
            openai_api_key: Some("sk-test".into()),
            model: "gpt-4o-mini".into(),
            ..Config::default()
        };
        assert_eq!(app(config, None).generator().unwrap().model(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_owned_project() {
        let store = InMemoryStore::new();
        let project = store.create_project("dana", "Plan", DocKind::Word).await.unwrap();
        let app = app(Config::default(), None);

        let dana = Identity {
            user_id: "dana".into(),
            email: None,
        };
        let owned = app.owned_project(&store, &dana, project.id).await.unwrap();
        assert_eq!(owned.id, project.id);

        let eve = Identity {
            user_id: "eve".into(),
            email: None,
        };
        let err = app.owned_project(&store, &eve, project.id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DocError>(), Some(DocError::Forbidden(_))));
    }
}
