//! `vercel_project_env`: an environment variable of a project.
//!
//! Import with `<project-name>:<env-id>`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::Resource;
use crate::client::{DeploymentApi, NewProjectEnv, ProjectEnv};
use crate::error::ProviderError;
use crate::reconcile::{apply_import_id, find_record};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};

/// Resource type name.
pub const TYPE_NAME: &str = "vercel_project_env";

/// Manages one environment variable of a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectEnvResource;

#[derive(Debug, Deserialize)]
struct ProjectEnvConfig {
    name: String,
    #[serde(rename = "type")]
    env_type: String,
    key: String,
    value: String,
    #[serde(default)]
    target: Vec<String>,
}

#[async_trait]
impl Resource for ProjectEnvResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("An environment variable of a Vercel project")
            .with_attribute("id", Attribute::computed_string())
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Name of the owning project"),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description("plain, secret, encrypted or system"),
            )
            .with_attribute("key", Attribute::required_string())
            .with_attribute("value", Attribute::required_string().sensitive())
            .with_attribute(
                "target",
                Attribute::optional_string_list()
                    .with_description("Deployment targets: production, preview, development"),
            )
    }

    #[instrument(skip_all, name = "vercel_project_env.create")]
    async fn create(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectEnvConfig = data.decode()?;

        let env = NewProjectEnv {
            env_type: config.env_type,
            key: config.key,
            value: config.value,
            target: config.target,
        };

        let created = api.create_project_env(&config.name, &env).await?;
        info!(project = %config.name, id = %created.id, key = %created.key, "Project env created");

        data.set_id(created.id);
        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project_env.read")]
    async fn read(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let project = data.get_string("name")?;
        let id = data.id().to_string();

        let envs = match api.get_project_envs(&project, true).await {
            Ok(envs) => envs,
            Err(err) if err.is_not_found() => {
                warn!(project = %project, id = %id, "Project no longer exists, removing env from state");
                data.set_id("");
                return Ok(());
            },
            Err(err) => return Err(err.into()),
        };

        match find_record(&id, &envs) {
            Ok(env) => hydrate(env, data),
            Err(err) if err.is_not_found() => {
                warn!(project = %project, id = %id, "Project env no longer exists, removing from state");
                data.set_id("");
                Ok(())
            },
            Err(err) => Err(err),
        }
    }

    #[instrument(skip_all, name = "vercel_project_env.update")]
    async fn update(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectEnvConfig = data.decode()?;

        let env = ProjectEnv {
            id: data.id().to_string(),
            env_type: config.env_type,
            key: config.key,
            value: config.value,
            target: config.target,
        };

        api.edit_project_env(&config.name, &env).await?;
        info!(project = %config.name, id = %env.id, "Project env updated");

        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project_env.delete")]
    async fn delete(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let project = data.get_string("name")?;
        let id = data.id().to_string();

        api.delete_project_env(&project, &id).await?;
        info!(project = %project, id = %id, "Project env deleted");

        data.set_id("");
        Ok(())
    }

    #[instrument(skip_all, name = "vercel_project_env.import")]
    async fn import(
        &self,
        _api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        apply_import_id(data, "name", None)
    }
}

fn hydrate(env: &ProjectEnv, data: &mut ResourceData) -> Result<(), ProviderError> {
    data.set("type", &env.env_type)?;
    data.set("key", &env.key)?;
    data.set("value", &env.value)?;
    data.set("target", &env.target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Project;
    use crate::testing::InMemoryApi;
    use serde_json::json;

    async fn api_with_project(name: &str) -> InMemoryApi {
        let api = InMemoryApi::new();
        api.insert_project(Project {
            id: format!("prj_{}", name),
            name: name.to_string(),
            ..Default::default()
        })
        .await;
        api
    }

    fn data(state: serde_json::Value) -> ResourceData {
        ResourceData::from_state(ProjectEnvResource.schema(), &state).unwrap()
    }

    fn config() -> serde_json::Value {
        json!({
            "name": "web",
            "type": "encrypted",
            "key": "DATABASE_URL",
            "value": "postgres://db",
            "target": ["production", "preview"]
        })
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let api = api_with_project("web").await;
        let mut state = data(config());

        ProjectEnvResource.create(&api, &mut state).await.unwrap();

        assert!(state.id().starts_with("env_"));
        assert_eq!(state.get("value"), Some(&json!("postgres://db")));
        assert_eq!(state.get("target"), Some(&json!(["production", "preview"])));
        assert_eq!(api.envs("web").await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_picks_env_by_id() {
        let api = api_with_project("web").await;
        for (id, value) in [("env_a", "1"), ("env_b", "2")] {
            api.insert_env(
                "web",
                ProjectEnv {
                    id: id.to_string(),
                    env_type: "plain".to_string(),
                    key: "COUNT".to_string(),
                    value: value.to_string(),
                    target: vec![],
                },
            )
            .await;
        }

        let mut state = data(json!({"id": "env_b", "name": "web"}));
        ProjectEnvResource.read(&api, &mut state).await.unwrap();

        assert_eq!(state.get("value"), Some(&json!("2")));
        assert_eq!(state.get("type"), Some(&json!("plain")));
        assert_eq!(state.get("target"), Some(&json!([])));
    }

    #[tokio::test]
    async fn test_read_after_remote_delete_clears_id() {
        let api = api_with_project("web").await;
        let mut state = data(config());
        ProjectEnvResource.create(&api, &mut state).await.unwrap();

        api.remove_env("web", state.id()).await;
        ProjectEnvResource.read(&api, &mut state).await.unwrap();

        assert!(state.is_gone());
    }

    #[tokio::test]
    async fn test_update_edits_remote_env() {
        let api = api_with_project("web").await;
        let mut state = data(config());
        ProjectEnvResource.create(&api, &mut state).await.unwrap();
        let id = state.id().to_string();

        state.set("value", "postgres://replica").unwrap();
        state.set("target", vec!["development"]).unwrap();
        ProjectEnvResource.update(&api, &mut state).await.unwrap();

        let envs = api.envs("web").await;
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].id, id);
        assert_eq!(envs[0].value, "postgres://replica");
        assert_eq!(state.get("target"), Some(&json!(["development"])));
    }

    #[tokio::test]
    async fn test_delete_clears_id() {
        let api = api_with_project("web").await;
        api.insert_env(
            "web",
            ProjectEnv {
                id: "env-1".to_string(),
                env_type: "plain".to_string(),
                key: "A".to_string(),
                value: "1".to_string(),
                target: vec![],
            },
        )
        .await;
        let mut state = data(json!({"id": "env-1", "name": "web"}));

        ProjectEnvResource.delete(&api, &mut state).await.unwrap();

        assert_eq!(state.id(), "");
        assert!(api.envs("web").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_id() {
        let api = api_with_project("web").await;
        api.fail_next("delete_project_env", 403, "forbidden").await;
        let mut state = data(json!({"id": "env-1", "name": "web"}));

        let err = ProjectEnvResource.delete(&api, &mut state).await.unwrap_err();

        assert!(matches!(err, ProviderError::Api(_)));
        assert_eq!(state.id(), "env-1");
    }

    #[tokio::test]
    async fn test_import() {
        let api = api_with_project("web").await;
        let mut state = data(serde_json::Value::Null);
        state.set_id("web:env_42");

        ProjectEnvResource.import(&api, &mut state).await.unwrap();

        assert_eq!(state.id(), "env_42");
        assert_eq!(state.get("name"), Some(&json!("web")));
    }

    #[tokio::test]
    async fn test_import_invalid_id() {
        let api = api_with_project("web").await;
        let mut state = data(serde_json::Value::Null);
        state.set_id("web:env:42");

        let err = ProjectEnvResource.import(&api, &mut state).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidImportId(_)));
    }
}
