//! `vercel_project`: a project, addressed by name.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{non_empty, Resource};
use crate::client::{CreateProjectOptions, DeploymentApi, GitRepository, Project, ProjectPatch};
use crate::error::ProviderError;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};

/// Resource type name.
pub const TYPE_NAME: &str = "vercel_project";

/// Manages a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectResource;

#[derive(Debug, Deserialize)]
struct ProjectConfig {
    name: String,
    framework: String,
    #[serde(default)]
    root_directory: String,
    #[serde(default)]
    git_type: String,
    #[serde(default)]
    git_repo: String,
    #[serde(default)]
    build_command: String,
    #[serde(default)]
    output_directory: String,
    #[serde(default)]
    command_for_ignoring_build_step: String,
}

#[async_trait]
impl Resource for ProjectResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("A Vercel project")
            .with_attribute("id", Attribute::computed_string())
            .with_attribute(
                "name",
                Attribute::required_string()
                    .with_force_new()
                    .with_description("Project name"),
            )
            .with_attribute(
                "framework",
                Attribute::required_string().with_description("Framework preset, e.g. nextjs"),
            )
            .with_attribute("root_directory", Attribute::optional_string())
            .with_attribute(
                "git_type",
                Attribute::optional_string()
                    .with_force_new()
                    .with_description("Git provider, e.g. github"),
            )
            .with_attribute(
                "git_repo",
                Attribute::optional_string()
                    .with_force_new()
                    .with_description("Repository as <org>/<repo>"),
            )
            .with_attribute("build_command", Attribute::optional_string())
            .with_attribute("output_directory", Attribute::optional_string())
            .with_attribute("command_for_ignoring_build_step", Attribute::optional_string())
    }

    #[instrument(skip_all, name = "vercel_project.create")]
    async fn create(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectConfig = data.decode()?;

        let git_repository = match (non_empty(config.git_type), non_empty(config.git_repo)) {
            (Some(repo_type), Some(repo)) => Some(GitRepository { repo_type, repo }),
            _ => None,
        };
        let options = CreateProjectOptions {
            name: config.name,
            framework: config.framework,
            git_repository,
            root_directory: non_empty(config.root_directory),
            build_command: non_empty(config.build_command),
            output_directory: non_empty(config.output_directory),
            command_for_ignoring_build_step: non_empty(config.command_for_ignoring_build_step),
        };

        let project = api.create_project(&options).await?;
        info!(id = %project.id, name = %project.name, "Project created");

        data.set_id(project.id);
        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project.read")]
    async fn read(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let name = data.get_string("name")?;

        let project = match api.get_project(&name).await {
            Ok(project) => project,
            Err(err) if err.is_not_found() => {
                warn!(name = %name, "Project no longer exists, removing from state");
                data.set_id("");
                return Ok(());
            },
            Err(err) => return Err(err.into()),
        };

        hydrate(&project, data)
    }

    #[instrument(skip_all, name = "vercel_project.update")]
    async fn update(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectConfig = data.decode()?;

        let patch = ProjectPatch {
            framework: non_empty(config.framework),
            root_directory: non_empty(config.root_directory),
            build_command: non_empty(config.build_command),
            output_directory: non_empty(config.output_directory),
            command_for_ignoring_build_step: non_empty(config.command_for_ignoring_build_step),
        };

        api.update_project(&config.name, &patch).await?;
        info!(name = %config.name, "Project updated");

        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project.delete")]
    async fn delete(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let name = data.get_string("name")?;

        api.delete_project(&name).await?;
        info!(name = %name, "Project deleted");

        data.set_id("");
        Ok(())
    }
}

fn hydrate(project: &Project, data: &mut ResourceData) -> Result<(), ProviderError> {
    data.set("id", &project.id)?;
    data.set("name", &project.name)?;
    data.set("framework", project.framework.as_deref().unwrap_or_default())?;

    if let Some(root) = project.root_directory.as_deref().filter(|d| !d.is_empty()) {
        data.set("root_directory", root)?;
    }

    if let Some(link) = project
        .link
        .as_ref()
        .filter(|link| !link.org.is_empty() && !link.repo.is_empty())
    {
        data.set("git_type", &link.link_type)?;
        data.set("git_repo", format!("{}/{}", link.org, link.repo))?;
    }

    data.set(
        "build_command",
        project.build_command.as_deref().unwrap_or_default(),
    )?;
    data.set(
        "output_directory",
        project.output_directory.as_deref().unwrap_or_default(),
    )?;
    data.set(
        "command_for_ignoring_build_step",
        project
            .command_for_ignoring_build_step
            .as_deref()
            .unwrap_or_default(),
    )?;

    Ok(())
}
