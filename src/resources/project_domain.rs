//! `vercel_project_domain`: a domain assigned to a project.
//!
//! The tracked identity is the domain name itself. Import with
//! `<project-name>:<domain>`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::Resource;
use crate::client::{DeploymentApi, Domain};
use crate::error::ProviderError;
use crate::reconcile::{apply_import_id, find_record};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};

/// Resource type name.
pub const TYPE_NAME: &str = "vercel_project_domain";

/// Manages one domain of a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectDomainResource;

#[derive(Debug, Deserialize)]
struct ProjectDomainConfig {
    name: String,
    domain: String,
    #[serde(default)]
    redirect: String,
}

#[async_trait]
impl Resource for ProjectDomainResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("A domain assigned to a Vercel project")
            .with_attribute("id", Attribute::computed_string())
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Name of the owning project"),
            )
            .with_attribute("domain", Attribute::required_string().with_force_new())
            .with_attribute(
                "redirect",
                Attribute::optional_string().with_description("Domain to redirect to"),
            )
    }

    #[instrument(skip_all, name = "vercel_project_domain.create")]
    async fn create(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectDomainConfig = data.decode()?;

        let domain = api
            .add_domain(&config.name, &config.domain, &config.redirect)
            .await?;
        info!(project = %config.name, domain = %domain.domain, "Project domain added");

        data.set_id(domain.domain);
        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project_domain.read")]
    async fn read(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let project_name = data.get_string("name")?;
        let domain = data.get_string("domain")?;

        let project = match api.get_project(&project_name).await {
            Ok(project) => project,
            Err(err) if err.is_not_found() => {
                warn!(project = %project_name, domain = %domain, "Project no longer exists, removing domain from state");
                data.set_id("");
                return Ok(());
            },
            Err(err) => return Err(err.into()),
        };

        match find_record(&domain, &project.alias) {
            Ok(found) => hydrate(found, data),
            Err(err) if err.is_not_found() => {
                warn!(project = %project_name, domain = %domain, "Project domain no longer exists, removing from state");
                data.set_id("");
                Ok(())
            },
            Err(err) => Err(err),
        }
    }

    #[instrument(skip_all, name = "vercel_project_domain.update")]
    async fn update(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let config: ProjectDomainConfig = data.decode()?;

        api.update_domain(&config.name, &config.domain, &config.redirect)
            .await?;
        info!(project = %config.name, domain = %config.domain, "Project domain updated");

        self.read(api, data).await
    }

    #[instrument(skip_all, name = "vercel_project_domain.delete")]
    async fn delete(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let project = data.get_string("name")?;
        let domain = data.get_string("domain")?;

        api.delete_domain(&project, &domain).await?;
        info!(project = %project, domain = %domain, "Project domain removed");

        data.set_id("");
        Ok(())
    }

    #[instrument(skip_all, name = "vercel_project_domain.import")]
    async fn import(
        &self,
        _api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        apply_import_id(data, "name", Some("domain"))
    }
}

fn hydrate(domain: &Domain, data: &mut ResourceData) -> Result<(), ProviderError> {
    data.set_id(&domain.domain);
    data.set("domain", &domain.domain)?;
    data.set("redirect", domain.redirect.as_deref().unwrap_or_default())?;
    Ok(())
}
