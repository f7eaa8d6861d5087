//! The Vercel provider.
//!
//! [`VercelProvider`] implements [`ProviderService`] by routing each call to the
//! [`Resource`] controller of the requested type. The API client is installed by
//! `configure` (or up front with [`VercelProvider::with_api`]) and shared by all
//! callbacks.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::client::DeploymentApi;
use crate::config::{ProviderConfig, TOKEN_ENV};
use crate::error::ProviderError;
use crate::plan::plan_changes;
use crate::resource_data::{ResourceData, ID_FIELD};
use crate::resources::{self, Resource};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};
use crate::validation::validate;

/// Provider for Vercel projects, project environment variables and project domains.
pub struct VercelProvider {
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
    api: RwLock<Option<Arc<dyn DeploymentApi>>>,
    env_fallback: bool,
}

impl VercelProvider {
    /// An unconfigured provider.
    pub fn new() -> Self {
        Self {
            resources: resources::all()
                .into_iter()
                .map(|resource| (resource.type_name(), resource))
                .collect(),
            api: RwLock::new(None),
            env_fallback: true,
        }
    }

    /// A provider that talks to `api` without needing `configure`.
    pub fn with_api(api: Arc<dyn DeploymentApi>) -> Self {
        Self {
            api: RwLock::new(Some(api)),
            ..Self::new()
        }
    }

    /// Do not read `VERCEL_*` environment variables during `configure`.
    pub fn without_env_fallback(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    fn resource(&self, resource_type: &str) -> Result<&dyn Resource, ProviderError> {
        self.resources
            .get(resource_type)
            .map(|resource| &**resource)
            .ok_or_else(|| ProviderError::UnknownResource(resource_type.to_string()))
    }

    async fn api(&self) -> Result<Arc<dyn DeploymentApi>, ProviderError> {
        self.api.read().await.clone().ok_or_else(|| {
            ProviderError::NotConfigured("configure must run before managing resources".to_string())
        })
    }
}

impl Default for VercelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VercelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VercelProvider")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("env_fallback", &self.env_fallback)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ProviderService for VercelProvider {
    fn schema(&self) -> ProviderSchema {
        self.resources.values().fold(
            ProviderSchema::new().with_provider_config(ProviderConfig::schema()),
            |schema, resource| schema.with_resource(resource.type_name(), resource.schema()),
        )
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&ProviderConfig::schema(), &config))
    }

    #[instrument(skip_all)]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let diagnostics = validate(&ProviderConfig::schema(), &config);
        if diagnostics.iter().any(Diagnostic::is_error) {
            return Ok(diagnostics);
        }

        let mut config = ProviderConfig::from_value(&config)?;
        if self.env_fallback {
            config = config.with_env_fallback();
        }

        if config.token().is_err() {
            return Ok(vec![Diagnostic::error("Missing API token")
                .with_detail(format!("Set `api_token` or the {} environment variable", TOKEN_ENV))
                .with_attribute("api_token")]);
        }

        let client = config.build_client()?;
        info!(api_url = %config.api_url(), team_id = ?config.team_id, "Provider configured");

        *self.api.write().await = Some(Arc::new(client));
        Ok(diagnostics)
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        info!("Provider stopping");
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let resource = self.resource(resource_type)?;
        Ok(validate(&resource.schema(), &config))
    }

    async fn upgrade_resource_state(
        &self,
        resource_type: &str,
        version: u64,
        state: Value,
    ) -> Result<Value, ProviderError> {
        let current = self.resource(resource_type)?.schema().version;
        if version > current {
            return Err(ProviderError::Validation(format!(
                "state version {} of {} is newer than schema version {}",
                version, resource_type, current
            )));
        }
        Ok(state)
    }

    #[instrument(skip(self, prior_state, proposed_state, _config))]
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        _config: Value,
    ) -> Result<PlanResult, ProviderError> {
        let schema = self.resource(resource_type)?.schema();
        let plan = plan_changes(&schema, prior_state.as_ref(), &proposed_state);
        debug!(
            changes = plan.changes.len(),
            requires_replace = plan.requires_replace,
            "Planned"
        );
        Ok(plan)
    }

    #[instrument(skip(self, planned_state))]
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let api = self.api().await?;

        let mut data = ResourceData::from_state(resource.schema(), &planned_state)?;
        resource.create(api.as_ref(), &mut data).await?;
        Ok(data.into_state())
    }

    #[instrument(skip(self, current_state))]
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let api = self.api().await?;

        let mut data = ResourceData::from_state(resource.schema(), &current_state)?;
        resource.read(api.as_ref(), &mut data).await?;
        Ok(data.into_state())
    }

    #[instrument(skip(self, prior_state, planned_state))]
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        let api = self.api().await?;

        let mut data = ResourceData::from_state(resource.schema(), &planned_state)?;
        if data.is_gone() {
            if let Some(id) = prior_state.get(ID_FIELD).and_then(Value::as_str) {
                data.set_id(id);
            }
        }

        resource.update(api.as_ref(), &mut data).await?;
        Ok(data.into_state())
    }

    #[instrument(skip(self, current_state))]
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let resource = self.resource(resource_type)?;
        let api = self.api().await?;

        let mut data = ResourceData::from_state(resource.schema(), &current_state)?;
        resource.delete(api.as_ref(), &mut data).await
    }

    #[instrument(skip(self))]
    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let resource = self.resource(resource_type)?;
        let api = self.api().await?;

        let mut data = ResourceData::new(resource.schema());
        data.set_id(id);
        resource.import(api.as_ref(), &mut data).await?;
        resource.read(api.as_ref(), &mut data).await?;

        if data.is_gone() {
            return Err(ProviderError::NotFound(format!(
                "{} {} does not exist",
                resource_type, id
            )));
        }
        Ok(vec![ImportedResource::new(resource_type, data.into_state())])
    }
}
