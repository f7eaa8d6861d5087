//! Resource controllers.
//!
//! Each managed resource type implements [`Resource`]: a schema plus the
//! create/read/update/delete lifecycle over one kind of remote record. Every
//! callback receives the API client and the resource data of a single instance
//! and runs its remote calls strictly in sequence; the first error aborts.

mod project;
mod project_domain;
mod project_env;

use async_trait::async_trait;

use crate::client::DeploymentApi;
use crate::error::ProviderError;
use crate::resource_data::ResourceData;
use crate::schema::Schema;

pub use project::ProjectResource;
pub use project_domain::ProjectDomainResource;
pub use project_env::ProjectEnvResource;

/// Lifecycle of one managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// The resource type name, e.g. `vercel_project`.
    fn type_name(&self) -> &'static str;

    /// The schema of this resource type.
    fn schema(&self) -> Schema;

    /// Create the remote record and hydrate `data` from it.
    async fn create(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError>;

    /// Refresh `data` from the remote record.
    ///
    /// Clears the tracked identity when the record no longer exists.
    async fn read(&self, api: &dyn DeploymentApi, data: &mut ResourceData)
        -> Result<(), ProviderError>;

    /// Push `data` to the remote record and refresh.
    async fn update(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError>;

    /// Delete the remote record and clear the tracked identity.
    async fn delete(
        &self,
        api: &dyn DeploymentApi,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError>;

    /// Resolve the import identifier held in `data.id()`.
    async fn import(
        &self,
        _api: &dyn DeploymentApi,
        _data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Unimplemented(format!(
            "Import not supported for resource type: {}",
            self.type_name()
        )))
    }
}

/// All resource types managed by the provider.
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(ProjectResource),
        Box::new(ProjectEnvResource),
        Box::new(ProjectDomainResource),
    ]
}

/// Empty string as `None`.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
