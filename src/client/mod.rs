//! Client boundary to the Vercel management API.
//!
//! Resource controllers only talk to [`DeploymentApi`]. [`HttpClient`] is the
//! production binding; [`InMemoryApi`](crate::testing::InMemoryApi) backs tests.

mod http;
mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use http::{HttpClient, DEFAULT_API_URL};
pub use models::{
    CreateProjectOptions, Domain, GitRepository, NewProjectEnv, Project, ProjectEnv, ProjectLink,
    ProjectPatch,
};

/// Errors returned by the management API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the response body (may be empty).
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A name, id or domain cannot be used as a URL path segment.
    #[error("Invalid path segment: '{0}'")]
    InvalidPathSegment(String),
}

impl ApiError {
    /// Whether the API reported the addressed record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// The management API operations the provider consumes.
///
/// Projects are addressed by name (the API also accepts the id).
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    async fn create_project(&self, options: &CreateProjectOptions) -> Result<Project, ApiError>;

    async fn get_project(&self, name: &str) -> Result<Project, ApiError>;

    async fn update_project(&self, name: &str, patch: &ProjectPatch) -> Result<Project, ApiError>;

    async fn delete_project(&self, name: &str) -> Result<(), ApiError>;

    async fn add_domain(
        &self,
        project: &str,
        domain: &str,
        redirect: &str,
    ) -> Result<Domain, ApiError>;

    async fn update_domain(
        &self,
        project: &str,
        domain: &str,
        redirect: &str,
    ) -> Result<Domain, ApiError>;

    async fn delete_domain(&self, project: &str, domain: &str) -> Result<(), ApiError>;

    async fn create_project_env(
        &self,
        project: &str,
        env: &NewProjectEnv,
    ) -> Result<ProjectEnv, ApiError>;

    /// List a project's environment variables, with values decrypted when `decrypt` is set.
    async fn get_project_envs(
        &self,
        project: &str,
        decrypt: bool,
    ) -> Result<Vec<ProjectEnv>, ApiError>;

    async fn edit_project_env(
        &self,
        project: &str,
        env: &ProjectEnv,
    ) -> Result<ProjectEnv, ApiError>;

    async fn delete_project_env(&self, project: &str, id: &str) -> Result<(), ApiError>;
}
