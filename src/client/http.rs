//! `reqwest` binding of [`DeploymentApi`].

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::models::{
    CreateProjectOptions, Domain, NewProjectEnv, Project, ProjectEnv, ProjectPatch,
};
use super::{ApiError, DeploymentApi};

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

const USER_AGENT: &str = concat!("vercel-provider/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Vercel management API.
///
/// Authenticates with a bearer token and scopes every call to `team_id`
/// when one is set.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
    team_id: Option<String>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("team_id", &self.team_id)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client for `base_url` authenticating with `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            team_id: None,
        })
    }

    /// Scope all requests to a team.
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token);
        if let Some(team_id) = &self.team_id {
            builder = builder.query(&[("teamId", team_id.as_str())]);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(builder.send().await?).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        check_status(builder.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), "API request failed");
    Err(decode_error(status.as_u16(), &body))
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

fn decode_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Status {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => ApiError::Status {
            status,
            code: String::new(),
            message: body.trim().to_string(),
        },
    }
}

#[derive(Deserialize)]
struct EnvList {
    envs: Vec<ProjectEnv>,
}

#[derive(Serialize)]
struct DomainBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    redirect: Option<&'a str>,
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl DeploymentApi for HttpClient {
    #[instrument(skip(self, options), fields(project = %options.name))]
    async fn create_project(&self, options: &CreateProjectOptions) -> Result<Project, ApiError> {
        self.send(self.request(Method::POST, "/v6/projects").json(options))
            .await
    }

    #[instrument(skip(self))]
    async fn get_project(&self, name: &str) -> Result<Project, ApiError> {
        let path = project_path(name, None)?;
        self.send(self.request(Method::GET, &path)).await
    }

    #[instrument(skip(self, patch))]
    async fn update_project(&self, name: &str, patch: &ProjectPatch) -> Result<Project, ApiError> {
        let path = project_path(name, None)?;
        self.send(self.request(Method::PATCH, &path).json(patch))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_project(&self, name: &str) -> Result<(), ApiError> {
        let path = project_path(name, None)?;
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    #[instrument(skip(self))]
    async fn add_domain(
        &self,
        project: &str,
        domain: &str,
        redirect: &str,
    ) -> Result<Domain, ApiError> {
        let path = project_path(project, Some(("domains", None)))?;
        let body = DomainBody {
            name: Some(domain),
            redirect: non_empty(redirect),
        };
        self.send(self.request(Method::POST, &path).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn update_domain(
        &self,
        project: &str,
        domain: &str,
        redirect: &str,
    ) -> Result<Domain, ApiError> {
        let path = project_path(project, Some(("domains", Some(domain))))?;
        let body = DomainBody {
            name: None,
            redirect: non_empty(redirect),
        };
        self.send(self.request(Method::PATCH, &path).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_domain(&self, project: &str, domain: &str) -> Result<(), ApiError> {
        let path = project_path(project, Some(("domains", Some(domain))))?;
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    #[instrument(skip(self, env), fields(key = %env.key))]
    async fn create_project_env(
        &self,
        project: &str,
        env: &NewProjectEnv,
    ) -> Result<ProjectEnv, ApiError> {
        let path = project_path(project, Some(("env", None)))?;
        self.send(self.request(Method::POST, &path).json(env)).await
    }

    #[instrument(skip(self))]
    async fn get_project_envs(
        &self,
        project: &str,
        decrypt: bool,
    ) -> Result<Vec<ProjectEnv>, ApiError> {
        let path = project_path(project, Some(("env", None)))?;
        let mut builder = self.request(Method::GET, &path);
        if decrypt {
            builder = builder.query(&[("decrypt", "true")]);
        }
        let list: EnvList = self.send(builder).await?;
        Ok(list.envs)
    }

    #[instrument(skip(self, env), fields(id = %env.id))]
    async fn edit_project_env(
        &self,
        project: &str,
        env: &ProjectEnv,
    ) -> Result<ProjectEnv, ApiError> {
        let path = project_path(project, Some(("env", Some(env.id.as_str()))))?;
        self.send(
            self.request(Method::PATCH, &path)
                .json(&NewProjectEnv::from(env)),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_project_env(&self, project: &str, id: &str) -> Result<(), ApiError> {
        let path = project_path(project, Some(("env", Some(id))))?;
        self.send_empty(self.request(Method::DELETE, &path)).await
    }
}

/// `/v8/projects/{project}[/{collection}[/{key}]]`.
///
/// `project` and `key` are percent-encoded so each stays a single segment.
fn project_path(project: &str, child: Option<(&str, Option<&str>)>) -> Result<String, ApiError> {
    let mut path = format!("/v8/projects/{}", segment(project)?);
    if let Some((collection, key)) = child {
        path.push('/');
        path.push_str(collection);
        if let Some(key) = key {
            path.push('/');
            path.push_str(&segment(key)?);
        }
    }
    Ok(path)
}

/// Percent-encode one path segment.
///
/// Empty and dot segments are rejected: URL normalization would resolve them
/// against the surrounding path, encoded or not.
fn segment(value: &str) -> Result<Cow<'_, str>, ApiError> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(ApiError::InvalidPathSegment(value.to_string()));
    }
    Ok(urlencoding::encode(value))
}
