//! Testing utilities for the provider.
//!
//! [`ProviderTester`] drives a [`ProviderService`] the way a host would, without
//! a plugin server. [`InMemoryApi`] is a fake management API that keeps projects,
//! domains and environment variables in memory.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vercel_provider::testing::{InMemoryApi, ProviderTester};
//! use vercel_provider::VercelProvider;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_project() {
//!     let tester = ProviderTester::new(VercelProvider::with_api(Arc::new(InMemoryApi::new())));
//!
//!     let state = tester
//!         .lifecycle_create("vercel_project", json!({"name": "web", "framework": "nextjs"}))
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(state["framework"], "nextjs");
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::client::{
    ApiError, CreateProjectOptions, DeploymentApi, Domain, NewProjectEnv, Project, ProjectEnv,
    ProjectLink, ProjectPatch,
};
use crate::error::ProviderError;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};

/// Drives a [`ProviderService`] through host-style call sequences.
///
/// Validation calls fold error diagnostics into [`TestError`]; the lifecycle
/// helpers chain plan, apply and refresh the way a host run does.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Managed resource type names, sorted.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.validate_provider_config(config).await?;
        check_diagnostics(diagnostics)
    }

    /// `configure`, failing on any error diagnostic.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.configure(config).await?;
        check_diagnostics(diagnostics)
    }

    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_resource_config(resource_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Plan with no prior state.
    pub async fn plan_create(
        &self,
        resource_type: &str,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, None, proposed_state.clone(), proposed_state)
            .await
    }

    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(
                resource_type,
                Some(prior_state),
                proposed_state.clone(),
                proposed_state,
            )
            .await
    }

    /// Plan a destroy: null proposed state.
    pub async fn plan_delete(
        &self,
        resource_type: &str,
        prior_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), Value::Null, Value::Null)
            .await
    }

    pub async fn create(
        &self,
        resource_type: &str,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned_state).await
    }

    pub async fn read(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider.read(resource_type, current_state).await
    }

    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .update(resource_type, prior_state, planned_state)
            .await
    }

    pub async fn delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    pub async fn upgrade_resource_state(
        &self,
        resource_type: &str,
        version: u64,
        state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .upgrade_resource_state(resource_type, version, state)
            .await
    }

    // =========================================================================
    // Lifecycle Helpers
    // =========================================================================

    /// plan, create, then refresh. Returns the refreshed state.
    pub async fn lifecycle_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan_result = self.plan_create(resource_type, config).await?;

        let created_state = self
            .create(resource_type, plan_result.planned_state)
            .await?;

        self.read(resource_type, created_state).await
    }

    /// plan against `prior_state`, update, then refresh.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        proposed_state: Value,
    ) -> Result<Value, ProviderError> {
        let plan_result = self
            .plan_update(resource_type, prior_state.clone(), proposed_state)
            .await?;

        let updated_state = self
            .update(resource_type, prior_state, plan_result.planned_state)
            .await?;

        self.read(resource_type, updated_state).await
    }

    /// plan a destroy, then delete.
    pub async fn lifecycle_delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<(), ProviderError> {
        let _ = self
            .plan_delete(resource_type, current_state.clone())
            .await?;

        self.delete(resource_type, current_state).await
    }

    /// Create, update and delete one instance.
    ///
    /// Returns the refreshed state seen after the update.
    pub async fn lifecycle_crud(
        &self,
        resource_type: &str,
        initial_config: Value,
        updated_config: Value,
    ) -> Result<Value, ProviderError> {
        let created_state = self.lifecycle_create(resource_type, initial_config).await?;

        let updated_state = self
            .lifecycle_update(resource_type, created_state, updated_config)
            .await?;

        self.lifecycle_delete(resource_type, updated_state.clone())
            .await?;

        Ok(updated_state)
    }
}

/// Failure of a [`ProviderTester`] call.
#[derive(Debug)]
pub enum TestError {
    /// Error diagnostics were returned.
    Diagnostics(Vec<Diagnostic>),
    /// The provider returned an error.
    Provider(ProviderError),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "{} error diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

// =========================================================================
// In-memory management API
// =========================================================================

/// An in-memory [`DeploymentApi`].
///
/// Projects are addressed by name or id. Every call is recorded, and a failure
/// can be injected for the next call of a given operation with
/// [`fail_next`](Self::fail_next).
#[derive(Debug, Default)]
pub struct InMemoryApi {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    projects: Vec<Project>,
    /// Environment variables keyed by project id.
    envs: HashMap<String, Vec<ProjectEnv>>,
    next_id: u64,
    calls: Vec<String>,
    failures: HashMap<String, (u16, String)>,
}

impl InMemoryState {
    fn begin(&mut self, operation: &str) -> Result<(), ApiError> {
        self.calls.push(operation.to_string());
        match self.failures.remove(operation) {
            Some((status, message)) => Err(status_error(status, message)),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}_{}", prefix, self.next_id)
    }

    fn project_index(&self, name_or_id: &str) -> Option<usize> {
        self.projects
            .iter()
            .position(|p| p.name == name_or_id || p.id == name_or_id)
    }

    fn project_mut(&mut self, name_or_id: &str) -> Result<&mut Project, ApiError> {
        match self.project_index(name_or_id) {
            Some(index) => Ok(&mut self.projects[index]),
            None => Err(status_error(404, format!("Project not found: {}", name_or_id))),
        }
    }

    fn envs_mut(&mut self, project: &str) -> Result<&mut Vec<ProjectEnv>, ApiError> {
        let id = self.project_mut(project)?.id.clone();
        Ok(self.envs.entry(id).or_default())
    }
}

fn status_error(status: u16, message: impl Into<String>) -> ApiError {
    ApiError::Status {
        status,
        code: String::new(),
        message: message.into(),
    }
}

fn redirect(redirect: &str) -> Option<String> {
    (!redirect.is_empty()).then(|| redirect.to_string())
}

impl InMemoryApi {
    /// An empty API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project.
    pub async fn insert_project(&self, project: Project) {
        self.state.lock().await.projects.push(project);
    }

    /// A project by name or id.
    pub async fn project(&self, name_or_id: &str) -> Option<Project> {
        let state = self.state.lock().await;
        state
            .project_index(name_or_id)
            .map(|index| state.projects[index].clone())
    }

    /// The environment variables of a project.
    pub async fn envs(&self, project: &str) -> Vec<ProjectEnv> {
        let mut state = self.state.lock().await;
        state
            .envs_mut(project)
            .map(|envs| envs.clone())
            .unwrap_or_default()
    }

    /// Seed an environment variable. Does nothing if the project is unknown.
    pub async fn insert_env(&self, project: &str, env: ProjectEnv) {
        if let Ok(envs) = self.state.lock().await.envs_mut(project) {
            envs.push(env);
        }
    }

    /// Remove an environment variable behind the provider's back.
    pub async fn remove_env(&self, project: &str, id: &str) {
        if let Ok(envs) = self.state.lock().await.envs_mut(project) {
            envs.retain(|env| env.id != id);
        }
    }

    /// Remove a domain behind the provider's back.
    pub async fn remove_domain(&self, project: &str, domain: &str) {
        if let Ok(project) = self.state.lock().await.project_mut(project) {
            project.alias.retain(|d| d.domain != domain);
        }
    }

    /// Fail the next call of `operation` with the given HTTP status.
    pub async fn fail_next(&self, operation: &str, status: u16, message: &str) {
        self.state
            .lock()
            .await
            .failures
            .insert(operation.to_string(), (status, message.to_string()));
    }

    /// Names of the operations called so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl DeploymentApi for InMemoryApi {
    async fn create_project(&self, options: &CreateProjectOptions) -> Result<Project, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("create_project")?;
        if state.project_index(&options.name).is_some() {
            return Err(status_error(409, format!("Project already exists: {}", options.name)));
        }

        let link = options.git_repository.as_ref().map(|git| {
            let (org, repo) = git.repo.split_once('/').unwrap_or((git.repo.as_str(), ""));
            ProjectLink {
                link_type: git.repo_type.clone(),
                org: org.to_string(),
                repo: repo.to_string(),
            }
        });

        let project = Project {
            id: state.next_id("prj"),
            name: options.name.clone(),
            framework: Some(options.framework.clone()),
            root_directory: options.root_directory.clone(),
            build_command: options.build_command.clone(),
            output_directory: options.output_directory.clone(),
            command_for_ignoring_build_step: options.command_for_ignoring_build_step.clone(),
            link,
            alias: Vec::new(),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn get_project(&self, name: &str) -> Result<Project, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("get_project")?;
        Ok(state.project_mut(name)?.clone())
    }

    async fn update_project(&self, name: &str, patch: &ProjectPatch) -> Result<Project, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("update_project")?;
        let project = state.project_mut(name)?;
        project.framework = patch.framework.clone();
        project.root_directory = patch.root_directory.clone();
        project.build_command = patch.build_command.clone();
        project.output_directory = patch.output_directory.clone();
        project.command_for_ignoring_build_step = patch.command_for_ignoring_build_step.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, name: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.begin("delete_project")?;
        let index = state
            .project_index(name)
            .ok_or_else(|| status_error(404, format!("Project not found: {}", name)))?;
        let project = state.projects.remove(index);
        state.envs.remove(&project.id);
        Ok(())
    }

    async fn add_domain(
        &self,
        project: &str,
        domain: &str,
        redirect_to: &str,
    ) -> Result<Domain, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("add_domain")?;
        let project = state.project_mut(project)?;
        if project.alias.iter().any(|d| d.domain == domain) {
            return Err(status_error(409, format!("Domain already assigned: {}", domain)));
        }
        let added = Domain {
            domain: domain.to_string(),
            redirect: redirect(redirect_to),
        };
        project.alias.push(added.clone());
        Ok(added)
    }

    async fn update_domain(
        &self,
        project: &str,
        domain: &str,
        redirect_to: &str,
    ) -> Result<Domain, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("update_domain")?;
        let found = state
            .project_mut(project)?
            .alias
            .iter_mut()
            .find(|d| d.domain == domain)
            .ok_or_else(|| status_error(404, format!("Domain not found: {}", domain)))?;
        found.redirect = redirect(redirect_to);
        Ok(found.clone())
    }

    async fn delete_domain(&self, project: &str, domain: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.begin("delete_domain")?;
        let project = state.project_mut(project)?;
        let before = project.alias.len();
        project.alias.retain(|d| d.domain != domain);
        if project.alias.len() == before {
            return Err(status_error(404, format!("Domain not found: {}", domain)));
        }
        Ok(())
    }

    async fn create_project_env(
        &self,
        project: &str,
        env: &NewProjectEnv,
    ) -> Result<ProjectEnv, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("create_project_env")?;
        let id = state.next_id("env");
        let created = ProjectEnv {
            id,
            env_type: env.env_type.clone(),
            key: env.key.clone(),
            value: env.value.clone(),
            target: env.target.clone(),
        };
        state.envs_mut(project)?.push(created.clone());
        Ok(created)
    }

    async fn get_project_envs(
        &self,
        project: &str,
        _decrypt: bool,
    ) -> Result<Vec<ProjectEnv>, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("get_project_envs")?;
        Ok(state.envs_mut(project)?.clone())
    }

    async fn edit_project_env(
        &self,
        project: &str,
        env: &ProjectEnv,
    ) -> Result<ProjectEnv, ApiError> {
        let mut state = self.state.lock().await;
        state.begin("edit_project_env")?;
        let found = state
            .envs_mut(project)?
            .iter_mut()
            .find(|e| e.id == env.id)
            .ok_or_else(|| status_error(404, format!("Env not found: {}", env.id)))?;
        *found = env.clone();
        Ok(found.clone())
    }

    async fn delete_project_env(&self, project: &str, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        state.begin("delete_project_env")?;
        let envs = state.envs_mut(project)?;
        let before = envs.len();
        envs.retain(|env| env.id != id);
        if envs.len() == before {
            return Err(status_error(404, format!("Env not found: {}", id)));
        }
        Ok(())
    }
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// The plan adds attributes without replacing anything.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(
        !plan.changes.is_empty(),
        "create plan has no changes"
    );
    assert!(
        !plan.requires_replace,
        "create plan must not replace"
    );
}

/// The plan is empty.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        plan.changes.is_empty(),
        "expected an empty plan, got {} change(s): {:?}",
        plan.changes.len(),
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// The plan replaces the resource.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(
        plan.requires_replace,
        "expected a replacement plan"
    );
}

/// The plan updates in place.
pub fn assert_plan_updates_in_place(plan: &PlanResult) {
    assert!(
        !plan.requires_replace,
        "expected an in-place update, plan replaces"
    );
}

/// The plan touches `path`.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    let has_change = plan.changes.iter().any(|c| c.path == path);
    assert!(
        has_change,
        "expected a change to '{}', plan changes {:?}",
        path,
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// No error diagnostics (warnings are fine).
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();

    assert!(
        errors.is_empty(),
        "expected no errors, got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain an error whose summary contains `substring`
/// and, when given, points at `attribute`.
///
/// # Panics
///
/// Panics if no such error diagnostic exists.
pub fn assert_error_at(diagnostics: &[Diagnostic], substring: &str, attribute: Option<&str>) {
    let found = diagnostics.iter().any(|d| {
        matches!(d.severity, DiagnosticSeverity::Error)
            && d.summary.contains(substring)
            && attribute.map_or(true, |a| d.attribute.as_deref() == Some(a))
    });

    assert!(
        found,
        "expected an error containing '{}' at {:?}, errors: {:?}",
        substring,
        attribute,
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| (&d.summary, &d.attribute))
            .collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GitRepository;
    use crate::types::AttributeChange;
    use serde_json::json;

    #[test]
    fn test_in_memory_records_calls() {
        let api = InMemoryApi::new();

        let calls = tokio_test::block_on(async {
            api.create_project(&CreateProjectOptions {
                name: "web".to_string(),
                framework: "vite".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
            api.get_project("web").await.unwrap();
            api.calls().await
        });

        assert_eq!(calls, vec!["create_project", "get_project"]);
    }

    #[tokio::test]
    async fn test_in_memory_create_project_links_repo() {
        let api = InMemoryApi::new();
        let project = api
            .create_project(&CreateProjectOptions {
                name: "web".to_string(),
                framework: "nextjs".to_string(),
                git_repository: Some(GitRepository {
                    repo_type: "github".to_string(),
                    repo: "acme/web".to_string(),
                }),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(project.id, "prj_1");
        let link = project.link.unwrap();
        assert_eq!((link.org.as_str(), link.repo.as_str()), ("acme", "web"));
        assert_eq!(api.project("prj_1").await.unwrap().name, "web");
    }

    #[tokio::test]
    async fn test_in_memory_conflicts_and_missing() {
        let api = InMemoryApi::new();
        let options = CreateProjectOptions {
            name: "web".to_string(),
            framework: "vite".to_string(),
            ..Default::default()
        };
        api.create_project(&options).await.unwrap();

        let err = api.create_project(&options).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 409, .. }));

        let err = api.get_project("api").await.unwrap_err();
        assert!(err.is_not_found());

        let err = api.delete_project_env("web", "env_9").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_in_memory_fail_next_applies_once() {
        let api = InMemoryApi::new();
        api.fail_next("get_project_envs", 500, "boom").await;

        let err = api.get_project_envs("web", true).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = api.get_project_envs("web", true).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_in_memory_domains() {
        let api = InMemoryApi::new();
        api.insert_project(Project {
            id: "prj_web".to_string(),
            name: "web".to_string(),
            ..Default::default()
        })
        .await;

        let added = api.add_domain("web", "www.example.com", "").await.unwrap();
        assert_eq!(added.redirect, None);

        let updated = api
            .update_domain("prj_web", "www.example.com", "example.com")
            .await
            .unwrap();
        assert_eq!(updated.redirect.as_deref(), Some("example.com"));

        api.delete_domain("web", "www.example.com").await.unwrap();
        assert!(api.delete_domain("web", "www.example.com").await.is_err());
    }

    #[test]
    fn test_assert_no_errors() {
        let diagnostics = vec![Diagnostic::warning("Just a warning")];
        assert_no_errors(&diagnostics);
    }

    #[test]
    #[should_panic(expected = "expected no errors")]
    fn test_assert_no_errors_fails() {
        let diagnostics = vec![Diagnostic::error("An error")];
        assert_no_errors(&diagnostics);
    }

    #[test]
    fn test_assert_error_at() {
        let diagnostics = vec![Diagnostic::error("Missing required attribute").with_attribute("name")];
        assert_error_at(&diagnostics, "Missing", Some("name"));
        assert_error_at(&diagnostics, "required", None);
    }

    #[test]
    #[should_panic(expected = "expected an error containing")]
    fn test_assert_error_at_wrong_attribute() {
        let diagnostics = vec![Diagnostic::error("Missing required attribute").with_attribute("name")];
        assert_error_at(&diagnostics, "Missing", Some("key"));
    }

    #[test]
    fn test_plan_assertions() {
        let plan = PlanResult::with_changes(
            json!({"domain": "example.org"}),
            vec![AttributeChange::modified(
                "domain",
                json!("example.com"),
                json!("example.org"),
            )],
            true,
        );
        assert_plan_changes_attribute(&plan, "domain");
        assert_plan_replaces(&plan);

        let plan = PlanResult::no_change(json!({}));
        assert_plan_no_changes(&plan);
        assert_plan_updates_in_place(&plan);
    }

    #[test]
    fn test_test_error_display() {
        let err = TestError::Diagnostics(vec![
            Diagnostic::error("First error").with_attribute("field1"),
            Diagnostic::error("Second error").with_detail("More info"),
        ]);

        let display = format!("{}", err);
        assert!(display.contains("First error"));
        assert!(display.contains("Second error"));
        assert!(display.contains("field1"));
        assert!(display.contains("More info"));
    }
}
