//! Wire models for the Vercel management API.

use serde::{Deserialize, Serialize};

/// A project as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project id (`prj_...`).
    pub id: String,
    /// Project name, unique within the account.
    pub name: String,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub root_directory: Option<String>,
    #[serde(default)]
    pub build_command: Option<String>,
    #[serde(default)]
    pub output_directory: Option<String>,
    #[serde(default)]
    pub command_for_ignoring_build_step: Option<String>,
    /// The connected git repository, if any.
    #[serde(default)]
    pub link: Option<ProjectLink>,
    /// Domains assigned to the project.
    #[serde(default)]
    pub alias: Vec<Domain>,
}

/// Git repository connection of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectLink {
    /// Provider kind, e.g. `github`.
    #[serde(rename = "type")]
    pub link_type: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub repo: String,
}

/// A domain attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Domain {
    pub domain: String,
    /// Domain this one redirects to.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// An environment variable of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectEnv {
    pub id: String,
    /// One of `plain`, `secret`, `encrypted`, `system`.
    #[serde(rename = "type")]
    pub env_type: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Deployment targets: `production`, `preview`, `development`.
    #[serde(default)]
    pub target: Vec<String>,
}

/// Request body for creating an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewProjectEnv {
    #[serde(rename = "type")]
    pub env_type: String,
    pub key: String,
    pub value: String,
    pub target: Vec<String>,
}

impl From<&ProjectEnv> for NewProjectEnv {
    fn from(env: &ProjectEnv) -> Self {
        Self {
            env_type: env.env_type.clone(),
            key: env.key.clone(),
            value: env.value.clone(),
            target: env.target.clone(),
        }
    }
}

/// Git repository to connect when creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRepository {
    #[serde(rename = "type")]
    pub repo_type: String,
    /// `<org>/<repo>`.
    pub repo: String,
}

/// Request body for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectOptions {
    pub name: String,
    pub framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_for_ignoring_build_step: Option<String>,
}

/// Request body for updating a project.
///
/// `None` fields are sent as `null`, which resets the setting to the
/// platform default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub framework: Option<String>,
    pub root_directory: Option<String>,
    pub build_command: Option<String>,
    pub output_directory: Option<String>,
    pub command_for_ignoring_build_step: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserialize() {
        let project: Project = serde_json::from_value(json!({
            "id": "prj_123",
            "name": "web",
            "framework": "nextjs",
            "rootDirectory": null,
            "buildCommand": "npm run build",
            "link": {"type": "github", "org": "acme", "repo": "web", "repoId": 42},
            "alias": [
                {"domain": "web.vercel.app", "target": "PRODUCTION"},
                {"domain": "www.example.com", "redirect": "example.com"}
            ],
            "createdAt": 1700000000000u64
        }))
        .unwrap();

        assert_eq!(project.id, "prj_123");
        assert_eq!(project.framework.as_deref(), Some("nextjs"));
        assert!(project.root_directory.is_none());
        assert_eq!(project.build_command.as_deref(), Some("npm run build"));
        let link = project.link.unwrap();
        assert_eq!(link.link_type, "github");
        assert_eq!(link.org, "acme");
        assert_eq!(project.alias.len(), 2);
        assert_eq!(project.alias[1].redirect.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_project_minimal_deserialize() {
        let project: Project = serde_json::from_value(json!({"id": "prj_1", "name": "api"})).unwrap();
        assert!(project.framework.is_none());
        assert!(project.link.is_none());
        assert!(project.alias.is_empty());
    }

    #[test]
    fn test_project_env_deserialize() {
        let env: ProjectEnv = serde_json::from_value(json!({
            "id": "env_1",
            "type": "encrypted",
            "key": "DATABASE_URL",
            "value": "postgres://db",
            "target": ["production", "preview"],
            "configurationId": null
        }))
        .unwrap();

        assert_eq!(env.env_type, "encrypted");
        assert_eq!(env.target, vec!["production", "preview"]);
    }

    #[test]
    fn test_create_options_skip_empty() {
        let options = CreateProjectOptions {
            name: "web".to_string(),
            framework: "nextjs".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"name": "web", "framework": "nextjs"})
        );

        let options = CreateProjectOptions {
            git_repository: Some(GitRepository {
                repo_type: "github".to_string(),
                repo: "acme/web".to_string(),
            }),
            root_directory: Some("apps/web".to_string()),
            ..options
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["gitRepository"], json!({"type": "github", "repo": "acme/web"}));
        assert_eq!(json["rootDirectory"], "apps/web");
    }

    #[test]
    fn test_patch_sends_nulls() {
        let patch = ProjectPatch {
            framework: Some("vite".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({
                "framework": "vite",
                "rootDirectory": null,
                "buildCommand": null,
                "outputDirectory": null,
                "commandForIgnoringBuildStep": null
            })
        );
    }
}
