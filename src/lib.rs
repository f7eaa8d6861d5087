//! Vercel provider
//!
//! A provider plugin that manages three kinds of Vercel resources through the
//! Vercel management API:
//!
//! | resource type           | tracked identity | import id              |
//! |-------------------------|------------------|------------------------|
//! | `vercel_project`        | project id       | not supported          |
//! | `vercel_project_env`    | env var id       | `<project>:<env-id>`   |
//! | `vercel_project_domain` | domain name      | `<project>:<domain>`   |
//!
//! # Overview
//!
//! - **ProviderService trait**: the interface a plugin host drives
//! - **VercelProvider**: routes host calls to the per-resource controllers
//! - **Resource controllers**: create/read/update/delete (and import) per type
//! - **Reconciliation**: matching tracked identities against freshly fetched records
//! - **API client**: the `DeploymentApi` trait and its `reqwest` binding
//! - **Testing**: `ProviderTester` and an in-memory API
//!
//! A record that disappeared remotely is not an error: its identity is cleared
//! and `read` returns a null state so the host plans a re-create.
//!
//! # Quick Start
//!
//! ```ignore
//! use vercel_provider::{init_logging, ProviderService, VercelProvider};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = VercelProvider::new();
//!     provider.configure(json!({"team_id": "team_123"})).await?;
//!
//!     let state = provider
//!         .create(
//!             "vercel_project_domain",
//!             json!({"name": "web", "domain": "www.example.com", "redirect": "example.com"}),
//!         )
//!         .await?;
//!     tracing::info!(%state, "domain attached");
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod provider;
pub mod reconcile;
pub mod resource_data;
pub mod resources;
pub mod schema;
pub mod service;
pub mod testing;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use client::{ApiError, DeploymentApi, HttpClient};
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::VercelProvider;
pub use resource_data::ResourceData;
pub use schema::ProviderSchema;
pub use service::ProviderService;
pub use types::{AttributeChange, ImportedResource, PlanResult, ProviderMetadata};
pub use validation::{is_valid, validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
