//! The host-facing provider interface.
//!
//! A host adapter (the plugin protocol server) drives a provider through
//! [`ProviderService`]. State crosses this boundary as JSON values; failures
//! come back as [`ProviderError`] or as [`Diagnostic`]s for validation-style
//! calls.

use serde_json::Value;

use crate::error::ProviderError;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::types::{ImportedResource, PlanResult, ProviderMetadata};

/// Operations a host invokes on a provider.
///
/// # Example
///
/// ```ignore
/// use vercel_provider::{ProviderService, VercelProvider};
/// use serde_json::json;
///
/// let provider = VercelProvider::new();
/// provider.configure(json!({"api_token": "token"})).await?;
/// let state = provider
///     .create("vercel_project", json!({"name": "web", "framework": "nextjs"}))
///     .await?;
/// ```
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Return the provider's schema including all resources.
    fn schema(&self) -> ProviderSchema;

    /// Return provider metadata. By default, this is derived from the schema.
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            resources: self.schema().resources.keys().cloned().collect(),
        }
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Validate the provider configuration before configuring.
    async fn validate_provider_config(&self, _config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(vec![])
    }

    /// Configure the provider with credentials and settings.
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate a resource's configuration before planning.
    async fn validate_resource_config(
        &self,
        _resource_type: &str,
        _config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(vec![])
    }

    /// Upgrade resource state from an older schema version.
    async fn upgrade_resource_state(
        &self,
        _resource_type: &str,
        _version: u64,
        state: Value,
    ) -> Result<Value, ProviderError> {
        Ok(state)
    }

    /// Plan changes for a resource.
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError>;

    /// Create a new resource.
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError>;

    /// Read the current state of a resource.
    ///
    /// Returns `Value::Null` when the resource no longer exists.
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError>;

    /// Update an existing resource.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError>;

    /// Delete a resource.
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError>;

    /// Import existing infrastructure into management.
    async fn import_resource(
        &self,
        resource_type: &str,
        _id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        Err(ProviderError::Unimplemented(format!(
            "Import not supported for resource type: {}",
            resource_type
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Implements only the required methods.
    struct Minimal;

    #[async_trait::async_trait]
    impl ProviderService for Minimal {
        fn schema(&self) -> ProviderSchema {
            ProviderSchema::new()
        }

        async fn configure(&self, _config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
            Ok(vec![])
        }

        async fn plan(
            &self,
            _resource_type: &str,
            _prior_state: Option<Value>,
            proposed_state: Value,
            _config: Value,
        ) -> Result<PlanResult, ProviderError> {
            Ok(PlanResult::no_change(proposed_state))
        }

        async fn create(&self, _resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
            Ok(planned_state)
        }

        async fn read(&self, _resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
            Ok(current_state)
        }

        async fn update(
            &self,
            _resource_type: &str,
            _prior_state: Value,
            planned_state: Value,
        ) -> Result<Value, ProviderError> {
            Ok(planned_state)
        }

        async fn delete(&self, _resource_type: &str, _current_state: Value) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_methods() {
        let provider = Minimal;

        assert!(provider.metadata().resources.is_empty());
        assert!(provider.validate_provider_config(json!({})).await.unwrap().is_empty());
        assert!(provider
            .validate_resource_config("anything", json!({"name": 1}))
            .await
            .unwrap()
            .is_empty());
        provider.stop().await.unwrap();

        let state = json!({"id": "x"});
        let upgraded = provider
            .upgrade_resource_state("anything", 7, state.clone())
            .await
            .unwrap();
        assert_eq!(upgraded, state);

        let err = provider.import_resource("anything", "a:b").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unimplemented(_)));
    }
}
