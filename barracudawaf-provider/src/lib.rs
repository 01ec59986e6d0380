//! Barracuda WAF Provider
//!
//! Manages configuration objects on a Barracuda Web Application Firewall
//! through its REST API (`restapi/v3.1`).
//!
//! ## Module Structure
//!
//! - `client` - REST session, login and error decoding
//! - `resources` - Static descriptors of every resource type
//! - `endpoint` - Path templates with parent slots
//! - `hydrate` - Payload building and response mapping
//! - `provider` - BarracudaWafProvider, the generic resource mapper
//! - `registrar` - Provider schema, configuration and login

pub mod client;
pub mod endpoint;
pub mod hydrate;
pub mod provider;
pub mod registrar;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;

// Re-export main types
pub use provider::BarracudaWafProvider;
pub use registrar::{PROVIDER_NAME, ProviderConfig, configure, provider_schema};

use barracudawaf_core::provider::{BoxFuture, Provider, ProviderResult, ResourceType};
use barracudawaf_core::resource::{Resource, ResourceId, State, Value};

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for BarracudaWafProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::resource_types()
    }

    fn read<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        known: &'a HashMap<String, Value>,
    ) -> BoxFuture<'a, ProviderResult<State>> {
        Box::pin(self.read_resource(id, identifier, known))
    }

    fn create<'a>(&'a self, resource: &'a Resource) -> BoxFuture<'a, ProviderResult<State>> {
        Box::pin(self.create_resource(resource))
    }

    fn update<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        from: &'a State,
        to: &'a Resource,
    ) -> BoxFuture<'a, ProviderResult<State>> {
        Box::pin(self.update_resource(id, identifier, from, to))
    }

    fn delete<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        from: &'a State,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(self.delete_resource(id, identifier, from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::testing::StubAppliance;

    #[tokio::test]
    async fn provider_trait_drives_the_lifecycle() {
        let stub = Arc::new(StubAppliance::new());
        let provider: Box<dyn Provider> = Box::new(BarracudaWafProvider::new(stub.clone()));
        assert_eq!(provider.name(), "barracudawaf");
        assert!(provider.resource_types().len() >= 60);

        let resource = Resource::new("barracudawaf_trusted_host_groups", "office")
            .with_attribute("name", Value::String("office".to_string()));
        let created = provider.create(&resource).await.unwrap();
        assert_eq!(created.identifier.as_deref(), Some("office"));

        provider
            .delete(&resource.id, "office", &created)
            .await
            .unwrap();
        let gone = provider
            .read(&resource.id, "office", &created.attributes)
            .await
            .unwrap();
        assert!(!gone.exists);
        assert!(stub.object("trusted-host-groups/office").is_none());
    }
}
