//! Barracuda WAF provider implementation
//!
//! One generic mapper drives every resource type from its descriptor:
//! resolve the path, hydrate the payload, issue the call, apply nested
//! sub-resources one element at a time, then read the object back.

use std::collections::HashMap;
use std::sync::Arc;

use barracudawaf_core::provider::{ProviderError, ProviderResult};
use barracudawaf_core::resource::{Resource, ResourceId, State, Value};
use log::{debug, info, warn};

use crate::client::{ApiResponse, ClientError, Method, WafApi};
use crate::endpoint::{EndpointError, PARENT_ATTRIBUTE, parent_names};
use crate::hydrate::{attributes_from_entry, hydrate};
use crate::resources::{ResourceDescriptor, get_descriptor};

/// Barracuda WAF Provider
pub struct BarracudaWafProvider {
    api: Arc<dyn WafApi>,
}

fn client_error(id: &ResourceId, action: &str, e: ClientError) -> ProviderError {
    ProviderError::new(format!("Failed to {}: {}", action, e))
        .with_cause(e)
        .for_resource(id.clone())
}

fn endpoint_error(id: &ResourceId, e: EndpointError) -> ProviderError {
    ProviderError::new(e.to_string())
        .with_cause(e)
        .for_resource(id.clone())
}

impl BarracudaWafProvider {
    pub fn new(api: Arc<dyn WafApi>) -> Self {
        Self { api }
    }

    fn descriptor(&self, id: &ResourceId) -> ProviderResult<&'static ResourceDescriptor> {
        get_descriptor(&id.resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read an object by name
    ///
    /// `parent`, sub-resource blocks and sensitive fields the appliance does
    /// not echo back are carried over from `known`.
    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        known: &HashMap<String, Value>,
    ) -> ProviderResult<State> {
        let descriptor = self.descriptor(id)?;
        let parents = parent_names(known);
        let path = descriptor
            .endpoint
            .object_path(&parents, identifier)
            .map_err(|e| endpoint_error(id, e))?;

        let body = match self.api.get(&path).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                warn!("{} ({}) not found on the appliance", id, identifier);
                return Ok(State::not_found(id.clone()));
            }
            Err(e) => return Err(client_error(id, "read resource", e)),
        };

        let response =
            ApiResponse::from_value(body).map_err(|e| client_error(id, "decode response", e))?;
        if response.is_empty() {
            warn!("{} ({}) not found on the appliance", id, identifier);
            return Ok(State::not_found(id.clone()));
        }

        let entry = response
            .entries()
            .filter_map(serde_json::Value::as_object)
            .find(|entry| {
                entry.get("name").and_then(serde_json::Value::as_str) == Some(identifier)
            })
            .ok_or_else(|| {
                ProviderError::new(format!(
                    "Response for {} does not contain an object named '{}'",
                    path, identifier
                ))
                .for_resource(id.clone())
            })?;

        let mut attributes = attributes_from_entry(descriptor.fields, entry);
        if let Some(parent) = known.get(PARENT_ATTRIBUTE) {
            attributes.insert(PARENT_ATTRIBUTE.to_string(), parent.clone());
        }
        for sub in descriptor.sub_resources {
            if let Some(block) = known.get(sub.name) {
                attributes.insert(sub.name.to_string(), block.clone());
            }
        }
        for field in descriptor.fields.iter().filter(|f| f.sensitive) {
            if !attributes.contains_key(field.name)
                && let Some(value) = known.get(field.name)
            {
                attributes.insert(field.name.to_string(), value.clone());
            }
        }

        Ok(State::existing(id.clone(), attributes).with_identifier(identifier))
    }

    /// Create an object, apply its sub-resources and read it back
    ///
    /// Once the object exists, any later failure carries a partial State
    /// without the sub-resource blocks, so the next plan re-applies them as
    /// an update.
    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let id = &resource.id;
        let descriptor = self.descriptor(id)?;
        let parents = parent_names(&resource.attributes);
        let name = object_name(resource)?;

        let create_path = descriptor
            .endpoint
            .create_path(&parents)
            .map_err(|e| endpoint_error(id, e))?;
        let object_path = descriptor
            .endpoint
            .object_path(&parents, &name)
            .map_err(|e| endpoint_error(id, e))?;

        info!("Creating {} ({})", id, object_path);
        let payload = hydrate(descriptor.fields, &resource.attributes, Method::Post);
        self.api
            .post(&create_path, &serde_json::Value::Object(payload))
            .await
            .map_err(|e| client_error(id, "create resource", e))?;

        let partial = || {
            let mut attributes = resource.attributes.clone();
            for sub in descriptor.sub_resources {
                attributes.remove(sub.name);
            }
            State::existing(id.clone(), attributes).with_identifier(name.as_str())
        };

        self.apply_sub_resources(descriptor, id, &object_path, &resource.attributes)
            .await
            .map_err(|e| e.with_partial_state(partial()))?;

        let state = self
            .read_resource(id, &name, &resource.attributes)
            .await
            .map_err(|e| e.with_partial_state(partial()))?;
        if !state.exists {
            return Err(ProviderError::new(format!(
                "{} was created but could not be read back",
                object_path
            ))
            .for_resource(id.clone()));
        }
        Ok(state)
    }

    /// Update an object in place
    ///
    /// Update-exempt fields are left out of the payload, so changing them
    /// has no effect upstream. An object cannot move to another parent.
    pub async fn update_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let descriptor = self.descriptor(id)?;
        // the object lives where it was created
        let requested = parent_names(&to.attributes);
        let parents = if from.attributes.contains_key(PARENT_ATTRIBUTE) {
            parent_names(&from.attributes)
        } else {
            requested.clone()
        };
        if to.attributes.contains_key(PARENT_ATTRIBUTE) && requested != parents {
            return Err(ProviderError::new(format!(
                "Cannot move from parent {:?} to {:?}: delete the resource and create it again",
                parents, requested
            ))
            .for_resource(id.clone()));
        }

        let path = descriptor
            .endpoint
            .object_path(&parents, identifier)
            .map_err(|e| endpoint_error(id, e))?;

        info!("Updating {} ({})", id, path);
        let payload = hydrate(descriptor.fields, &to.attributes, Method::Put);
        self.api
            .put(&path, &serde_json::Value::Object(payload))
            .await
            .map_err(|e| client_error(id, "update resource", e))?;

        // a changed name renames the object
        let name = object_name(to).unwrap_or_else(|_| identifier.to_string());
        let object_path = descriptor
            .endpoint
            .object_path(&parents, &name)
            .map_err(|e| endpoint_error(id, e))?;

        self.apply_sub_resources(descriptor, id, &object_path, &to.attributes)
            .await?;

        let mut known = to.attributes.clone();
        if let Some(parent) = from.attributes.get(PARENT_ATTRIBUTE) {
            known
                .entry(PARENT_ATTRIBUTE.to_string())
                .or_insert_with(|| parent.clone());
        }
        self.read_resource(id, &name, &known).await
    }

    /// Delete an object; one that is already gone counts as deleted
    pub async fn delete_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
    ) -> ProviderResult<()> {
        let descriptor = self.descriptor(id)?;
        let parents = parent_names(&from.attributes);
        let path = descriptor
            .endpoint
            .object_path(&parents, identifier)
            .map_err(|e| endpoint_error(id, e))?;

        info!("Deleting {} ({})", id, path);
        match self.api.delete(&path).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                warn!("{} ({}) was already deleted", id, path);
                Ok(())
            }
            Err(e) => Err(client_error(id, "delete resource", e)),
        }
    }

    /// One `PUT {object}/{block-key}` per block element, in declaration order
    ///
    /// The first failure aborts; elements applied before it stay applied.
    async fn apply_sub_resources(
        &self,
        descriptor: &ResourceDescriptor,
        id: &ResourceId,
        object_path: &str,
        attributes: &HashMap<String, Value>,
    ) -> ProviderResult<()> {
        for sub in descriptor.sub_resources {
            let Some(block) = attributes.get(sub.name) else {
                continue;
            };
            let Value::List(elements) = block else {
                return Err(ProviderError::new(format!(
                    "'{}' must be a list of blocks",
                    sub.name
                ))
                .for_resource(id.clone()));
            };

            let path = format!("{}/{}", object_path, sub.key);
            for (index, element) in elements.iter().enumerate() {
                let Value::Map(values) = element else {
                    return Err(ProviderError::new(format!(
                        "'{}' element {} must be a block",
                        sub.name, index
                    ))
                    .for_resource(id.clone()));
                };

                let payload = hydrate(sub.fields, values, Method::Put);
                if payload.is_empty() {
                    debug!("Skipping empty {} element {}", sub.name, index);
                    continue;
                }

                debug!("Applying {} element {} to {}", sub.name, index, path);
                self.api
                    .put(&path, &serde_json::Value::Object(payload))
                    .await
                    .map_err(|e| {
                        client_error(id, &format!("apply {} element {}", sub.name, index), e)
                    })?;
            }
        }
        Ok(())
    }
}

/// The object's `name`, which is also its identifier
fn object_name(resource: &Resource) -> ProviderResult<String> {
    resource
        .attributes
        .get("name")
        .and_then(Value::to_scalar_string)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ProviderError::new("Attribute 'name' is required").for_resource(resource.id.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubAppliance;
    use barracudawaf_core::differ::find_changed_attributes;
    use serde_json::json;

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    fn block(pairs: &[(&str, &str)]) -> Value {
        Value::Map(pairs.iter().map(|(k, v)| (k.to_string(), text(v))).collect())
    }

    fn demo_service(port: &str) -> Resource {
        Resource::new("barracudawaf_services", "demo")
            .with_attribute("name", text("DemoApp1"))
            .with_attribute("ip_address", text("10.0.0.10"))
            .with_attribute("port", text(port))
            .with_attribute("type", text("HTTP"))
            .with_attribute("address_version", text("IPv4"))
            .with_attribute("comments", text(""))
    }

    fn web_server() -> Resource {
        Resource::new("barracudawaf_servers", "web")
            .with_attribute("name", text("web1"))
            .with_attribute("parent", Value::List(vec![text("DemoApp1")]))
            .with_attribute("ip_address", text("10.0.1.5"))
            .with_attribute("port", text("80"))
    }

    fn provider_with(stub: &Arc<StubAppliance>) -> BarracudaWafProvider {
        BarracudaWafProvider::new(stub.clone())
    }

    async fn with_service(stub: &Arc<StubAppliance>) -> State {
        provider_with(stub)
            .create_resource(&demo_service("90"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_read_returns_created_name() {
        let stub = Arc::new(StubAppliance::new());
        let state = with_service(&stub).await;

        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("DemoApp1"));
        assert_eq!(state.attributes.get("name"), Some(&text("DemoApp1")));
        assert_eq!(state.attributes.get("port"), Some(&text("90")));

        let posts = stub.calls_to(Method::Post, "services");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "services");
    }

    #[tokio::test]
    async fn empty_strings_are_not_sent() {
        let stub = Arc::new(StubAppliance::new());
        with_service(&stub).await;

        let body = stub.calls()[0].body.clone().unwrap();
        assert!(body.get("comments").is_none());
        assert_eq!(body.get("ip-address"), Some(&json!("10.0.0.10")));
    }

    #[tokio::test]
    async fn update_port_keeps_name() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        let created = with_service(&stub).await;

        let updated = provider
            .update_resource(&created.id, "DemoApp1", &created, &demo_service("80"))
            .await
            .unwrap();

        assert_eq!(updated.attributes.get("port"), Some(&text("80")));
        assert_eq!(updated.attributes.get("name"), Some(&text("DemoApp1")));

        let puts = stub.calls_to(Method::Put, "services/DemoApp1");
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].body.as_ref().unwrap()["port"], json!("80"));
    }

    #[tokio::test]
    async fn update_exempt_fields_are_never_sent() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        let created = with_service(&stub).await;

        let desired = demo_service("90")
            .with_attribute("type", text("HTTPS"))
            .with_attribute("address_version", text("IPv6"));
        let updated = provider
            .update_resource(&created.id, "DemoApp1", &created, &desired)
            .await
            .unwrap();

        let put = &stub.calls_to(Method::Put, "services/DemoApp1")[0];
        let body = put.body.as_ref().unwrap();
        assert!(body.get("type").is_none());
        assert!(body.get("address-version").is_none());

        assert_eq!(updated.attributes.get("type"), Some(&text("HTTP")));
        assert_eq!(updated.attributes.get("address_version"), Some(&text("IPv4")));
    }

    #[tokio::test]
    async fn delete_then_read_clears_identifier() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        let created = with_service(&stub).await;

        provider
            .delete_resource(&created.id, "DemoApp1", &created)
            .await
            .unwrap();
        assert_eq!(stub.calls_to(Method::Delete, "services/DemoApp1").len(), 1);

        let state = provider
            .read_resource(&created.id, "DemoApp1", &created.attributes)
            .await
            .unwrap();
        assert!(!state.exists);
        assert_eq!(state.identifier, None);
    }

    #[tokio::test]
    async fn read_treats_404_as_not_found() {
        let stub = Arc::new(StubAppliance::new().missing_as_404());
        let provider = provider_with(&stub);
        let id = ResourceId::new("barracudawaf_services", "demo");

        let state = provider
            .read_resource(&id, "DemoApp1", &HashMap::new())
            .await
            .unwrap();
        assert!(!state.exists);
    }

    #[tokio::test]
    async fn read_without_matching_entry_is_an_error() {
        let stub = Arc::new(StubAppliance::new().respond_to_get(
            "services/DemoApp1",
            json!({"data": {"Other": {"name": "Other"}}}),
        ));
        let provider = provider_with(&stub);
        let id = ResourceId::new("barracudawaf_services", "demo");

        let err = provider
            .read_resource(&id, "DemoApp1", &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.message.contains("DemoApp1"));
        assert_eq!(err.resource_id, Some(id));
    }

    #[tokio::test]
    async fn delete_of_missing_object_succeeds() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        let id = ResourceId::new("barracudawaf_services", "demo");

        provider
            .delete_resource(&id, "DemoApp1", &State::not_found(id.clone()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ssl_policy_block_is_one_extra_put() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        with_service(&stub).await;

        let server = web_server().with_attribute(
            "ssl_policy",
            Value::List(vec![block(&[("enable_tls_1_2", "Yes")])]),
        );
        let state = provider.create_resource(&server).await.unwrap();

        let puts = stub.calls_to(Method::Put, "/ssl-policy");
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].path, "services/DemoApp1/servers/web1/ssl-policy");
        assert_eq!(
            puts[0].body.as_ref().unwrap(),
            &json!({"enable-tls-1-2": "Yes"})
        );
        assert_eq!(stub.calls_to(Method::Put, "").len(), 1);

        assert_eq!(
            state.attributes.get("ssl_policy"),
            server.attributes.get("ssl_policy")
        );
        assert_eq!(state.attributes.get("parent"), server.attributes.get("parent"));
    }

    #[tokio::test]
    async fn failing_sub_resource_aborts_and_keeps_earlier_elements() {
        let stub = Arc::new(StubAppliance::new().fail_on(
            Method::Put,
            "services/DemoApp1/servers/web1/load-balancing",
        ));
        let provider = provider_with(&stub);
        with_service(&stub).await;

        let server = web_server()
            .with_attribute(
                "ssl_policy",
                Value::List(vec![block(&[("enable_https", "Yes")])]),
            )
            .with_attribute(
                "load_balancing",
                Value::List(vec![block(&[("weight", "10")])]),
            )
            .with_attribute(
                "connection_pooling",
                Value::List(vec![block(&[("enable_connection_pooling", "Yes")])]),
            );

        let err = provider.create_resource(&server).await.unwrap_err();
        assert!(err.message.contains("load_balancing element 0"));

        let partial = err.partial_state.expect("object was created");
        assert!(partial.exists);
        assert_eq!(partial.identifier.as_deref(), Some("web1"));
        assert_eq!(partial.attributes.get("port"), Some(&text("80")));
        assert!(!partial.attributes.contains_key("ssl_policy"));
        assert!(!partial.attributes.contains_key("load_balancing"));

        let applied = stub.block_payloads("services/DemoApp1/servers/web1/ssl-policy");
        assert_eq!(applied.len(), 1);
        assert!(stub.calls_to(Method::Put, "/connection-pooling").is_empty());
        assert!(stub.object("services/DemoApp1/servers/web1").is_some());
    }

    #[tokio::test]
    async fn failure_before_the_object_exists_has_no_partial_state() {
        let stub = Arc::new(StubAppliance::new().fail_on(Method::Post, "services"));
        let provider = provider_with(&stub);

        let err = provider.create_resource(&demo_service("90")).await.unwrap_err();
        assert!(err.partial_state.is_none());
    }

    #[tokio::test]
    async fn write_only_fields_do_not_drift() {
        let stub = Arc::new(StubAppliance::new().write_only("bind-password"));
        let provider = provider_with(&stub);

        let ldap = Resource::new("barracudawaf_ldap_services", "corp")
            .with_attribute("name", text("corp-ldap"))
            .with_attribute("ip_address", text("10.0.3.5"))
            .with_attribute("bind_dn", text("cn=waf,dc=example,dc=com"))
            .with_attribute("bind_password", text("hunter2"))
            .with_attribute("search_base", text("dc=example,dc=com"));
        let created = provider.create_resource(&ldap).await.unwrap();
        let stored = stub.object("ldap-services/corp-ldap").unwrap();
        assert_eq!(stored.get("bind-password"), Some(&json!("hunter2")));
        assert_eq!(created.attributes.get("bind_password"), Some(&text("hunter2")));
        assert!(find_changed_attributes(&ldap.attributes, &created.attributes).is_empty());

        let desired = ldap.clone().with_attribute("port", text("636"));
        let updated = provider
            .update_resource(&created.id, "corp-ldap", &created, &desired)
            .await
            .unwrap();
        assert!(find_changed_attributes(&desired.attributes, &updated.attributes).is_empty());
    }

    #[tokio::test]
    async fn parent_cannot_change_in_place() {
        let stub = Arc::new(
            StubAppliance::new().seed("services/OtherApp", json!({"name": "OtherApp"})),
        );
        let provider = provider_with(&stub);
        with_service(&stub).await;
        let created = provider.create_resource(&web_server()).await.unwrap();
        let before = stub.calls().len();

        let moved = web_server().with_attribute("parent", Value::List(vec![text("OtherApp")]));
        let err = provider
            .update_resource(&created.id, "web1", &created, &moved)
            .await
            .unwrap_err();
        assert!(err.message.contains("Cannot move"));
        assert_eq!(stub.calls().len(), before);
    }

    #[tokio::test]
    async fn update_without_parent_uses_recorded_parent() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        with_service(&stub).await;
        let created = provider.create_resource(&web_server()).await.unwrap();

        let mut desired = web_server().with_attribute("port", text("8080"));
        desired.attributes.remove("parent");
        let updated = provider
            .update_resource(&created.id, "web1", &created, &desired)
            .await
            .unwrap();

        let puts = stub.calls_to(Method::Put, "services/DemoApp1/servers/web1");
        assert_eq!(puts.len(), 1);
        assert_eq!(updated.attributes.get("port"), Some(&text("8080")));
        assert_eq!(updated.attributes.get("parent"), created.attributes.get("parent"));
    }

    #[tokio::test]
    async fn parent_arity_mismatch_makes_no_call() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);

        let orphan =
            Resource::new("barracudawaf_servers", "web").with_attribute("name", text("web1"));
        let err = provider.create_resource(&orphan).await.unwrap_err();
        assert!(err.message.contains("parent"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn child_create_needs_existing_parent() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);

        let err = provider.create_resource(&web_server()).await.unwrap_err();
        assert!(err.message.contains("services/DemoApp1 does not exist"));
    }

    #[tokio::test]
    async fn nested_paths_use_every_parent() {
        let stub = Arc::new(
            StubAppliance::new()
                .seed("services/DemoApp1", json!({"name": "DemoApp1"}))
                .seed(
                    "services/DemoApp1/content-rules/images",
                    json!({"name": "images"}),
                ),
        );
        let provider = provider_with(&stub);

        let server = Resource::new("barracudawaf_content_rule_servers", "img")
            .with_attribute("name", text("img1"))
            .with_attribute(
                "parent",
                Value::List(vec![text("DemoApp1"), text("images")]),
            )
            .with_attribute("ip_address", text("10.0.2.5"));
        let state = provider.create_resource(&server).await.unwrap();

        assert!(state.exists);
        assert_eq!(
            stub.calls()[0].path,
            "services/DemoApp1/content-rules/images/content-rule-servers"
        );
    }

    #[tokio::test]
    async fn certificates_are_created_at_their_create_path() {
        let stub = Arc::new(
            StubAppliance::new()
                .with_create_route("certificates/self-signed-certificate", "certificates"),
        );
        let provider = provider_with(&stub);

        let cert = Resource::new("barracudawaf_self_signed_certificates", "demo")
            .with_attribute("name", text("demo-cert"))
            .with_attribute("common_name", text("demo.example.com"))
            .with_attribute("country_code", text("US"))
            .with_attribute("state", text("CA"))
            .with_attribute("city", text("Campbell"))
            .with_attribute("organization_name", text("Example"));
        let state = provider.create_resource(&cert).await.unwrap();

        assert_eq!(stub.calls()[0].path, "certificates/self-signed-certificate");
        assert_eq!(stub.calls()[1].path, "certificates/demo-cert");
        assert_eq!(state.identifier.as_deref(), Some("demo-cert"));
    }

    #[tokio::test]
    async fn unknown_type_is_rejected() {
        let stub = Arc::new(StubAppliance::new());
        let provider = provider_with(&stub);
        let resource =
            Resource::new("barracudawaf_unknown", "x").with_attribute("name", text("x"));

        let err = provider.create_resource(&resource).await.unwrap_err();
        assert!(err.message.contains("Unknown resource type"));
    }
}
