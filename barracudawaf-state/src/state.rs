//! State file structures for persisting managed resources

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use barracudawaf_core::resource::{ResourceId, State, Value};

/// The state file persisted by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// State file format version
    pub version: u32,
    /// Monotonically increasing number for each state modification
    pub serial: u64,
    /// Unique identifier for this state lineage
    pub lineage: String,
    /// Version of the tool that last wrote this state
    pub tool_version: String,
    /// Managed resources, in the order they were first recorded
    pub resources: Vec<ResourceState>,
}

impl StateFile {
    /// Current state file format version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            serial: 0,
            lineage: uuid::Uuid::new_v4().to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            resources: Vec::new(),
        }
    }

    /// Increment serial and stamp the tool version before a write
    pub fn increment_serial(&mut self) {
        self.serial += 1;
        self.tool_version = env!("CARGO_PKG_VERSION").to_string();
    }

    /// Find a resource by type and binding name
    pub fn find_resource(&self, resource_type: &str, name: &str) -> Option<&ResourceState> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type && r.name == name)
    }

    /// Add or replace a resource, keeping its original position
    pub fn upsert_resource(&mut self, resource: ResourceState) {
        match self
            .resources
            .iter_mut()
            .find(|r| r.resource_type == resource.resource_type && r.name == resource.name)
        {
            Some(existing) => *existing = resource,
            None => self.resources.push(resource),
        }
    }

    /// Remove a resource from the state
    pub fn remove_resource(&mut self, resource_type: &str, name: &str) -> Option<ResourceState> {
        let pos = self
            .resources
            .iter()
            .position(|r| r.resource_type == resource_type && r.name == name)?;
        Some(self.resources.remove(pos))
    }

    /// All managed resources as provider states, in recorded order
    pub fn states(&self) -> Vec<State> {
        self.resources.iter().map(ResourceState::to_state).collect()
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a single managed resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    /// Resource type (e.g., "barracudawaf_services")
    pub resource_type: String,
    /// Binding name from the configuration file
    pub name: String,
    /// Provider name (e.g., "barracudawaf")
    pub provider: String,
    /// Appliance-side identifier
    #[serde(default)]
    pub identifier: Option<String>,
    /// All attributes of the resource as JSON values
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ResourceState {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            provider: provider.into(),
            identifier: None,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Record a provider state
    pub fn from_state(state: &State, provider: &str) -> Self {
        Self {
            resource_type: state.id.resource_type.clone(),
            name: state.id.name.clone(),
            provider: provider.to_string(),
            identifier: state.identifier.clone(),
            attributes: state
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        }
    }

    /// Convert back to a provider state
    ///
    /// A record without identifier is reported as not existing.
    pub fn to_state(&self) -> State {
        let id = ResourceId::new(&self.resource_type, &self.name);
        let Some(identifier) = &self.identifier else {
            return State::not_found(id);
        };
        let attributes = self
            .attributes
            .iter()
            .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
            .collect();
        State::existing(id, attributes).with_identifier(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_file_new() {
        let state = StateFile::new();
        assert_eq!(state.version, StateFile::CURRENT_VERSION);
        assert_eq!(state.serial, 0);
        assert!(!state.lineage.is_empty());
        assert!(state.resources.is_empty());
    }

    #[test]
    fn test_state_file_upsert_keeps_position() {
        let mut state = StateFile::new();
        state.upsert_resource(ResourceState::new("barracudawaf_services", "a", "barracudawaf"));
        state.upsert_resource(ResourceState::new("barracudawaf_servers", "b", "barracudawaf"));

        let updated = ResourceState::new("barracudawaf_services", "a", "barracudawaf")
            .with_attribute("port", serde_json::json!("80"));
        state.upsert_resource(updated);

        assert_eq!(state.resources.len(), 2);
        assert_eq!(state.resources[0].name, "a");
        assert_eq!(
            state.resources[0].attributes.get("port"),
            Some(&serde_json::json!("80"))
        );
    }

    #[test]
    fn test_state_file_remove_resource() {
        let mut state = StateFile::new();
        state.upsert_resource(ResourceState::new("barracudawaf_services", "a", "barracudawaf"));

        assert!(state.remove_resource("barracudawaf_services", "a").is_some());
        assert!(state.resources.is_empty());
        assert!(state.remove_resource("barracudawaf_services", "a").is_none());
    }

    #[test]
    fn test_resource_state_conversion() {
        let resource = ResourceState::new("barracudawaf_servers", "web", "barracudawaf")
            .with_identifier("web1")
            .with_attribute("name", serde_json::json!("web1"))
            .with_attribute("parent", serde_json::json!(["DemoApp1"]));

        let state = resource.to_state();
        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("web1"));
        assert_eq!(
            state.attributes.get("parent"),
            Some(&Value::List(vec![Value::String("DemoApp1".to_string())]))
        );

        let back = ResourceState::from_state(&state, "barracudawaf");
        assert_eq!(back.attributes, resource.attributes);
    }

    #[test]
    fn test_record_without_identifier_is_not_found() {
        let resource = ResourceState::new("barracudawaf_services", "a", "barracudawaf");
        assert!(!resource.to_state().exists);
    }

    #[test]
    fn test_state_file_serialization() {
        let mut state = StateFile::new();
        state.upsert_resource(
            ResourceState::new("barracudawaf_services", "a", "barracudawaf").with_identifier("A"),
        );

        let json = serde_json::to_string_pretty(&state).unwrap();
        let deserialized: StateFile = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.lineage, state.lineage);
        assert_eq!(deserialized.resources[0].identifier.as_deref(), Some("A"));
        assert_eq!(deserialized.states().len(), 1);
    }
}
