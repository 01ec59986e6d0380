//! Host driver
//!
//! Refreshes managed resources, builds plans and executes their effects one
//! at a time, recording every outcome in the state file.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use barracudawaf_core::differ::create_plan;
use barracudawaf_core::effect::Effect;
use barracudawaf_core::plan::Plan;
use barracudawaf_core::provider::{Provider, ProviderError, ProviderResult};
use barracudawaf_core::resource::{Resource, ResourceId, State, Value};
use barracudawaf_provider::PROVIDER_NAME;
use barracudawaf_provider::endpoint::PARENT_ATTRIBUTE;
use barracudawaf_state::{ResourceState, StateBackend, StateFile};

use crate::config::DeclaredResource;

/// Re-read every managed resource and update the state file in place
///
/// Resources that no longer exist on the appliance are dropped from the
/// state and returned.
pub async fn refresh(
    provider: &dyn Provider,
    state: &mut StateFile,
) -> Result<Vec<ResourceId>, String> {
    let mut dropped = Vec::new();

    for recorded in state.states() {
        let Some(identifier) = recorded.identifier.clone() else {
            state.remove_resource(&recorded.id.resource_type, &recorded.id.name);
            dropped.push(recorded.id);
            continue;
        };

        debug!("Refreshing {} ({})", recorded.id, identifier);
        let current = provider
            .read(&recorded.id, &identifier, &recorded.attributes)
            .await
            .map_err(|e| format!("Failed to read state: {}", e))?;

        if current.exists {
            state.upsert_resource(ResourceState::from_state(&current, PROVIDER_NAME));
        } else {
            warn!("{} no longer exists on the appliance", recorded.id);
            state.remove_resource(&recorded.id.resource_type, &recorded.id.name);
            dropped.push(recorded.id);
        }
    }

    Ok(dropped)
}

/// Plan the changes that bring the appliance to the declared configuration
///
/// `declared` must already be in dependency order.
pub fn plan(declared: &[DeclaredResource], state: &StateFile) -> Plan {
    let desired: Vec<Resource> = declared.iter().map(|d| d.resource.clone()).collect();
    create_plan(&desired, &state.states())
}

/// Plan the deletion of every managed resource
///
/// Records the configuration no longer declares go first, most recent
/// first, then declared resources in reverse dependency order.
pub fn destroy_plan(declared: &[DeclaredResource], state: &StateFile) -> Plan {
    let declared_ids: HashSet<&ResourceId> = declared.iter().map(|d| &d.resource.id).collect();
    let current: HashMap<ResourceId, State> = state
        .states()
        .into_iter()
        .filter(|s| s.exists)
        .map(|s| (s.id.clone(), s))
        .collect();

    let mut plan = Plan::new();
    for recorded in state.resources.iter().rev() {
        let id = ResourceId::new(&recorded.resource_type, &recorded.name);
        if !declared_ids.contains(&id)
            && let Some(from) = current.get(&id)
        {
            plan.add(Effect::Delete {
                id,
                from: from.clone(),
            });
        }
    }
    for resource in declared.iter().rev() {
        if let Some(from) = current.get(&resource.resource.id) {
            plan.add(Effect::Delete {
                id: resource.resource.id.clone(),
                from: from.clone(),
            });
        }
    }
    plan
}

/// Outcome counts of an executed plan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Execute every effect of the plan in order
///
/// A failed effect does not stop the run. The state file is written after
/// every successful effect, and after a create that left a partial object;
/// `report` sees each outcome as it happens.
pub async fn execute<F>(
    provider: &dyn Provider,
    plan: &Plan,
    state: &mut StateFile,
    backend: &dyn StateBackend,
    mut report: F,
) -> Result<ExecutionSummary, String>
where
    F: FnMut(&Effect, Result<(), &ProviderError>),
{
    let mut summary = ExecutionSummary::default();

    for effect in plan.effects() {
        match apply_effect(provider, effect, state).await {
            Ok(()) => {
                summary.succeeded += 1;
                report(effect, Ok(()));
                state.increment_serial();
                backend
                    .write_state(state)
                    .await
                    .map_err(|e| format!("Failed to write state: {}", e))?;
            }
            Err(e) => {
                summary.failed += 1;
                report(effect, Err(&e));
                // the object exists even though its creation did not finish
                if let Some(partial) = &e.partial_state {
                    warn!("Recording partially created {}", partial.id);
                    state.upsert_resource(ResourceState::from_state(partial, PROVIDER_NAME));
                    state.increment_serial();
                    backend
                        .write_state(state)
                        .await
                        .map_err(|e| format!("Failed to write state: {}", e))?;
                }
            }
        }
    }

    Ok(summary)
}

async fn apply_effect(
    provider: &dyn Provider,
    effect: &Effect,
    state: &mut StateFile,
) -> ProviderResult<()> {
    match effect {
        Effect::Create(resource) => {
            info!("Creating {}", resource.id);
            let created = provider.create(resource).await?;
            state.upsert_resource(ResourceState::from_state(&created, PROVIDER_NAME));
        }
        Effect::Update { id, from, to } => {
            info!("Updating {}", id);
            let identifier = recorded_identifier(id, from)?;
            let updated = provider.update(id, identifier, from, to).await?;
            state.upsert_resource(ResourceState::from_state(&updated, PROVIDER_NAME));
        }
        Effect::Delete { id, from } => {
            info!("Deleting {}", id);
            let identifier = recorded_identifier(id, from)?;
            provider.delete(id, identifier, from).await?;
            state.remove_resource(&id.resource_type, &id.name);
        }
    }
    Ok(())
}

fn recorded_identifier<'a>(id: &ResourceId, from: &'a State) -> ProviderResult<&'a str> {
    from.identifier.as_deref().ok_or_else(|| {
        ProviderError::new("No identifier recorded for this resource").for_resource(id.clone())
    })
}

/// Read an existing appliance object into the state file
///
/// `parents` names the enclosing objects of a nested type, outermost first.
pub async fn import(
    provider: &dyn Provider,
    state: &mut StateFile,
    id: ResourceId,
    identifier: &str,
    parents: &[String],
) -> Result<State, String> {
    if state.find_resource(&id.resource_type, &id.name).is_some() {
        return Err(format!("{} is already managed", id));
    }

    let mut known = HashMap::new();
    known.insert("name".to_string(), Value::String(identifier.to_string()));
    if !parents.is_empty() {
        known.insert(
            PARENT_ATTRIBUTE.to_string(),
            Value::List(parents.iter().cloned().map(Value::String).collect()),
        );
    }

    let current = provider
        .read(&id, identifier, &known)
        .await
        .map_err(|e| format!("Failed to read state: {}", e))?;
    if !current.exists {
        return Err(format!(
            "{} '{}' does not exist on the appliance",
            id.resource_type, identifier
        ));
    }

    state.upsert_resource(ResourceState::from_state(&current, PROVIDER_NAME));
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use barracudawaf_core::provider::{BoxFuture, ResourceType};
    use barracudawaf_state::LocalBackend;
    use tempfile::TempDir;

    use crate::config::parse_reference;

    type Key = (String, String);

    /// Provider keeping objects in memory, keyed by type and name
    #[derive(Default)]
    struct MemoryProvider {
        objects: Mutex<HashMap<Key, HashMap<String, Value>>>,
        failing: Mutex<HashSet<String>>,
        /// Names whose create stops after the object itself exists
        interrupted: Mutex<HashSet<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl MemoryProvider {
        fn fail_for(&self, name: &str) {
            self.failing.lock().unwrap().insert(name.to_string());
        }

        fn interrupt_create(&self, name: &str) {
            self.interrupted.lock().unwrap().insert(name.to_string());
        }

        fn insert(&self, resource_type: &str, name: &str, attrs: HashMap<String, Value>) {
            self.objects
                .lock()
                .unwrap()
                .insert((resource_type.to_string(), name.to_string()), attrs);
        }

        fn remove(&self, resource_type: &str, name: &str) {
            self.objects
                .lock()
                .unwrap()
                .remove(&(resource_type.to_string(), name.to_string()));
        }

        fn get(&self, resource_type: &str, name: &str) -> Option<HashMap<String, Value>> {
            self.objects
                .lock()
                .unwrap()
                .get(&(resource_type.to_string(), name.to_string()))
                .cloned()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn check(&self, id: &ResourceId, name: &str) -> ProviderResult<()> {
            if self.failing.lock().unwrap().contains(name) {
                return Err(ProviderError::new("injected failure").for_resource(id.clone()));
            }
            Ok(())
        }

        fn current(&self, id: &ResourceId, name: &str) -> State {
            match self.get(&id.resource_type, name) {
                Some(attrs) => State::existing(id.clone(), attrs).with_identifier(name),
                None => State::not_found(id.clone()),
            }
        }
    }

    fn object_name(resource: &Resource) -> String {
        resource.get_str("name").unwrap_or(&resource.id.name).to_string()
    }

    impl Provider for MemoryProvider {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
            Vec::new()
        }

        fn read<'a>(
            &'a self,
            id: &'a ResourceId,
            identifier: &'a str,
            _known: &'a HashMap<String, Value>,
        ) -> BoxFuture<'a, ProviderResult<State>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(format!("read {}", id));
                Ok(self.current(id, identifier))
            })
        }

        fn create<'a>(&'a self, resource: &'a Resource) -> BoxFuture<'a, ProviderResult<State>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(format!("create {}", resource.id));
                let name = object_name(resource);
                self.check(&resource.id, &name)?;
                if self.interrupted.lock().unwrap().remove(&name) {
                    let mut attrs = resource.attributes.clone();
                    attrs.remove("ssl_policy");
                    self.insert(&resource.id.resource_type, &name, attrs);
                    return Err(ProviderError::new("ssl_policy element 0 failed")
                        .for_resource(resource.id.clone())
                        .with_partial_state(self.current(&resource.id, &name)));
                }
                self.insert(&resource.id.resource_type, &name, resource.attributes.clone());
                Ok(self.current(&resource.id, &name))
            })
        }

        fn update<'a>(
            &'a self,
            id: &'a ResourceId,
            identifier: &'a str,
            _from: &'a State,
            to: &'a Resource,
        ) -> BoxFuture<'a, ProviderResult<State>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(format!("update {}", id));
                self.check(id, identifier)?;
                self.remove(&id.resource_type, identifier);
                let name = object_name(to);
                self.insert(&id.resource_type, &name, to.attributes.clone());
                Ok(self.current(id, &name))
            })
        }

        fn delete<'a>(
            &'a self,
            id: &'a ResourceId,
            identifier: &'a str,
            _from: &'a State,
        ) -> BoxFuture<'a, ProviderResult<()>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(format!("delete {}", id));
                self.check(id, identifier)?;
                self.remove(&id.resource_type, identifier);
                Ok(())
            })
        }
    }

    fn service(binding: &str, name: &str, port: &str) -> DeclaredResource {
        DeclaredResource {
            resource: Resource::new("barracudawaf_services", binding)
                .with_attribute("name", Value::String(name.to_string()))
                .with_attribute("port", Value::String(port.to_string())),
            depends_on: Vec::new(),
        }
    }

    fn server(binding: &str, name: &str, parent: &str, depends_on: &str) -> DeclaredResource {
        DeclaredResource {
            resource: Resource::new("barracudawaf_servers", binding)
                .with_attribute("name", Value::String(name.to_string()))
                .with_attribute(
                    PARENT_ATTRIBUTE,
                    Value::List(vec![Value::String(parent.to_string())]),
                ),
            depends_on: vec![parse_reference(depends_on).unwrap()],
        }
    }

    fn backend() -> (TempDir, LocalBackend) {
        let dir = TempDir::new().unwrap();
        let backend = LocalBackend::with_path(dir.path().join("barracudawaf.state.json"));
        (dir, backend)
    }

    async fn run(
        provider: &MemoryProvider,
        plan: &Plan,
        state: &mut StateFile,
        backend: &LocalBackend,
    ) -> ExecutionSummary {
        execute(provider, plan, state, backend, |_, _| {})
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn apply_creates_and_records_resources() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();
        let declared = vec![
            service("demo", "DemoApp1", "90"),
            server("web", "web1", "DemoApp1", "barracudawaf_services.demo"),
        ];

        let plan = plan(&declared, &state);
        assert_eq!(plan.summary().create, 2);

        let summary = run(&provider, &plan, &mut state, &backend).await;
        assert_eq!(summary, ExecutionSummary { succeeded: 2, failed: 0 });

        let recorded = state.find_resource("barracudawaf_services", "demo").unwrap();
        assert_eq!(recorded.identifier.as_deref(), Some("DemoApp1"));
        assert_eq!(recorded.provider, "barracudawaf");

        let persisted = backend.read_state().await.unwrap().unwrap();
        assert_eq!(persisted.resources.len(), 2);
        assert_eq!(persisted.serial, 2);
    }

    #[tokio::test]
    async fn interrupted_create_is_recorded_and_finished_by_update() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();
        let mut demo = service("demo", "DemoApp1", "90");
        demo.resource = demo.resource.with_attribute(
            "ssl_policy",
            Value::List(vec![Value::Map(HashMap::from([(
                "enable_tls_1_2".to_string(),
                Value::String("Yes".to_string()),
            )]))]),
        );
        let declared = vec![demo];
        provider.interrupt_create("DemoApp1");

        let first = plan(&declared, &state);
        let summary = run(&provider, &first, &mut state, &backend).await;
        assert_eq!(summary, ExecutionSummary { succeeded: 0, failed: 1 });

        let persisted = backend.read_state().await.unwrap().unwrap();
        let recorded = persisted.find_resource("barracudawaf_services", "demo").unwrap();
        assert_eq!(recorded.identifier.as_deref(), Some("DemoApp1"));

        refresh(&provider, &mut state).await.unwrap();
        let second = plan(&declared, &state);
        assert_eq!(second.summary().create, 0);
        assert_eq!(second.summary().update, 1);

        let summary = run(&provider, &second, &mut state, &backend).await;
        assert_eq!(summary, ExecutionSummary { succeeded: 1, failed: 0 });
        assert!(plan(&declared, &state).is_empty());
        let upstream = provider.get("barracudawaf_services", "DemoApp1").unwrap();
        assert!(upstream.contains_key("ssl_policy"));
    }

    #[tokio::test]
    async fn unchanged_configuration_plans_nothing() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();
        let declared = vec![service("demo", "DemoApp1", "90")];

        let first = plan(&declared, &state);
        run(&provider, &first, &mut state, &backend).await;

        refresh(&provider, &mut state).await.unwrap();
        assert!(plan(&declared, &state).is_empty());
    }

    #[tokio::test]
    async fn changed_attribute_updates_in_place() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();

        let first = plan(&[service("demo", "DemoApp1", "90")], &state);
        run(&provider, &first, &mut state, &backend).await;

        let second = plan(&[service("demo", "DemoApp1", "80")], &state);
        assert_eq!(second.summary().update, 1);
        run(&provider, &second, &mut state, &backend).await;

        let object = provider.get("barracudawaf_services", "DemoApp1").unwrap();
        assert_eq!(object.get("port"), Some(&Value::String("80".to_string())));
        assert!(provider.calls().contains(&"update barracudawaf_services.demo".to_string()));
    }

    #[tokio::test]
    async fn undeclared_resource_is_deleted() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();

        let first = plan(
            &[
                service("demo", "DemoApp1", "90"),
                service("other", "Other", "91"),
            ],
            &state,
        );
        run(&provider, &first, &mut state, &backend).await;

        let second = plan(&[service("demo", "DemoApp1", "90")], &state);
        assert_eq!(second.summary().delete, 1);
        run(&provider, &second, &mut state, &backend).await;

        assert!(provider.get("barracudawaf_services", "Other").is_none());
        assert!(state.find_resource("barracudawaf_services", "other").is_none());
        assert!(state.find_resource("barracudawaf_services", "demo").is_some());
    }

    #[tokio::test]
    async fn refresh_drops_resources_deleted_upstream() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();
        let declared = vec![service("demo", "DemoApp1", "90")];

        let first = plan(&declared, &state);
        run(&provider, &first, &mut state, &backend).await;
        provider.remove("barracudawaf_services", "DemoApp1");

        let dropped = refresh(&provider, &mut state).await.unwrap();
        assert_eq!(
            dropped,
            vec![ResourceId::new("barracudawaf_services", "demo")]
        );
        assert!(state.resources.is_empty());

        // the host schedules recreation
        assert_eq!(plan(&declared, &state).summary().create, 1);
    }

    #[tokio::test]
    async fn failed_effect_does_not_stop_the_run() {
        let provider = MemoryProvider::default();
        provider.fail_for("Broken");
        let (_dir, backend) = backend();
        let mut state = StateFile::new();

        let plan = plan(
            &[
                service("broken", "Broken", "90"),
                service("demo", "DemoApp1", "91"),
            ],
            &state,
        );

        let mut failures = Vec::new();
        let summary = execute(&provider, &plan, &mut state, &backend, |effect, result| {
            if let Err(e) = result {
                failures.push((effect.resource_id().clone(), e.to_string()));
            }
        })
        .await
        .unwrap();

        assert_eq!(summary, ExecutionSummary { succeeded: 1, failed: 1 });
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.name, "broken");
        assert!(failures[0].1.contains("injected failure"));
        assert!(state.find_resource("barracudawaf_services", "broken").is_none());
        assert!(state.find_resource("barracudawaf_services", "demo").is_some());
    }

    #[tokio::test]
    async fn destroy_removes_children_first() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();
        let declared = vec![
            service("demo", "DemoApp1", "90"),
            server("web", "web1", "DemoApp1", "barracudawaf_services.demo"),
        ];

        let create = plan(&declared, &state);
        run(&provider, &create, &mut state, &backend).await;

        let destroy = destroy_plan(&declared, &state);
        let order: Vec<String> = destroy
            .effects()
            .iter()
            .map(|e| e.resource_id().to_string())
            .collect();
        assert_eq!(
            order,
            vec!["barracudawaf_servers.web", "barracudawaf_services.demo"]
        );

        run(&provider, &destroy, &mut state, &backend).await;
        assert!(state.resources.is_empty());
        assert!(provider.get("barracudawaf_services", "DemoApp1").is_none());
    }

    #[tokio::test]
    async fn destroy_includes_undeclared_records() {
        let provider = MemoryProvider::default();
        let (_dir, backend) = backend();
        let mut state = StateFile::new();

        let create = plan(&[service("old", "Old", "90")], &state);
        run(&provider, &create, &mut state, &backend).await;

        let destroy = destroy_plan(&[], &state);
        assert_eq!(destroy.summary().delete, 1);
    }

    #[tokio::test]
    async fn import_records_existing_object() {
        let provider = MemoryProvider::default();
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("web1".to_string()));
        provider.insert("barracudawaf_servers", "web1", attrs);

        let mut state = StateFile::new();
        let id = ResourceId::new("barracudawaf_servers", "web");
        let parents = vec!["DemoApp1".to_string()];
        let imported = import(&provider, &mut state, id.clone(), "web1", &parents)
            .await
            .unwrap();
        assert!(imported.exists);

        let recorded = state.find_resource("barracudawaf_servers", "web").unwrap();
        assert_eq!(recorded.identifier.as_deref(), Some("web1"));

        let again = import(&provider, &mut state, id, "web1", &[]).await;
        assert!(again.unwrap_err().contains("already managed"));
    }

    #[tokio::test]
    async fn import_of_missing_object_fails() {
        let provider = MemoryProvider::default();
        let mut state = StateFile::new();
        let err = import(
            &provider,
            &mut state,
            ResourceId::new("barracudawaf_services", "demo"),
            "Nope",
            &[],
        )
        .await
        .unwrap_err();
        assert!(err.contains("does not exist"));
        assert!(state.resources.is_empty());
    }
}
