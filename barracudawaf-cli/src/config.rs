//! Configuration file
//!
//! A JSON document with a `provider` block and a list of resources:
//!
//! ```json
//! {
//!   "provider": { "address": "10.0.0.5", "port": "8443", "username": "admin" },
//!   "resources": [
//!     { "type": "barracudawaf_services", "name": "demo",
//!       "attributes": { "name": "DemoApp1", "ip_address": "10.0.0.10", "port": "80" } },
//!     { "type": "barracudawaf_servers", "name": "backend",
//!       "attributes": { "name": "web1", "parent": ["DemoApp1"] },
//!       "depends_on": ["barracudawaf_services.demo"] }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use barracudawaf_core::resource::{Resource, ResourceId, Value};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "barracudawaf.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    provider: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResource {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// A resource declared in the configuration file
#[derive(Debug, Clone)]
pub struct DeclaredResource {
    pub resource: Resource,
    /// Resources (`type.name`) that must exist first
    pub depends_on: Vec<ResourceId>,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    pub provider: HashMap<String, Value>,
    pub resources: Vec<DeclaredResource>,
}

pub fn load(path: &Path) -> Result<ParsedConfig, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Load the configuration file if present; a missing file yields an empty configuration
pub fn load_or_default(path: &Path) -> Result<ParsedConfig, String> {
    if path.exists() {
        load(path)
    } else {
        Ok(ParsedConfig::default())
    }
}

pub fn parse(content: &str) -> Result<ParsedConfig, String> {
    let raw: RawConfig =
        serde_json::from_str(content).map_err(|e| format!("Parse error: {}", e))?;

    let provider = json_attributes(&raw.provider);

    let mut seen = HashSet::new();
    let mut resources = Vec::with_capacity(raw.resources.len());
    for entry in raw.resources {
        let id = ResourceId::new(&entry.resource_type, &entry.name);
        if !seen.insert(id.clone()) {
            return Err(format!("Resource {} is declared more than once", id));
        }

        let depends_on = entry
            .depends_on
            .iter()
            .map(|dep| parse_reference(dep).map_err(|e| format!("{}: {}", id, e)))
            .collect::<Result<Vec<_>, _>>()?;

        resources.push(DeclaredResource {
            resource: Resource {
                id,
                attributes: json_attributes(&entry.attributes),
            },
            depends_on,
        });
    }

    Ok(ParsedConfig {
        provider,
        resources,
    })
}

fn json_attributes(map: &serde_json::Map<String, serde_json::Value>) -> HashMap<String, Value> {
    map.iter()
        .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Parse a `type.name` reference
pub fn parse_reference(reference: &str) -> Result<ResourceId, String> {
    match reference.split_once('.') {
        Some((resource_type, name)) if !resource_type.is_empty() && !name.is_empty() => {
            Ok(ResourceId::new(resource_type, name))
        }
        _ => Err(format!(
            "Invalid reference '{}', expected <type>.<name>",
            reference
        )),
    }
}

/// Order resources so that every resource comes after the ones it depends on
///
/// Declaration order is kept where dependencies allow it. Unknown
/// dependencies and cycles are errors.
pub fn sort_by_dependencies(
    resources: &[DeclaredResource],
) -> Result<Vec<DeclaredResource>, String> {
    let by_id: HashMap<&ResourceId, &DeclaredResource> =
        resources.iter().map(|r| (&r.resource.id, r)).collect();

    for declared in resources {
        for dep in &declared.depends_on {
            if !by_id.contains_key(dep) {
                return Err(format!(
                    "{} depends on {}, which is not declared",
                    declared.resource.id, dep
                ));
            }
        }
    }

    fn visit<'a>(
        declared: &'a DeclaredResource,
        by_id: &HashMap<&ResourceId, &'a DeclaredResource>,
        visited: &mut HashSet<&'a ResourceId>,
        visiting: &mut Vec<&'a ResourceId>,
        sorted: &mut Vec<DeclaredResource>,
    ) -> Result<(), String> {
        let id = &declared.resource.id;
        if visited.contains(id) {
            return Ok(());
        }
        if let Some(pos) = visiting.iter().position(|v| *v == id) {
            let cycle: Vec<String> = visiting[pos..]
                .iter()
                .chain(std::iter::once(&id))
                .map(ToString::to_string)
                .collect();
            return Err(format!("Dependency cycle: {}", cycle.join(" -> ")));
        }

        visiting.push(id);
        for dep in &declared.depends_on {
            if let Some(&dep_resource) = by_id.get(dep) {
                visit(dep_resource, by_id, visited, visiting, sorted)?;
            }
        }
        visiting.pop();

        visited.insert(id);
        sorted.push(declared.clone());
        Ok(())
    }

    let mut sorted = Vec::with_capacity(resources.len());
    let mut visited = HashSet::new();
    let mut visiting = Vec::new();
    for declared in resources {
        visit(declared, &by_id, &mut visited, &mut visiting, &mut sorted)?;
    }

    Ok(sorted)
}
