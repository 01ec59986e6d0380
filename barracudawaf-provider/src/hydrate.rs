//! Payload building
//!
//! Attribute values are flattened into the kebab-case JSON map the appliance
//! expects, and read responses are mapped back into attributes.

use std::collections::HashMap;

use barracudawaf_core::resource::Value;
use serde_json::Map;

use crate::client::Method;
use crate::resources::{FieldKind, FieldSpec};

/// Build the JSON payload for one call
///
/// Only declared fields are sent, under their JSON key. Scalars become
/// strings and lists become arrays of strings. Empty values are left out,
/// and on `PUT` so are the update-exempt fields.
pub fn hydrate(
    fields: &[FieldSpec],
    attributes: &HashMap<String, Value>,
    method: Method,
) -> Map<String, serde_json::Value> {
    let mut payload = Map::new();

    for field in fields {
        if method == Method::Put && field.update_exempt {
            continue;
        }
        let Some(value) = attributes.get(field.name) else {
            continue;
        };
        if let Some(json) = wire_value(field, value) {
            payload.insert(field.key.to_string(), json);
        }
    }

    payload
}

fn wire_value(field: &FieldSpec, value: &Value) -> Option<serde_json::Value> {
    match (field.kind, value) {
        (FieldKind::List, Value::List(items)) => {
            let items: Vec<serde_json::Value> = items
                .iter()
                .filter_map(Value::to_scalar_string)
                .filter(|s| !s.is_empty())
                .map(serde_json::Value::String)
                .collect();
            (!items.is_empty()).then_some(serde_json::Value::Array(items))
        }
        // a lone scalar for a list field is sent as a one-element array
        (FieldKind::List, scalar) => scalar
            .to_scalar_string()
            .filter(|s| !s.is_empty())
            .map(|s| serde_json::Value::Array(vec![serde_json::Value::String(s)])),
        (FieldKind::Text, scalar) => scalar
            .to_scalar_string()
            .filter(|s| !s.is_empty())
            .map(serde_json::Value::String),
    }
}

/// Map one entry of a read response back into attributes
///
/// Values the appliance reports as numbers or booleans are kept as strings,
/// matching what is sent. Empty and null values are skipped.
pub fn attributes_from_entry(
    fields: &[FieldSpec],
    entry: &Map<String, serde_json::Value>,
) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();

    for field in fields {
        let Some(json) = entry.get(field.key) else {
            continue;
        };
        let value = match field.kind {
            FieldKind::Text => json_scalar(json).map(Value::String),
            FieldKind::List => match json {
                serde_json::Value::Array(items) => {
                    let items: Vec<Value> = items
                        .iter()
                        .filter_map(json_scalar)
                        .map(Value::String)
                        .collect();
                    (!items.is_empty()).then_some(Value::List(items))
                }
                other => json_scalar(other).map(|s| Value::List(vec![Value::String(s)])),
            },
        };
        if let Some(value) = value {
            attributes.insert(field.name.to_string(), value);
        }
    }

    attributes
}

fn json_scalar(json: &serde_json::Value) -> Option<String> {
    let s = match json {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("name", "name", "Name").required(),
        FieldSpec::text("address_version", "address-version", "IP version").update_exempt(),
        FieldSpec::text("port", "port", "Port"),
        FieldSpec::text("comments", "comments", "Comments"),
        FieldSpec::list("allowed_methods", "allowed-methods", "Methods"),
    ];

    fn attrs(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn post_payload_uses_json_keys_and_strings() {
        let payload = hydrate(
            FIELDS,
            &attrs(&[
                ("name", text("DemoApp1")),
                ("address_version", text("IPv4")),
                ("port", Value::Int(90)),
                (
                    "allowed_methods",
                    Value::List(vec![text("GET"), text("POST")]),
                ),
            ]),
            Method::Post,
        );

        assert_eq!(
            serde_json::Value::Object(payload),
            json!({
                "name": "DemoApp1",
                "address-version": "IPv4",
                "port": "90",
                "allowed-methods": ["GET", "POST"],
            })
        );
    }

    #[test]
    fn put_payload_drops_update_exempt_fields() {
        let payload = hydrate(
            FIELDS,
            &attrs(&[("name", text("DemoApp1")), ("address_version", text("IPv6"))]),
            Method::Put,
        );
        assert!(!payload.contains_key("address-version"));
        assert_eq!(payload.get("name"), Some(&json!("DemoApp1")));
    }

    #[test]
    fn empty_values_never_appear() {
        let payload = hydrate(
            FIELDS,
            &attrs(&[
                ("name", text("DemoApp1")),
                ("comments", text("")),
                ("allowed_methods", Value::List(vec![text("")])),
            ]),
            Method::Post,
        );
        assert_eq!(payload.len(), 1);
        assert!(!payload.contains_key("comments"));
        assert!(!payload.contains_key("allowed-methods"));
    }

    #[test]
    fn undeclared_attributes_are_not_sent() {
        let payload = hydrate(
            FIELDS,
            &attrs(&[("name", text("a")), ("parent", Value::List(vec![text("p")]))]),
            Method::Post,
        );
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn scalar_for_list_field_becomes_array() {
        let payload = hydrate(
            FIELDS,
            &attrs(&[("allowed_methods", text("GET"))]),
            Method::Post,
        );
        assert_eq!(payload.get("allowed-methods"), Some(&json!(["GET"])));
    }

    #[test]
    fn read_back_keeps_strings() {
        let entry = json!({
            "name": "DemoApp1",
            "port": 90,
            "comments": "",
            "allowed-methods": ["GET"],
            "unknown-key": "ignored",
        });
        let serde_json::Value::Object(entry) = entry else {
            panic!("Expected object");
        };

        let attributes = attributes_from_entry(FIELDS, &entry);
        assert_eq!(attributes.get("name"), Some(&text("DemoApp1")));
        assert_eq!(attributes.get("port"), Some(&text("90")));
        assert_eq!(
            attributes.get("allowed_methods"),
            Some(&Value::List(vec![text("GET")]))
        );
        assert!(!attributes.contains_key("comments"));
        assert_eq!(attributes.len(), 3);
    }
}
