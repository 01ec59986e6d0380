//! Schema - Attribute types the host checks before calling the appliance
//!
//! The provider declares a schema for its configuration block and for each
//! resource type, enabling validation before any API call is made.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String (the appliance treats every scalar as a string, so integers
    /// and booleans are accepted and rendered as text)
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
    /// List of nested blocks, each with a fixed set of attributes
    Block(Vec<AttributeSchema>),
}

impl AttributeType {
    /// Scalars are accepted wherever a String is expected
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_) | Value::Int(_) | Value::Bool(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::AtIndex {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::AtKey {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Block(attributes), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    validate_block_item(attributes, item).map_err(|e| {
                        TypeError::AtIndex {
                            index: i,
                            inner: Box::new(e),
                        }
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Block(_) => "Block".to_string(),
        }
    }
}

fn validate_block_item(attributes: &[AttributeSchema], item: &Value) -> Result<(), TypeError> {
    let Value::Map(fields) = item else {
        return Err(TypeError::TypeMismatch {
            expected: "Map".to_string(),
            got: item.type_name(),
        });
    };

    for (key, value) in fields {
        match attributes.iter().find(|a| &a.name == key) {
            Some(schema) => schema
                .attr_type
                .validate(value)
                .map_err(|e| TypeError::AtKey {
                    key: key.clone(),
                    inner: Box::new(e),
                })?,
            None => return Err(TypeError::UnknownAttribute { name: key.clone() }),
        }
    }

    Ok(())
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Why a value does not fit its schema
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("expected {expected}, found {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Attribute '{name}' is required")]
    MissingRequired { name: String },

    #[error("No attribute named '{name}'")]
    UnknownAttribute { name: String },

    #[error("item {index}: {inner}")]
    AtIndex { index: usize, inner: Box<TypeError> },

    #[error("{key}: {inner}")]
    AtKey { key: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Value is masked in plan output
    pub sensitive: bool,
    pub description: Option<String>,
    /// Appliance-side property name (kebab-case JSON key)
    pub provider_name: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            sensitive: false,
            description: None,
            provider_name: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Whether the named attribute is sensitive
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.attributes.get(name).is_some_and(|a| a.sensitive)
    }

    /// Every problem found, not just the first
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // an empty string or list counts as unset
        let mut names: Vec<&String> = self.attributes.keys().collect();
        names.sort();
        for name in names {
            let schema = &self.attributes[name];
            let present = match attributes.get(name) {
                Some(Value::String(s)) => !s.is_empty(),
                Some(Value::List(items)) => !items.is_empty(),
                Some(_) => true,
                None => false,
            };
            if schema.required && !present {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        let mut keys: Vec<&String> = attributes.keys().collect();
        keys.sort();
        for name in keys {
            match self.attributes.get(name) {
                Some(schema) => {
                    if let Err(e) = schema.attr_type.validate(&attributes[name]) {
                        errors.push(TypeError::AtKey {
                            key: name.clone(),
                            inner: Box::new(e),
                        });
                    }
                }
                None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
