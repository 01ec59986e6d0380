//! REST path templates
//!
//! A path is a list of literal segments with parent slots in between, e.g.
//! `services/{}/content-rules/{}/content-rule-servers`. Parent slots are
//! filled, in order, from the resource's `parent` list.

use std::collections::HashMap;

use barracudawaf_core::resource::Value;

/// Attribute carrying the names of the enclosing objects, outermost first
pub const PARENT_ATTRIBUTE: &str = "parent";

/// One segment of a path template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Lit(&'static str),
    Parent,
}

/// Errors raised while resolving a path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("expected {expected} parent name(s) in 'parent', got {got}")]
    ParentArity { expected: usize, got: usize },

    #[error("parent name at position {index} is empty")]
    EmptyParent { index: usize },

    #[error("object name is empty")]
    EmptyName,
}

/// Location of a resource collection on the appliance
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    segments: &'static [Segment],
    create_suffix: Option<&'static str>,
}

impl Endpoint {
    pub const fn new(segments: &'static [Segment]) -> Self {
        Self {
            segments,
            create_suffix: None,
        }
    }

    /// Objects are created by posting to `{collection}/{suffix}` instead of the collection
    pub const fn create_at(self, suffix: &'static str) -> Self {
        Self {
            create_suffix: Some(suffix),
            ..self
        }
    }

    /// Number of parent names the template needs
    pub fn parent_slots(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Parent))
            .count()
    }

    /// The template with `{}` in place of parent slots
    pub fn template(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Lit(lit) => *lit,
                Segment::Parent => "{}",
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Path of the collection, with parent slots filled in
    pub fn collection_path(&self, parents: &[String]) -> Result<String, EndpointError> {
        let expected = self.parent_slots();
        if parents.len() != expected {
            return Err(EndpointError::ParentArity {
                expected,
                got: parents.len(),
            });
        }

        let mut parents = parents.iter().enumerate();
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            match segment {
                Segment::Lit(lit) => parts.push(lit.to_string()),
                Segment::Parent => {
                    // arity was checked above
                    if let Some((index, name)) = parents.next() {
                        if name.is_empty() {
                            return Err(EndpointError::EmptyParent { index });
                        }
                        parts.push(name.clone());
                    }
                }
            }
        }
        Ok(parts.join("/"))
    }

    /// Path objects are created at
    pub fn create_path(&self, parents: &[String]) -> Result<String, EndpointError> {
        let collection = self.collection_path(parents)?;
        Ok(match self.create_suffix {
            Some(suffix) => format!("{}/{}", collection, suffix),
            None => collection,
        })
    }

    /// Path of one object
    pub fn object_path(&self, parents: &[String], name: &str) -> Result<String, EndpointError> {
        if name.is_empty() {
            return Err(EndpointError::EmptyName);
        }
        Ok(format!("{}/{}", self.collection_path(parents)?, name))
    }
}

/// Parent names from a resource's attributes; missing means none
pub fn parent_names(attributes: &HashMap<String, Value>) -> Vec<String> {
    attributes
        .get(PARENT_ATTRIBUTE)
        .and_then(Value::as_list)
        .map(|items| items.iter().filter_map(Value::to_scalar_string).collect())
        .unwrap_or_default()
}
