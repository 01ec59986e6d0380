//! Effect - A side effect expressed as a value
//!
//! Effects describe what the host will ask the provider to do. Nothing
//! happens until an Effect is executed.

use crate::resource::{Resource, ResourceId, State};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create a resource, then read it back
    Create(Resource),
    /// Update a resource in place, then read it back
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
    },
    /// Delete a resource that is no longer declared
    Delete { id: ResourceId, from: State },
}

impl Effect {
    /// The resource this Effect concerns
    pub fn resource_id(&self) -> &ResourceId {
        match self {
            Effect::Create(r) => &r.id,
            Effect::Update { id, .. } => id,
            Effect::Delete { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_names_the_target() {
        let id = ResourceId::new("barracudawaf_services", "demo");
        let create = Effect::Create(Resource::new("barracudawaf_services", "demo"));
        let delete = Effect::Delete {
            id: id.clone(),
            from: State::not_found(id.clone()),
        };
        assert_eq!(create.resource_id(), &id);
        assert_eq!(delete.resource_id(), &id);
    }
}
