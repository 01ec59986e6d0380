//! Provider - The seam between the host and an appliance API
//!
//! The host decides what to do (Effects); a Provider turns each decision
//! into API calls and reports the resulting State.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::ResourceSchema;

/// Failure of a provider operation, tagged with the resource it concerns
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// What exists upstream after a create that failed part-way
    pub partial_state: Option<Box<State>>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resource_id: None,
            cause: None,
            partial_state: None,
        }
    }

    pub fn for_resource(self, id: ResourceId) -> Self {
        Self {
            resource_id: Some(id),
            ..self
        }
    }

    pub fn with_cause(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            cause: Some(Box::new(cause)),
            ..self
        }
    }

    pub fn with_partial_state(self, state: State) -> Self {
        Self {
            partial_state: Some(Box::new(state)),
            ..self
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.resource_id {
            Some(id) => write!(f, "[{}] {}", id, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A resource type a Provider manages
pub trait ResourceType: Send + Sync {
    /// e.g. "barracudawaf_services"
    fn name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;
}

/// Operations the host drives, one resource at a time
///
/// Read, update and delete get the identifier recorded at creation and the
/// attributes already known for the resource: nested objects need their
/// parents' names to build a request path.
pub trait Provider: Send + Sync {
    /// e.g. "barracudawaf"
    fn name(&self) -> &'static str;

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>>;

    /// `State::not_found` when the object is gone; the host then plans a
    /// recreation
    fn read<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        known: &'a HashMap<String, Value>,
    ) -> BoxFuture<'a, ProviderResult<State>>;

    /// The returned State carries the appliance-side identifier
    ///
    /// A failure after the object itself was created carries the partial
    /// State in `ProviderError::partial_state`, so the host can keep track
    /// of the object.
    fn create<'a>(&'a self, resource: &'a Resource) -> BoxFuture<'a, ProviderResult<State>>;

    fn update<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        from: &'a State,
        to: &'a Resource,
    ) -> BoxFuture<'a, ProviderResult<State>>;

    fn delete<'a>(
        &'a self,
        id: &'a ResourceId,
        identifier: &'a str,
        from: &'a State,
    ) -> BoxFuture<'a, ProviderResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug)]
    struct Refused;

    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl Error for Refused {}

    #[test]
    fn display_prefixes_the_resource() {
        let err = ProviderError::new("boom")
            .for_resource(ResourceId::new("barracudawaf_services", "demo"));
        assert_eq!(err.to_string(), "[barracudawaf_services.demo] boom");
        assert_eq!(ProviderError::new("boom").to_string(), "boom");
    }

    #[test]
    fn cause_is_the_error_source() {
        let err = ProviderError::new("Failed to read").with_cause(Refused);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection refused"));
        assert!(ProviderError::new("plain").source().is_none());
    }

    #[test]
    fn builders_keep_earlier_fields() {
        let id = ResourceId::new("barracudawaf_servers", "web");
        let err = ProviderError::new("x")
            .with_cause(Refused)
            .for_resource(id.clone());
        assert_eq!(err.resource_id, Some(id.clone()));
        assert!(err.cause.is_some());

        let err = err.with_partial_state(State::not_found(id.clone()));
        assert_eq!(err.partial_state.map(|s| s.id), Some(id));
    }
}
