//! Provider registration
//!
//! The connection schema of the provider block, configuration from that
//! block, and the login performed before any resource operation.

use std::collections::HashMap;
use std::sync::Arc;

use barracudawaf_core::provider::{ProviderError, ProviderResult};
use barracudawaf_core::resource::Value;
use barracudawaf_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use log::info;

use crate::BarracudaWafProvider;
use crate::client::{ClientConfig, Session};
use crate::resources::resource_descriptors;

/// Provider name, also the prefix of every resource type
pub const PROVIDER_NAME: &str = "barracudawaf";

/// Schema of the provider block
pub fn provider_schema() -> ResourceSchema {
    ResourceSchema::new(PROVIDER_NAME)
        .with_description("Connection to a Barracuda Web Application Firewall")
        .attribute(
            AttributeSchema::new("address", AttributeType::String)
                .required()
                .with_description("Management IP address or hostname of the appliance"),
        )
        .attribute(
            AttributeSchema::new("port", AttributeType::String)
                .required()
                .with_description("Management port of the appliance (e.g. 8443)"),
        )
        .attribute(
            AttributeSchema::new("username", AttributeType::String)
                .required()
                .with_description("Administrator user name"),
        )
        .attribute(
            AttributeSchema::new("password", AttributeType::String)
                .required()
                .sensitive()
                .with_description("Administrator password"),
        )
}

/// Schemas of every resource type
pub fn all_schemas() -> Vec<ResourceSchema> {
    resource_descriptors().iter().map(|d| d.schema()).collect()
}

/// Validated provider block
#[derive(Clone)]
pub struct ProviderConfig {
    pub address: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"(sensitive)")
            .finish()
    }
}

impl ProviderConfig {
    /// Read the provider block; all four attributes are required
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> ProviderResult<Self> {
        if let Err(errors) = provider_schema().validate(attributes) {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(ProviderError::new(format!(
                "Invalid provider configuration: {}",
                messages.join("; ")
            )));
        }

        let get = |name: &str| {
            attributes
                .get(name)
                .and_then(Value::to_scalar_string)
                .unwrap_or_default()
        };
        Ok(Self {
            address: get("address"),
            port: get("port"),
            username: get("username"),
            password: get("password"),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            address: self.address.clone(),
            port: self.port.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Build a session and log in; a failed login leaves no usable provider
pub async fn configure(config: &ProviderConfig) -> ProviderResult<BarracudaWafProvider> {
    let mut session = Session::new(config.client_config()).map_err(|e| {
        ProviderError::new(format!("Failed to configure provider: {}", e)).with_cause(e)
    })?;

    session.login().await.map_err(|e| {
        ProviderError::new(format!(
            "Failed to log in to {}:{} as {}: {}",
            config.address, config.port, config.username, e
        ))
        .with_cause(e)
    })?;

    info!("Logged in to {}", session.base_url());
    Ok(BarracudaWafProvider::new(Arc::new(session)))
}
