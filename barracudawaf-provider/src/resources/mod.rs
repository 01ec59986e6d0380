//! Resource descriptors
//!
//! Every appliance object type is described by a static table: where it
//! lives, which fields it has and under which JSON key each is sent, which
//! fields cannot change after creation, and which nested blocks are applied
//! with separate calls. One generic mapper (`crate::provider`) drives all of
//! them.
//!
//! ## Modules
//!
//! - `services` - services, servers, vsites and content rules
//! - `application_security` - per-service profiles, ACLs and rewrite rules
//! - `policies` - security policies and global protection settings
//! - `patterns` - custom pattern groups
//! - `network` - interfaces, routes, NAT and network ACLs
//! - `access_control` - authentication services, trusted hosts and roles
//! - `certificates` - certificates and revocation lists

mod access_control;
mod application_security;
mod certificates;
mod network;
mod patterns;
mod policies;
mod services;

use std::collections::HashMap;

use barracudawaf_core::provider::ResourceType;
use barracudawaf_core::resource::Value;
use barracudawaf_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

pub use crate::endpoint::{Endpoint, PARENT_ATTRIBUTE, Segment};

/// How a field's value is sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single string
    Text,
    /// An array of strings
    List,
}

/// One field of a resource or sub-resource
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Attribute name in configuration (snake_case)
    pub name: &'static str,
    /// JSON key on the wire (kebab-case)
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Left out of update payloads; the appliance fixes it at creation
    pub update_exempt: bool,
    pub sensitive: bool,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn text(name: &'static str, key: &'static str, description: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::Text,
            required: false,
            update_exempt: false,
            sensitive: false,
            description,
        }
    }

    pub const fn list(name: &'static str, key: &'static str, description: &'static str) -> Self {
        Self {
            kind: FieldKind::List,
            ..Self::text(name, key, description)
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn update_exempt(self) -> Self {
        Self {
            update_exempt: true,
            ..self
        }
    }

    pub const fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    fn attribute_schema(&self) -> AttributeSchema {
        let attr_type = match self.kind {
            FieldKind::Text => AttributeType::String,
            FieldKind::List => AttributeType::List(Box::new(AttributeType::String)),
        };
        let mut schema = AttributeSchema::new(self.name, attr_type)
            .with_description(self.description)
            .with_provider_name(self.key);
        if self.required {
            schema = schema.required();
        }
        if self.sensitive {
            schema = schema.sensitive();
        }
        schema
    }
}

/// A nested block applied with one `PUT {object}/{key}` per element
#[derive(Debug, Clone, Copy)]
pub struct SubResourceSpec {
    /// Block name in configuration
    pub name: &'static str,
    /// Path segment appended to the object path
    pub key: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Static description of one appliance object type
#[derive(Debug)]
pub struct ResourceDescriptor {
    /// Resource type name (e.g., "barracudawaf_services")
    pub type_name: &'static str,
    pub description: &'static str,
    pub endpoint: Endpoint,
    /// Top-level fields, in payload order
    pub fields: &'static [FieldSpec],
    /// Nested blocks, applied in this order after create and update
    pub sub_resources: &'static [SubResourceSpec],
}

impl ResourceDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn sub_resource(&self, name: &str) -> Option<&'static SubResourceSpec> {
        self.sub_resources.iter().find(|s| s.name == name)
    }

    /// Whether the object lives under one or more parent objects
    pub fn is_nested(&self) -> bool {
        self.endpoint.parent_slots() > 0
    }

    /// Attribute schema derived from the descriptor
    ///
    /// Nested types get a required `parent` list; sub-resources become blocks.
    pub fn schema(&self) -> ResourceSchema {
        let mut schema =
            ResourceSchema::new(self.type_name).with_description(self.description);

        for field in self.fields {
            schema = schema.attribute(field.attribute_schema());
        }

        if self.is_nested() {
            schema = schema.attribute(
                AttributeSchema::new(
                    PARENT_ATTRIBUTE,
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .required()
                .with_description(format!(
                    "Names of the enclosing objects, outermost first ({})",
                    self.endpoint.template()
                )),
            );
        }

        for sub in self.sub_resources {
            let fields = sub.fields.iter().map(FieldSpec::attribute_schema).collect();
            schema = schema.attribute(
                AttributeSchema::new(sub.name, AttributeType::Block(fields))
                    .with_provider_name(sub.key),
            );
        }

        schema
    }

    /// Check attributes against the schema and the parent arity
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = match self.schema().validate(attributes) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        };

        if let Some(Value::List(parents)) = attributes.get(PARENT_ATTRIBUTE) {
            let expected = self.endpoint.parent_slots();
            if parents.len() != expected {
                errors.push(format!(
                    "'{}' must name {} enclosing object(s) ({}), got {}",
                    PARENT_ATTRIBUTE,
                    expected,
                    self.endpoint.template(),
                    parents.len()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

static DESCRIPTORS: &[&ResourceDescriptor] = &[
    &services::SERVICES,
    &services::SERVERS,
    &services::VSITES,
    &services::SERVICE_GROUPS,
    &services::CONTENT_RULES,
    &services::CONTENT_RULE_SERVERS,
    &services::PREFERRED_CLIENTS,
    &application_security::URL_PROFILES,
    &application_security::PARAMETER_PROFILES,
    &application_security::URL_ACLS,
    &application_security::HEADER_ACLS,
    &application_security::ALLOW_DENY_CLIENTS,
    &application_security::URL_TRANSLATIONS,
    &application_security::URL_POLICIES,
    &application_security::URL_ENCRYPTION_RULES,
    &application_security::HTTP_REQUEST_REWRITE_RULES,
    &application_security::HTTP_RESPONSE_REWRITE_RULES,
    &application_security::RESPONSE_BODY_REWRITE_RULES,
    &application_security::JSON_PROFILES,
    &application_security::JSON_KEY_PROFILES,
    &application_security::DDOS_POLICIES,
    &application_security::ADAPTIVE_PROFILING_RULES,
    &policies::SECURITY_POLICIES,
    &policies::ACTION_POLICIES,
    &policies::GLOBAL_ACLS,
    &policies::DATA_THEFT_PROTECTIONS,
    &policies::JSON_SECURITY_POLICIES,
    &policies::WEB_SCRAPING_POLICIES,
    &policies::RATE_CONTROL_POOLS,
    &policies::RESPONSE_PAGES,
    &policies::SESSION_IDENTIFIERS,
    &policies::CUSTOM_PARAMETER_CLASSES,
    &patterns::ATTACK_TYPES,
    &patterns::ATTACK_PATTERNS,
    &patterns::INPUT_TYPES,
    &patterns::INPUT_PATTERNS,
    &patterns::IDENTITY_TYPES,
    &patterns::IDENTITY_THEFT_PATTERNS,
    &patterns::BOT_SPAM_TYPES,
    &patterns::BOT_SPAM_PATTERNS,
    &network::VLANS,
    &network::STATIC_ROUTES,
    &network::INTERFACE_ROUTES,
    &network::SOURCE_NATS,
    &network::DESTINATION_NATS,
    &network::NETWORK_ACLS,
    &network::LOCAL_HOST_MAPS,
    &network::SYSLOG_SERVERS,
    &network::CONFIGURATION_CHECKPOINTS,
    &access_control::LDAP_SERVICES,
    &access_control::RADIUS_SERVICES,
    &access_control::RSA_SECURID_SERVICES,
    &access_control::SAML_SERVICES,
    &access_control::KERBEROS_SERVICES,
    &access_control::TRUSTED_HOST_GROUPS,
    &access_control::TRUSTED_HOSTS,
    &access_control::ADMINISTRATOR_ROLES,
    &certificates::SELF_SIGNED_CERTIFICATES,
    &certificates::LETSENCRYPT_CERTIFICATES,
    &certificates::TRUSTED_CA_CERTIFICATES,
    &certificates::TRUSTED_SERVER_CERTIFICATES,
    &certificates::CLIENT_CERTIFICATE_CRLS,
];

/// All registered descriptors
pub fn resource_descriptors() -> &'static [&'static ResourceDescriptor] {
    DESCRIPTORS
}

/// Look up a descriptor by resource type name
pub fn get_descriptor(type_name: &str) -> Option<&'static ResourceDescriptor> {
    DESCRIPTORS.iter().copied().find(|d| d.type_name == type_name)
}

/// `ResourceType` backed by a descriptor
pub struct DescriptorResourceType(pub &'static ResourceDescriptor);

impl ResourceType for DescriptorResourceType {
    fn name(&self) -> &'static str {
        self.0.type_name
    }

    fn schema(&self) -> ResourceSchema {
        self.0.schema()
    }
}

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    DESCRIPTORS
        .iter()
        .copied()
        .map(|d| Box::new(DescriptorResourceType(d)) as Box<dyn ResourceType>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn registry_covers_the_appliance_surface() {
        assert!(resource_descriptors().len() >= 60);

        let mut names = HashSet::new();
        for descriptor in resource_descriptors() {
            assert!(
                names.insert(descriptor.type_name),
                "duplicate resource type {}",
                descriptor.type_name
            );
            assert!(descriptor.type_name.starts_with("barracudawaf_"));
        }
    }

    #[test]
    fn every_descriptor_is_keyed_by_a_required_name() {
        for descriptor in resource_descriptors() {
            let name = descriptor
                .field("name")
                .unwrap_or_else(|| panic!("{} has no name field", descriptor.type_name));
            assert!(name.required, "{} name is optional", descriptor.type_name);
            assert!(!name.update_exempt);
            assert_eq!(name.key, "name");
        }
    }

    #[test]
    fn json_keys_are_kebab_case_and_unique() {
        for descriptor in resource_descriptors() {
            let mut blocks = vec![descriptor.fields];
            blocks.extend(descriptor.sub_resources.iter().map(|s| s.fields));
            for fields in blocks {
                let mut keys = HashSet::new();
                for field in fields {
                    assert_eq!(field.key, field.name.replace('_', "-"));
                    assert!(
                        keys.insert(field.key),
                        "duplicate key {} in {}",
                        field.key,
                        descriptor.type_name
                    );
                }
            }
            for sub in descriptor.sub_resources {
                assert_eq!(sub.key, sub.name.replace('_', "-"));
            }
        }
    }

    #[test]
    fn lookup_by_type_name() {
        let servers = get_descriptor("barracudawaf_servers").unwrap();
        assert_eq!(servers.endpoint.template(), "services/{}/servers");
        assert!(servers.sub_resource("ssl_policy").is_some());
        assert!(get_descriptor("barracudawaf_unknown").is_none());
        assert_eq!(resource_types().len(), resource_descriptors().len());
    }

    #[test]
    fn nested_schema_requires_parent() {
        let schema = get_descriptor("barracudawaf_servers").unwrap().schema();
        assert!(schema.attributes[PARENT_ATTRIBUTE].required);
        assert!(matches!(
            schema.attributes["ssl_policy"].attr_type,
            AttributeType::Block(_)
        ));

        let top = get_descriptor("barracudawaf_services").unwrap().schema();
        assert!(!top.attributes.contains_key(PARENT_ATTRIBUTE));
        assert_eq!(
            top.attributes["address_version"].provider_name.as_deref(),
            Some("address-version")
        );
    }

    #[test]
    fn sensitive_fields_carry_into_schema() {
        let schema = get_descriptor("barracudawaf_ldap_services").unwrap().schema();
        assert!(schema.is_sensitive("bind_password"));
        assert!(!schema.is_sensitive("bind_dn"));
    }

    #[test]
    fn validate_checks_parent_arity() {
        let servers = get_descriptor("barracudawaf_servers").unwrap();
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), text("web1"));
        attrs.insert(
            PARENT_ATTRIBUTE.to_string(),
            Value::List(vec![text("DemoApp1"), text("extra")]),
        );

        let errors = servers.validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("services/{}/servers"));

        attrs.insert(
            PARENT_ATTRIBUTE.to_string(),
            Value::List(vec![text("DemoApp1")]),
        );
        assert!(servers.validate(&attrs).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_sub_resource_fields() {
        let servers = get_descriptor("barracudawaf_servers").unwrap();
        let mut block = HashMap::new();
        block.insert("enable_tls_9".to_string(), text("Yes"));

        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), text("web1"));
        attrs.insert(
            PARENT_ATTRIBUTE.to_string(),
            Value::List(vec![text("DemoApp1")]),
        );
        attrs.insert(
            "ssl_policy".to_string(),
            Value::List(vec![Value::Map(block)]),
        );

        let errors = servers.validate(&attrs).unwrap_err();
        assert!(errors[0].contains("enable_tls_9"));
    }
}
