//! Authentication services, trusted hosts and administrator roles

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor};

pub static LDAP_SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_ldap_services",
    description: "An LDAP directory used to authenticate users",
    endpoint: Endpoint::new(&[Lit("ldap-services")]),
    fields: &[
        FieldSpec::text("name", "name", "Service name").required(),
        FieldSpec::text("ip_address", "ip-address", "Directory server address")
            .required(),
        FieldSpec::text("port", "port", "Directory server port"),
        FieldSpec::text("encryption", "encryption", "None, SSL or STARTTLS"),
        FieldSpec::text(
            "validate_server_certificate",
            "validate-server-certificate",
            "Validate the directory certificate",
        ),
        FieldSpec::text("bind_dn", "bind-dn", "DN used to bind")
            .required(),
        FieldSpec::text("bind_password", "bind-password", "Password used to bind")
            .required()
            .sensitive(),
        FieldSpec::text("search_base", "search-base", "Base DN for user searches")
            .required(),
        FieldSpec::text(
            "uid_attribute",
            "uid-attribute",
            "Attribute holding the user name",
        ),
        FieldSpec::text(
            "group_filter",
            "group-filter",
            "Filter applied to group searches",
        ),
        FieldSpec::text(
            "group_member_uid_attribute",
            "group-member-uid-attribute",
            "Attribute listing group members",
        ),
        FieldSpec::text(
            "group_membership_format",
            "group-membership-format",
            "Format of group membership values",
        ),
        FieldSpec::text(
            "allow_nested_groups",
            "allow-nested-groups",
            "Resolve nested groups",
        ),
        FieldSpec::text(
            "default_role",
            "default-role",
            "Role assigned to authenticated users",
        ),
        FieldSpec::text(
            "cache_expiry",
            "cache-expiry",
            "Credential cache lifetime in minutes",
        ),
    ],
    sub_resources: &[],
};

pub static RADIUS_SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_radius_services",
    description: "A RADIUS server used to authenticate users",
    endpoint: Endpoint::new(&[Lit("radius-services")]),
    fields: &[
        FieldSpec::text("name", "name", "Service name").required(),
        FieldSpec::text("ip_address", "ip-address", "RADIUS server address")
            .required(),
        FieldSpec::text("port", "port", "RADIUS server port"),
        FieldSpec::text("shared_secret", "shared-secret", "Shared secret")
            .required()
            .sensitive(),
        FieldSpec::text("timeout", "timeout", "Request timeout in seconds"),
        FieldSpec::text("retries", "retries", "Retries per request"),
        FieldSpec::text(
            "default_role",
            "default-role",
            "Role assigned to authenticated users",
        ),
        FieldSpec::text(
            "cache_expiry",
            "cache-expiry",
            "Credential cache lifetime in minutes",
        ),
    ],
    sub_resources: &[],
};

pub static RSA_SECURID_SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_rsa_securid_services",
    description: "An RSA SecurID authentication service",
    endpoint: Endpoint::new(&[Lit("rsa-securid-services")]),
    fields: &[
        FieldSpec::text("name", "name", "Service name").required(),
        FieldSpec::text("ip_address", "ip-address", "Authentication manager address")
            .required(),
        FieldSpec::text("port", "port", "Authentication manager port"),
        FieldSpec::text("shared_secret", "shared-secret", "Shared secret")
            .sensitive(),
        FieldSpec::text("timeout", "timeout", "Request timeout in seconds"),
        FieldSpec::text("retries", "retries", "Retries per request"),
        FieldSpec::text(
            "default_role",
            "default-role",
            "Role assigned to authenticated users",
        ),
    ],
    sub_resources: &[],
};

pub static SAML_SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_saml_services",
    description: "A SAML service provider definition",
    endpoint: Endpoint::new(&[Lit("saml-services")]),
    fields: &[
        FieldSpec::text("name", "name", "Service name").required(),
        FieldSpec::text("entity_id", "entity-id", "Service provider entity ID")
            .required(),
        FieldSpec::text(
            "sp_certificate",
            "sp-certificate",
            "Certificate used to sign requests",
        ),
        FieldSpec::text(
            "encryption_certificate",
            "encryption-certificate",
            "Certificate used to decrypt assertions",
        ),
        FieldSpec::text(
            "default_role",
            "default-role",
            "Role assigned to authenticated users",
        ),
    ],
    sub_resources: &[],
};

pub static KERBEROS_SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_kerberos_services",
    description: "A Kerberos realm used to authenticate users",
    endpoint: Endpoint::new(&[Lit("kerberos-services")]),
    fields: &[
        FieldSpec::text("name", "name", "Service name").required(),
        FieldSpec::text("realm", "realm", "Kerberos realm")
            .required(),
        FieldSpec::text("kdc", "kdc", "Key distribution center")
            .required(),
        FieldSpec::text(
            "kerberos_debug",
            "kerberos-debug",
            "Log Kerberos protocol details",
        ),
        FieldSpec::text(
            "default_role",
            "default-role",
            "Role assigned to authenticated users",
        ),
        FieldSpec::text(
            "cache_expiry",
            "cache-expiry",
            "Credential cache lifetime in minutes",
        ),
    ],
    sub_resources: &[],
};

pub static TRUSTED_HOST_GROUPS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_trusted_host_groups",
    description: "A group of trusted hosts",
    endpoint: Endpoint::new(&[Lit("trusted-host-groups")]),
    fields: &[
        FieldSpec::text("name", "name", "Group name").required(),
    ],
    sub_resources: &[],
};

pub static TRUSTED_HOSTS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_trusted_hosts",
    description: "A trusted host within a trusted host group",
    endpoint: Endpoint::new(&[Lit("trusted-host-groups"), Parent, Lit("trusted-hosts")]),
    fields: &[
        FieldSpec::text("name", "name", "Host name").required(),
        FieldSpec::text("version", "version", "IPv4 or IPv6")
            .update_exempt(),
        FieldSpec::text("ip_address", "ip-address", "IPv4 address"),
        FieldSpec::text("mask", "mask", "IPv4 netmask"),
        FieldSpec::text("ipv6_address", "ipv6-address", "IPv6 address"),
        FieldSpec::text("ipv6_mask", "ipv6-mask", "IPv6 prefix length"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static ADMINISTRATOR_ROLES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_administrator_roles",
    description: "An administrator role limiting what an account may change",
    endpoint: Endpoint::new(&[Lit("administrator-roles")]),
    fields: &[
        FieldSpec::text("name", "name", "Role name").required(),
        FieldSpec::text("api_privilege", "api-privilege", "Allow API access"),
        FieldSpec::list(
            "authentication_services",
            "authentication-services",
            "Authentication services the role may manage",
        ),
        FieldSpec::list(
            "objects",
            "objects",
            "Configuration objects the role may access",
        ),
        FieldSpec::list(
            "operations",
            "operations",
            "Operations the role may perform",
        ),
        FieldSpec::list(
            "security_policies",
            "security-policies",
            "Security policies the role may manage",
        ),
        FieldSpec::list(
            "service_groups",
            "service-groups",
            "Service groups the role may manage",
        ),
        FieldSpec::list("services", "services", "Services the role may manage"),
        FieldSpec::list("vsites", "vsites", "Vsites the role may manage"),
    ],
    sub_resources: &[],
};
