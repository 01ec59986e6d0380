//! Interfaces, routing, NAT and network-level access control

use super::Segment::Lit;
use super::{Endpoint, FieldSpec, ResourceDescriptor};

pub static VLANS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_vlans",
    description: "A VLAN on a physical interface",
    endpoint: Endpoint::new(&[Lit("vlans")]),
    fields: &[
        FieldSpec::text("name", "name", "VLAN name").required(),
        FieldSpec::text(
            "interface",
            "interface",
            "Physical interface carrying the VLAN",
        )
        .required(),
        FieldSpec::text("vlan_id", "vlan-id", "802.1Q tag")
            .required(),
        FieldSpec::text("vsite", "vsite", "Vsite the VLAN belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static STATIC_ROUTES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_static_routes",
    description: "A static route via a gateway",
    endpoint: Endpoint::new(&[Lit("static-routes")]),
    fields: &[
        FieldSpec::text("name", "name", "Route name").required(),
        FieldSpec::text("ip_version", "ip-version", "IPv4 or IPv6")
            .update_exempt(),
        FieldSpec::text("ip_address", "ip-address", "Destination network")
            .required(),
        FieldSpec::text("netmask", "netmask", "Destination netmask")
            .required(),
        FieldSpec::text("gateway", "gateway", "Next hop").required(),
        FieldSpec::text("vsite", "vsite", "Vsite the route belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static INTERFACE_ROUTES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_interface_routes",
    description: "A route bound to a network interface",
    endpoint: Endpoint::new(&[Lit("interface-routes")]),
    fields: &[
        FieldSpec::text("name", "name", "Route name").required(),
        FieldSpec::text("ip_version", "ip-version", "IPv4 or IPv6")
            .update_exempt(),
        FieldSpec::text("ip_address", "ip-address", "Destination network")
            .required(),
        FieldSpec::text("netmask", "netmask", "Destination netmask")
            .required(),
        FieldSpec::text("network_interface", "network-interface", "Interface used")
            .required(),
        FieldSpec::text("vsite", "vsite", "Vsite the route belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static SOURCE_NATS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_source_nats",
    description: "A source NAT rule",
    endpoint: Endpoint::new(&[Lit("source-nats")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("pre_source", "pre-source", "Original source network")
            .required(),
        FieldSpec::text("netmask", "netmask", "Source netmask"),
        FieldSpec::text("post_source", "post-source", "Translated source address")
            .required(),
        FieldSpec::text("destination", "destination", "Destination network matched"),
        FieldSpec::text(
            "destination_mask",
            "destination-mask",
            "Destination netmask",
        ),
        FieldSpec::text("protocol", "protocol", "Protocol matched"),
        FieldSpec::text(
            "destination_port",
            "destination-port",
            "Destination port matched",
        ),
        FieldSpec::text(
            "outgoing_interface",
            "outgoing-interface",
            "Interface the rule applies to",
        ),
        FieldSpec::text("vsite", "vsite", "Vsite the rule belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static DESTINATION_NATS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_destination_nats",
    description: "A destination NAT rule",
    endpoint: Endpoint::new(&[Lit("destination-nats")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text(
            "pre_destination",
            "pre-destination",
            "Original destination network",
        )
        .required(),
        FieldSpec::text(
            "pre_destination_netmask",
            "pre-destination-netmask",
            "Original destination netmask",
        ),
        FieldSpec::text(
            "post_destination",
            "post-destination",
            "Translated destination address",
        )
        .required(),
        FieldSpec::text("protocol", "protocol", "Protocol matched"),
        FieldSpec::text(
            "pre_destination_port",
            "pre-destination-port",
            "Destination port matched",
        ),
        FieldSpec::text(
            "incoming_interface",
            "incoming-interface",
            "Interface the rule applies to",
        ),
        FieldSpec::text("vsite", "vsite", "Vsite the rule belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static NETWORK_ACLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_network_acls",
    description: "A network firewall rule",
    endpoint: Endpoint::new(&[Lit("network-acls")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("ip_version", "ip-version", "IPv4 or IPv6")
            .update_exempt(),
        FieldSpec::text("source_address", "source-address", "Source network")
            .required(),
        FieldSpec::text("source_netmask", "source-netmask", "Source netmask")
            .required(),
        FieldSpec::text("source_port", "source-port", "Source port range"),
        FieldSpec::text(
            "destination_address",
            "destination-address",
            "Destination network",
        )
        .required(),
        FieldSpec::text(
            "destination_netmask",
            "destination-netmask",
            "Destination netmask",
        )
        .required(),
        FieldSpec::text(
            "destination_port",
            "destination-port",
            "Destination port range",
        ),
        FieldSpec::text("protocol", "protocol", "Protocol matched"),
        FieldSpec::text("action", "action", "Allow or Deny"),
        FieldSpec::text("interface", "interface", "Interface the rule applies to"),
        FieldSpec::text("priority", "priority", "Evaluation order"),
        FieldSpec::text("status", "status", "Enable or disable the rule"),
        FieldSpec::text(
            "icmp_response",
            "icmp-response",
            "Send ICMP unreachable on deny",
        ),
        FieldSpec::text(
            "max_connections",
            "max-connections",
            "Most connections per source",
        ),
        FieldSpec::text(
            "max_half_open_connections",
            "max-half-open-connections",
            "Most half-open connections per source",
        ),
        FieldSpec::text("vsite", "vsite", "Vsite the rule belongs to"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static LOCAL_HOST_MAPS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_local_host_maps",
    description: "A static hostname to address mapping",
    endpoint: Endpoint::new(&[Lit("local-host-maps")]),
    fields: &[
        FieldSpec::text("name", "name", "Hostname").required(),
        FieldSpec::text("ip_address", "ip-address", "Address the name resolves to")
            .required(),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static SYSLOG_SERVERS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_syslog_servers",
    description: "A remote syslog destination",
    endpoint: Endpoint::new(&[Lit("syslog-servers")]),
    fields: &[
        FieldSpec::text("name", "name", "Server name").required(),
        FieldSpec::text("ip_address", "ip-address", "Server address")
            .required(),
        FieldSpec::text("port", "port", "Server port"),
        FieldSpec::text("connection_type", "connection-type", "UDP, TCP or SSL"),
        FieldSpec::text(
            "validate_server_certificate",
            "validate-server-certificate",
            "Validate the server certificate on SSL connections",
        ),
        FieldSpec::text(
            "client_certificate",
            "client-certificate",
            "Client certificate for SSL connections",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static CONFIGURATION_CHECKPOINTS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_configuration_checkpoints",
    description: "A saved configuration checkpoint",
    endpoint: Endpoint::new(&[Lit("configuration-checkpoints")]),
    fields: &[
        FieldSpec::text("name", "name", "Checkpoint name")
            .required(),
        FieldSpec::text("comment", "comment", "Free-form description"),
    ],
    sub_resources: &[],
};
