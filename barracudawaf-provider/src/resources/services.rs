//! Web application services, their back-end servers and content rules

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor, SubResourceSpec};

pub static SERVICES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_services",
    description: "A web application service: the virtual IP and port clients connect to",
    endpoint: Endpoint::new(&[Lit("services")]),
    fields: &[
        FieldSpec::text("name", "name", "Web application name")
            .required(),
        FieldSpec::text(
            "address_version",
            "address-version",
            "Internet Protocol version of the service (IPv4 or IPv6)",
        )
        .update_exempt(),
        FieldSpec::text(
            "ip_address",
            "ip-address",
            "Virtual IP address clients connect to",
        )
        .required(),
        FieldSpec::text("port", "port", "TCP port the service listens on")
            .required(),
        FieldSpec::text(
            "type",
            "type",
            "Service type (HTTP, HTTPS, Instant SSL, Redirect Service, Custom, ...)",
        )
        .update_exempt(),
        FieldSpec::text("status", "status", "Enable or disable the service"),
        FieldSpec::text("vsite", "vsite", "Vsite the service belongs to"),
        FieldSpec::text("group", "group", "Service group the service belongs to"),
        FieldSpec::text("mask", "mask", "Netmask of the virtual IP"),
        FieldSpec::text("comments", "comments", "Free-form description"),
        FieldSpec::text("app_id", "app-id", "Identifier used in logs and reports"),
        FieldSpec::text(
            "session_timeout",
            "session-timeout",
            "Idle session timeout in seconds",
        ),
        FieldSpec::text(
            "dps_enabled",
            "dps-enabled",
            "Enable Active DDoS Prevention",
        ),
        FieldSpec::text(
            "enable_access_logs",
            "enable-access-logs",
            "Write access log entries for this service",
        ),
        FieldSpec::text(
            "linked_service_name",
            "linked-service-name",
            "Service linked for Instant SSL redirection",
        ),
        FieldSpec::text(
            "certificate",
            "certificate",
            "Certificate presented for HTTPS services",
        ),
    ],
    sub_resources: &[
        SubResourceSpec {
            name: "basic_security",
            key: "basic-security",
            fields: &[
                FieldSpec::text("mode", "mode", "Passive or Active"),
                FieldSpec::text(
                    "web_firewall_policy",
                    "web-firewall-policy",
                    "Security policy applied to requests",
                ),
                FieldSpec::text(
                    "ignore_case",
                    "ignore-case",
                    "Ignore case in URL and parameter matching",
                ),
                FieldSpec::text(
                    "rate_control_status",
                    "rate-control-status",
                    "Enable rate control",
                ),
                FieldSpec::text(
                    "rate_control_pool",
                    "rate-control-pool",
                    "Rate control pool to use",
                ),
                FieldSpec::text(
                    "client_ip_addr_header",
                    "client-ip-addr-header",
                    "Header carrying the original client IP",
                ),
                FieldSpec::text(
                    "trusted_hosts_action",
                    "trusted-hosts-action",
                    "Action for trusted hosts (Default, Passive, Allow)",
                ),
                FieldSpec::text(
                    "trusted_hosts_group",
                    "trusted-hosts-group",
                    "Trusted host group",
                ),
                FieldSpec::text(
                    "web_firewall_log_level",
                    "web-firewall-log-level",
                    "Minimum severity logged by the firewall",
                ),
            ],
        },
        SubResourceSpec {
            name: "ssl_security",
            key: "ssl-security",
            fields: &[
                FieldSpec::text("status", "status", "Enable SSL on the service"),
                FieldSpec::text("certificate", "certificate", "Server certificate"),
                FieldSpec::text(
                    "ecdsa_certificate",
                    "ecdsa-certificate",
                    "ECDSA server certificate",
                ),
                FieldSpec::list(
                    "sni_certificate",
                    "sni-certificate",
                    "Certificates selected by server name indication",
                ),
                FieldSpec::list(
                    "selected_ciphers",
                    "selected-ciphers",
                    "Ciphers offered to clients",
                ),
                FieldSpec::text("ciphers", "ciphers", "Cipher set (default or custom)"),
                FieldSpec::text("enable_sni", "enable-sni", "Enable server name indication"),
                FieldSpec::text(
                    "enable_strict_sni_check",
                    "enable-strict-sni-check",
                    "Reject clients that send an unknown server name",
                ),
                FieldSpec::text("enable_ssl_3", "enable-ssl-3", "Allow SSL 3.0"),
                FieldSpec::text("enable_tls_1", "enable-tls-1", "Allow TLS 1.0"),
                FieldSpec::text("enable_tls_1_1", "enable-tls-1-1", "Allow TLS 1.1"),
                FieldSpec::text("enable_tls_1_2", "enable-tls-1-2", "Allow TLS 1.2"),
                FieldSpec::text("enable_tls_1_3", "enable-tls-1-3", "Allow TLS 1.3"),
                FieldSpec::text(
                    "enable_hsts",
                    "enable-hsts",
                    "Send Strict-Transport-Security",
                ),
                FieldSpec::text("hsts_max_age", "hsts-max-age", "HSTS max-age in days"),
                FieldSpec::text(
                    "include_hsts_sub_domains",
                    "include-hsts-sub-domains",
                    "Apply HSTS to sub-domains",
                ),
            ],
        },
        SubResourceSpec {
            name: "load_balancing",
            key: "load-balancing",
            fields: &[
                FieldSpec::text(
                    "algorithm",
                    "algorithm",
                    "Balancing algorithm (Round Robin, Weighted Round Robin, Least Requests, ...)",
                ),
                FieldSpec::text(
                    "persistence_method",
                    "persistence-method",
                    "Session persistence method",
                ),
                FieldSpec::text(
                    "persistence_cookie_name",
                    "persistence-cookie-name",
                    "Persistence cookie name",
                ),
                FieldSpec::text(
                    "persistence_cookie_path",
                    "persistence-cookie-path",
                    "Persistence cookie path",
                ),
                FieldSpec::text(
                    "persistence_cookie_domain",
                    "persistence-cookie-domain",
                    "Persistence cookie domain",
                ),
                FieldSpec::text(
                    "persistence_idle_timeout",
                    "persistence-idle-timeout",
                    "Persistence idle timeout in seconds",
                ),
                FieldSpec::text(
                    "source_ip_netmask",
                    "source-ip-netmask",
                    "Netmask applied for source IP persistence",
                ),
                FieldSpec::text(
                    "header_name",
                    "header-name",
                    "Header used for header persistence",
                ),
                FieldSpec::text(
                    "parameter_name",
                    "parameter-name",
                    "Parameter used for parameter persistence",
                ),
                FieldSpec::text(
                    "failover_method",
                    "failover-method",
                    "Failover behaviour when no server is available",
                ),
            ],
        },
        SubResourceSpec {
            name: "caching",
            key: "caching",
            fields: &[
                FieldSpec::text("status", "status", "Enable response caching"),
                FieldSpec::list(
                    "file_extensions",
                    "file-extensions",
                    "Cacheable file extensions",
                ),
                FieldSpec::text("max_size", "max-size", "Largest cacheable object in KB"),
                FieldSpec::text("min_size", "min-size", "Smallest cacheable object in bytes"),
                FieldSpec::text("expiry_age", "expiry-age", "Cache expiry in minutes"),
                FieldSpec::text(
                    "cache_negative_responses",
                    "cache-negative-responses",
                    "Cache 4xx/5xx responses",
                ),
                FieldSpec::list(
                    "ignore_request_headers",
                    "ignore-request-headers",
                    "Request headers that do not prevent caching",
                ),
                FieldSpec::list(
                    "ignore_response_headers",
                    "ignore-response-headers",
                    "Response headers that do not prevent caching",
                ),
            ],
        },
        SubResourceSpec {
            name: "compression",
            key: "compression",
            fields: &[
                FieldSpec::text("status", "status", "Enable response compression"),
                FieldSpec::list(
                    "content_types",
                    "content-types",
                    "Content types to compress",
                ),
                FieldSpec::text(
                    "min_size",
                    "min-size",
                    "Smallest response compressed, in bytes",
                ),
                FieldSpec::text(
                    "unknown_content_types",
                    "unknown-content-types",
                    "Compress responses with no content type",
                ),
            ],
        },
        SubResourceSpec {
            name: "advanced_configuration",
            key: "advanced-configuration",
            fields: &[
                FieldSpec::text(
                    "keepalive_requests",
                    "keepalive-requests",
                    "Requests allowed per keep-alive connection",
                ),
                FieldSpec::text(
                    "ntlm_ignore_extra_data",
                    "ntlm-ignore-extra-data",
                    "Ignore extra data in NTLM authentication",
                ),
                FieldSpec::text(
                    "enable_http2",
                    "enable-http2",
                    "Enable HTTP/2 on the front end",
                ),
                FieldSpec::text(
                    "enable_websocket",
                    "enable-websocket",
                    "Allow WebSocket upgrades",
                ),
                FieldSpec::text("enable_vdi", "enable-vdi", "Enable VDI support"),
                FieldSpec::text(
                    "enable_web_application_firewall",
                    "enable-web-application-firewall",
                    "Enable the web application firewall for this service",
                ),
                FieldSpec::text(
                    "enable_fingerprint",
                    "enable-fingerprint",
                    "Enable client fingerprinting",
                ),
            ],
        },
        SubResourceSpec {
            name: "instant_ssl",
            key: "instant-ssl",
            fields: &[
                FieldSpec::text("status", "status", "Enable Instant SSL rewriting"),
                FieldSpec::list(
                    "secure_site_domain",
                    "secure-site-domain",
                    "Domains rewritten from http to https",
                ),
                FieldSpec::text(
                    "sharepoint_rewrite_support",
                    "sharepoint-rewrite-support",
                    "Enable SharePoint rewrite support",
                ),
            ],
        },
        SubResourceSpec {
            name: "website_profile",
            key: "website-profile",
            fields: &[
                FieldSpec::text(
                    "mode",
                    "mode",
                    "Website profile mode (Learning, Active, Passive)",
                ),
                FieldSpec::list(
                    "allowed_domains",
                    "allowed-domains",
                    "Domains allowed in references",
                ),
                FieldSpec::text(
                    "strict_profile_check",
                    "strict-profile-check",
                    "Enforce the learned profile strictly",
                ),
                FieldSpec::list(
                    "exclude_url_patterns",
                    "exclude-url-patterns",
                    "URL patterns excluded from learning",
                ),
                FieldSpec::list(
                    "include_url_patterns",
                    "include-url-patterns",
                    "URL patterns included in learning",
                ),
            ],
        },
    ],
};

pub static SERVERS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_servers",
    description: "A back-end server receiving traffic from a service",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("servers")]),
    fields: &[
        FieldSpec::text("name", "name", "Server name").required(),
        FieldSpec::text(
            "identifier",
            "identifier",
            "Whether the server is addressed by IP address or hostname",
        )
        .update_exempt(),
        FieldSpec::text(
            "address_version",
            "address-version",
            "Internet Protocol version",
        )
        .update_exempt(),
        FieldSpec::text("ip_address", "ip-address", "Server IP address"),
        FieldSpec::text("hostname", "hostname", "Server hostname"),
        FieldSpec::text("port", "port", "Server port"),
        FieldSpec::text(
            "status",
            "status",
            "In Service, Out of Service Maintenance, Out of Service Sticky or Out of Service All",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
        FieldSpec::text(
            "resolved_ips",
            "resolved-ips",
            "Addresses the hostname resolved to",
        ),
    ],
    sub_resources: &[
        SubResourceSpec {
            name: "ssl_policy",
            key: "ssl-policy",
            fields: &[
                FieldSpec::text(
                    "enable_https",
                    "enable-https",
                    "Use HTTPS towards the server",
                ),
                FieldSpec::text("enable_sni", "enable-sni", "Send server name indication"),
                FieldSpec::text(
                    "enable_ssl_compatibility_mode",
                    "enable-ssl-compatibility-mode",
                    "Enable SSL compatibility mode",
                ),
                FieldSpec::text(
                    "validate_certificate",
                    "validate-certificate",
                    "Validate the server certificate",
                ),
                FieldSpec::text(
                    "client_certificate",
                    "client-certificate",
                    "Client certificate presented to the server",
                ),
                FieldSpec::text("enable_ssl_3", "enable-ssl-3", "Allow SSL 3.0"),
                FieldSpec::text("enable_tls_1", "enable-tls-1", "Allow TLS 1.0"),
                FieldSpec::text("enable_tls_1_1", "enable-tls-1-1", "Allow TLS 1.1"),
                FieldSpec::text("enable_tls_1_2", "enable-tls-1-2", "Allow TLS 1.2"),
                FieldSpec::text("enable_tls_1_3", "enable-tls-1-3", "Allow TLS 1.3"),
            ],
        },
        SubResourceSpec {
            name: "load_balancing",
            key: "load-balancing",
            fields: &[
                FieldSpec::text("weight", "weight", "Weight for weighted algorithms"),
                FieldSpec::text(
                    "backup_server",
                    "backup-server",
                    "Use only when all other servers are down",
                ),
            ],
        },
        SubResourceSpec {
            name: "connection_pooling",
            key: "connection-pooling",
            fields: &[
                FieldSpec::text(
                    "enable_connection_pooling",
                    "enable-connection-pooling",
                    "Reuse back-end connections",
                ),
                FieldSpec::text(
                    "keepalive_timeout",
                    "keepalive-timeout",
                    "Idle pooled connection timeout in milliseconds",
                ),
            ],
        },
        SubResourceSpec {
            name: "application_layer_health_checks",
            key: "application-layer-health-checks",
            fields: &[
                FieldSpec::text("method", "method", "HTTP method of the health check"),
                FieldSpec::text("url", "url", "URL requested by the health check"),
                FieldSpec::text("domain", "domain", "Host header sent by the health check"),
                FieldSpec::text("status_code", "status-code", "Expected status code"),
                FieldSpec::text(
                    "match_content_string",
                    "match-content-string",
                    "Content expected in the response",
                ),
                FieldSpec::list(
                    "additional_headers",
                    "additional-headers",
                    "Extra request headers",
                ),
            ],
        },
        SubResourceSpec {
            name: "out_of_band_health_checks",
            key: "out-of-band-health-checks",
            fields: &[
                FieldSpec::text(
                    "enable_oob_health_checks",
                    "enable-oob-health-checks",
                    "Enable out-of-band health checks",
                ),
                FieldSpec::text("interval", "interval", "Check interval in seconds"),
            ],
        },
        SubResourceSpec {
            name: "advanced_configuration",
            key: "advanced-configuration",
            fields: &[
                FieldSpec::text(
                    "max_connections",
                    "max-connections",
                    "Maximum concurrent connections",
                ),
                FieldSpec::text(
                    "max_spare_connections",
                    "max-spare-connections",
                    "Maximum idle connections kept open",
                ),
                FieldSpec::text(
                    "max_requests",
                    "max-requests",
                    "Maximum requests per connection",
                ),
                FieldSpec::text(
                    "max_keepalive_requests",
                    "max-keepalive-requests",
                    "Maximum keep-alive requests",
                ),
                FieldSpec::text(
                    "max_establishing_connections",
                    "max-establishing-connections",
                    "Maximum connections being established",
                ),
                FieldSpec::text("timeout", "timeout", "Connection timeout in milliseconds"),
                FieldSpec::text(
                    "client_impersonation",
                    "client-impersonation",
                    "Connect using the client source address",
                ),
                FieldSpec::text(
                    "source_ip_to_connect",
                    "source-ip-to-connect",
                    "Source address used towards the server",
                ),
            ],
        },
        SubResourceSpec {
            name: "in_band_health_checks",
            key: "in-band-health-checks",
            fields: &[
                FieldSpec::text(
                    "max_refused",
                    "max-refused",
                    "Refused connections before the server is marked down",
                ),
                FieldSpec::text(
                    "max_other_failure",
                    "max-other-failure",
                    "Other failures before the server is marked down",
                ),
                FieldSpec::text(
                    "max_http_errors",
                    "max-http-errors",
                    "HTTP errors before the server is marked down",
                ),
                FieldSpec::text(
                    "max_timeout_failure",
                    "max-timeout-failure",
                    "Timeouts before the server is marked down",
                ),
            ],
        },
    ],
};

pub static VSITES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_vsites",
    description: "A vsite grouping network interfaces and service groups",
    endpoint: Endpoint::new(&[Lit("vsites")]),
    fields: &[
        FieldSpec::text("name", "name", "Vsite name").required(),
        FieldSpec::text("active_on", "active-on", "Unit the vsite is active on"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static SERVICE_GROUPS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_service_groups",
    description: "A service group inside a vsite",
    endpoint: Endpoint::new(&[Lit("vsites"), Parent, Lit("service-groups")]),
    fields: &[
        FieldSpec::text("name", "name", "Service group name")
            .required(),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static CONTENT_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_content_rules",
    description: "A content rule routing matching requests to a dedicated server pool",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("content-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("url_match", "url-match", "URL pattern matched")
            .required(),
        FieldSpec::text("host_match", "host-match", "Host pattern matched")
            .required(),
        FieldSpec::text(
            "extended_match",
            "extended-match",
            "Extended match expression",
        ),
        FieldSpec::text(
            "extended_match_sequence",
            "extended-match-sequence",
            "Evaluation order of extended matches",
        ),
        FieldSpec::text("status", "status", "Enable or disable the rule"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text(
            "web_firewall_policy",
            "web-firewall-policy",
            "Security policy applied to matching requests",
        ),
        FieldSpec::text("app_id", "app-id", "Identifier used in logs and reports"),
        FieldSpec::text("access_log", "access-log", "Enable access logging"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[
        SubResourceSpec {
            name: "load_balancing",
            key: "load-balancing",
            fields: &[
                FieldSpec::text("lb_algorithm", "lb-algorithm", "Balancing algorithm"),
                FieldSpec::text(
                    "persistence_method",
                    "persistence-method",
                    "Session persistence method",
                ),
                FieldSpec::text(
                    "persistence_cookie_name",
                    "persistence-cookie-name",
                    "Persistence cookie name",
                ),
                FieldSpec::text(
                    "persistence_idle_timeout",
                    "persistence-idle-timeout",
                    "Persistence idle timeout in seconds",
                ),
                FieldSpec::text("failover_method", "failover-method", "Failover behaviour"),
            ],
        },
        SubResourceSpec {
            name: "caching",
            key: "caching",
            fields: &[
                FieldSpec::text("status", "status", "Enable response caching"),
                FieldSpec::list(
                    "file_extensions",
                    "file-extensions",
                    "Cacheable file extensions",
                ),
                FieldSpec::text("max_size", "max-size", "Largest cacheable object in KB"),
                FieldSpec::text("expiry_age", "expiry-age", "Cache expiry in minutes"),
            ],
        },
    ],
};

pub static CONTENT_RULE_SERVERS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_content_rule_servers",
    description: "A back-end server in a content rule's pool",
    endpoint: Endpoint::new(&[
        Lit("services"),
        Parent,
        Lit("content-rules"),
        Parent,
        Lit("content-rule-servers"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "Server name").required(),
        FieldSpec::text(
            "identifier",
            "identifier",
            "Whether the server is addressed by IP address or hostname",
        )
        .update_exempt(),
        FieldSpec::text(
            "address_version",
            "address-version",
            "Internet Protocol version",
        )
        .update_exempt(),
        FieldSpec::text("ip_address", "ip-address", "Server IP address"),
        FieldSpec::text("hostname", "hostname", "Server hostname"),
        FieldSpec::text("port", "port", "Server port"),
        FieldSpec::text("status", "status", "Server status"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[
        SubResourceSpec {
            name: "ssl_policy",
            key: "ssl-policy",
            fields: &[
                FieldSpec::text(
                    "enable_https",
                    "enable-https",
                    "Use HTTPS towards the server",
                ),
                FieldSpec::text("enable_sni", "enable-sni", "Send server name indication"),
                FieldSpec::text(
                    "validate_certificate",
                    "validate-certificate",
                    "Validate the server certificate",
                ),
                FieldSpec::text(
                    "client_certificate",
                    "client-certificate",
                    "Client certificate presented to the server",
                ),
                FieldSpec::text("enable_tls_1_2", "enable-tls-1-2", "Allow TLS 1.2"),
                FieldSpec::text("enable_tls_1_3", "enable-tls-1-3", "Allow TLS 1.3"),
            ],
        },
        SubResourceSpec {
            name: "load_balancing",
            key: "load-balancing",
            fields: &[
                FieldSpec::text("weight", "weight", "Weight for weighted algorithms"),
                FieldSpec::text(
                    "backup_server",
                    "backup-server",
                    "Use only when all other servers are down",
                ),
            ],
        },
        SubResourceSpec {
            name: "connection_pooling",
            key: "connection-pooling",
            fields: &[
                FieldSpec::text(
                    "enable_connection_pooling",
                    "enable-connection-pooling",
                    "Reuse back-end connections",
                ),
                FieldSpec::text(
                    "keepalive_timeout",
                    "keepalive-timeout",
                    "Idle pooled connection timeout in milliseconds",
                ),
            ],
        },
    ],
};

pub static PREFERRED_CLIENTS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_preferred_clients",
    description: "A client range favoured during rate control",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("preferred-clients")]),
    fields: &[
        FieldSpec::text("name", "name", "Preferred client name")
            .required(),
        FieldSpec::text("ip_range", "ip-range", "Client IP range")
            .required(),
        FieldSpec::text("status", "status", "Enable or disable the entry"),
        FieldSpec::text("weight", "weight", "Priority weight"),
    ],
    sub_resources: &[],
};
