//! Security policies and appliance-wide protection settings

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor, SubResourceSpec};

pub static SECURITY_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_security_policies",
    description: "A security policy shared by services",
    endpoint: Endpoint::new(&[Lit("security-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Policy name").required(),
        FieldSpec::text("based_on", "based-on", "Policy the new one is cloned from")
            .update_exempt(),
    ],
    sub_resources: &[
        SubResourceSpec {
            name: "request_limits",
            key: "request-limits",
            fields: &[
                FieldSpec::text("enable", "enable", "Enforce request limits"),
                FieldSpec::text(
                    "max_request_length",
                    "max-request-length",
                    "Longest request in bytes",
                ),
                FieldSpec::text(
                    "max_request_line_length",
                    "max-request-line-length",
                    "Longest request line in bytes",
                ),
                FieldSpec::text("max_url_length", "max-url-length", "Longest URL in bytes"),
                FieldSpec::text(
                    "max_query_length",
                    "max-query-length",
                    "Longest query string in bytes",
                ),
                FieldSpec::text(
                    "max_number_of_cookies",
                    "max-number-of-cookies",
                    "Most cookies per request",
                ),
                FieldSpec::text(
                    "max_cookie_name_length",
                    "max-cookie-name-length",
                    "Longest cookie name",
                ),
                FieldSpec::text(
                    "max_cookie_value_length",
                    "max-cookie-value-length",
                    "Longest cookie value",
                ),
                FieldSpec::text(
                    "max_number_of_headers",
                    "max-number-of-headers",
                    "Most headers per request",
                ),
                FieldSpec::text(
                    "max_header_name_length",
                    "max-header-name-length",
                    "Longest header name",
                ),
                FieldSpec::text(
                    "max_header_value_length",
                    "max-header-value-length",
                    "Longest header value",
                ),
            ],
        },
        SubResourceSpec {
            name: "url_normalization",
            key: "url-normalization",
            fields: &[
                FieldSpec::text(
                    "default_charset",
                    "default-charset",
                    "Character set assumed for requests",
                ),
                FieldSpec::text(
                    "detect_response_charset",
                    "detect-response-charset",
                    "Detect the response character set",
                ),
                FieldSpec::text(
                    "normalize_special_chars",
                    "normalize-special-chars",
                    "Normalize special characters",
                ),
                FieldSpec::text(
                    "apply_double_decoding",
                    "apply-double-decoding",
                    "Decode URLs twice",
                ),
                FieldSpec::text(
                    "parameter_separators",
                    "parameter-separators",
                    "Parameter separators recognized",
                ),
            ],
        },
        SubResourceSpec {
            name: "url_protection",
            key: "url-protection",
            fields: &[
                FieldSpec::text("enable", "enable", "Enable URL protection"),
                FieldSpec::list("allowed_methods", "allowed-methods", "HTTP methods allowed"),
                FieldSpec::list(
                    "allowed_content_types",
                    "allowed-content-types",
                    "Content types allowed",
                ),
                FieldSpec::text(
                    "max_content_length",
                    "max-content-length",
                    "Largest request body in bytes",
                ),
                FieldSpec::text(
                    "max_parameters",
                    "max-parameters",
                    "Most parameters per request",
                ),
                FieldSpec::text(
                    "max_upload_files",
                    "max-upload-files",
                    "Most uploaded files per request",
                ),
                FieldSpec::text(
                    "max_parameter_name_length",
                    "max-parameter-name-length",
                    "Longest parameter name",
                ),
                FieldSpec::text("csrf_prevention", "csrf-prevention", "CSRF protection mode"),
                FieldSpec::list(
                    "blocked_attack_types",
                    "blocked-attack-types",
                    "Attack types blocked",
                ),
                FieldSpec::list(
                    "custom_blocked_attack_types",
                    "custom-blocked-attack-types",
                    "Custom attack types blocked",
                ),
                FieldSpec::list(
                    "exception_patterns",
                    "exception-patterns",
                    "Patterns exempted from attack detection",
                ),
            ],
        },
        SubResourceSpec {
            name: "parameter_protection",
            key: "parameter-protection",
            fields: &[
                FieldSpec::text("enable", "enable", "Enable parameter protection"),
                FieldSpec::text(
                    "denied_metacharacters",
                    "denied-metacharacters",
                    "Metacharacters rejected in values",
                ),
                FieldSpec::text(
                    "maximum_parameter_value_length",
                    "maximum-parameter-value-length",
                    "Longest parameter value",
                ),
                FieldSpec::text(
                    "maximum_instances",
                    "maximum-instances",
                    "Most occurrences of one parameter",
                ),
                FieldSpec::text(
                    "maximum_upload_file_size",
                    "maximum-upload-file-size",
                    "Largest uploaded file in KB",
                ),
                FieldSpec::text(
                    "allowed_file_upload_type",
                    "allowed-file-upload-type",
                    "File upload check type",
                ),
                FieldSpec::list(
                    "file_upload_extensions",
                    "file-upload-extensions",
                    "Allowed upload extensions",
                ),
                FieldSpec::list(
                    "file_upload_mime_types",
                    "file-upload-mime-types",
                    "Allowed upload MIME types",
                ),
                FieldSpec::list(
                    "ignore_parameters",
                    "ignore-parameters",
                    "Parameters skipped",
                ),
                FieldSpec::list(
                    "blocked_attack_types",
                    "blocked-attack-types",
                    "Attack types blocked",
                ),
                FieldSpec::list(
                    "custom_blocked_attack_types",
                    "custom-blocked-attack-types",
                    "Custom attack types blocked",
                ),
                FieldSpec::list(
                    "exception_patterns",
                    "exception-patterns",
                    "Patterns exempted from attack detection",
                ),
                FieldSpec::text(
                    "base64_decode_parameter_value",
                    "base64-decode-parameter-value",
                    "Decode base64 values before inspection",
                ),
                FieldSpec::text(
                    "validate_parameter_name",
                    "validate-parameter-name",
                    "Validate parameter names",
                ),
            ],
        },
        SubResourceSpec {
            name: "cookie_security",
            key: "cookie-security",
            fields: &[
                FieldSpec::text(
                    "tamper_proof_mode",
                    "tamper-proof-mode",
                    "Cookie tamper proofing (Signed, Encrypted, None)",
                ),
                FieldSpec::text(
                    "cookie_max_age",
                    "cookie-max-age",
                    "Cookie lifetime in minutes",
                ),
                FieldSpec::text(
                    "cookie_replay_protection_type",
                    "cookie-replay-protection-type",
                    "Replay protection (IP, Custom Headers, IP and Custom Headers)",
                ),
                FieldSpec::list(
                    "custom_headers",
                    "custom-headers",
                    "Headers bound to the cookie",
                ),
                FieldSpec::text("secure_cookie", "secure-cookie", "Set the Secure flag"),
                FieldSpec::text("http_only", "http-only", "Set the HttpOnly flag"),
                FieldSpec::text("same_site", "same-site", "SameSite attribute"),
                FieldSpec::text(
                    "allow_unrecognized_cookies",
                    "allow-unrecognized-cookies",
                    "Handling of unrecognized cookies",
                ),
                FieldSpec::text(
                    "days_allowed",
                    "days-allowed",
                    "Days unrecognized cookies are allowed",
                ),
                FieldSpec::list(
                    "cookies_exempted",
                    "cookies-exempted",
                    "Cookies exempted from protection",
                ),
            ],
        },
        SubResourceSpec {
            name: "cloaking",
            key: "cloaking",
            fields: &[
                FieldSpec::text(
                    "suppress_return_code",
                    "suppress-return-code",
                    "Hide server error codes",
                ),
                FieldSpec::text(
                    "filter_response_header",
                    "filter-response-header",
                    "Remove identifying response headers",
                ),
                FieldSpec::list(
                    "headers_to_filter",
                    "headers-to-filter",
                    "Response headers removed",
                ),
                FieldSpec::list(
                    "return_codes_to_exempt",
                    "return-codes-to-exempt",
                    "Status codes not cloaked",
                ),
            ],
        },
        SubResourceSpec {
            name: "client_profile",
            key: "client-profile",
            fields: &[
                FieldSpec::text("status", "status", "Enable client risk scoring"),
                FieldSpec::text(
                    "high_risk_score",
                    "high-risk-score",
                    "Score above which a client is high risk",
                ),
                FieldSpec::text(
                    "medium_risk_score",
                    "medium-risk-score",
                    "Score above which a client is medium risk",
                ),
                FieldSpec::list(
                    "exception_client_fingerprints",
                    "exception-client-fingerprints",
                    "Fingerprints exempted from scoring",
                ),
            ],
        },
        SubResourceSpec {
            name: "tarpit_profile",
            key: "tarpit-profile",
            fields: &[
                FieldSpec::text(
                    "backlog_requests_limit",
                    "backlog-requests-limit",
                    "Requests queued per tarpitted client",
                ),
                FieldSpec::text(
                    "tarpit_inactivity_timeout",
                    "tarpit-inactivity-timeout",
                    "Idle time before a client leaves the tarpit",
                ),
            ],
        },
    ],
};

pub static ACTION_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_action_policies",
    description: "The response taken for one attack group in a security policy",
    endpoint: Endpoint::new(&[Lit("security-policies"), Parent, Lit("action-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Attack name").required(),
        FieldSpec::text("action", "action", "Protect and Log, Log Only, None"),
        FieldSpec::text(
            "deny_response",
            "deny-response",
            "Response sent when denying",
        ),
        FieldSpec::text(
            "response_page",
            "response-page",
            "Response page sent when denying",
        ),
        FieldSpec::text(
            "redirect_url",
            "redirect-url",
            "Target of redirect responses",
        ),
        FieldSpec::text(
            "follow_up_action",
            "follow-up-action",
            "Action taken after repeated violations",
        ),
        FieldSpec::text(
            "follow_up_action_time",
            "follow-up-action-time",
            "Follow-up action duration in seconds",
        ),
        FieldSpec::text("risk_score", "risk-score", "Risk score assigned"),
    ],
    sub_resources: &[],
};

pub static GLOBAL_ACLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_global_acls",
    description: "A URL ACL applied by every service using the policy",
    endpoint: Endpoint::new(&[Lit("security-policies"), Parent, Lit("global-acls")]),
    fields: &[
        FieldSpec::text("name", "name", "ACL name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
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
        FieldSpec::text(
            "action",
            "action",
            "Allow, Process, Deny and Log, Deny with no Log, Redirect",
        ),
        FieldSpec::text("redirect_url", "redirect-url", "Target of redirect actions"),
        FieldSpec::text(
            "response_page",
            "response-page",
            "Response page sent when denying",
        ),
        FieldSpec::text(
            "deny_response",
            "deny-response",
            "Response sent when denying",
        ),
        FieldSpec::text(
            "follow_up_action",
            "follow-up-action",
            "Action taken after repeated violations",
        ),
        FieldSpec::text(
            "follow_up_action_time",
            "follow-up-action-time",
            "Follow-up action duration in seconds",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static DATA_THEFT_PROTECTIONS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_data_theft_protections",
    description: "A sensitive data type masked in responses",
    endpoint: Endpoint::new(&[
        Lit("security-policies"),
        Parent,
        Lit("data-theft-protection"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "Element name").required(),
        FieldSpec::text("data_type", "data-type", "Identity theft type protected")
            .required(),
        FieldSpec::text(
            "custom_identity_theft_type",
            "custom-identity-theft-type",
            "Custom identity theft type protected",
        ),
        FieldSpec::text("enable", "enable", "Enable protection"),
        FieldSpec::text("action", "action", "Cloak or Block"),
        FieldSpec::text(
            "initial_characters_to_keep",
            "initial-characters-to-keep",
            "Leading characters left visible",
        ),
        FieldSpec::text(
            "trailing_characters_to_keep",
            "trailing-characters-to-keep",
            "Trailing characters left visible",
        ),
    ],
    sub_resources: &[],
};

pub static JSON_SECURITY_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_json_security_policies",
    description: "Limits applied to JSON request bodies",
    endpoint: Endpoint::new(&[Lit("json-security-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Policy name").required(),
        FieldSpec::text("max_keys", "max-keys", "Most keys per document"),
        FieldSpec::text("max_key_length", "max-key-length", "Longest key"),
        FieldSpec::text(
            "max_value_length",
            "max-value-length",
            "Longest string value",
        ),
        FieldSpec::text(
            "max_number_value",
            "max-number-value",
            "Largest numeric value",
        ),
        FieldSpec::text(
            "max_array_elements",
            "max-array-elements",
            "Most elements per array",
        ),
        FieldSpec::text("max_siblings", "max-siblings", "Most siblings per object"),
        FieldSpec::text(
            "max_tree_depth",
            "max-tree-depth",
            "Deepest nesting allowed",
        ),
        FieldSpec::text(
            "max_object_depth",
            "max-object-depth",
            "Deepest object nesting allowed",
        ),
    ],
    sub_resources: &[],
};

pub static WEB_SCRAPING_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_web_scraping_policies",
    description: "A policy detecting automated scraping",
    endpoint: Endpoint::new(&[Lit("web-scraping-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Policy name").required(),
        FieldSpec::text(
            "insert_hidden_links",
            "insert-hidden-links",
            "Insert hidden links in responses",
        ),
        FieldSpec::text(
            "insert_javascript_in_response",
            "insert-javascript-in-response",
            "Insert a JavaScript challenge",
        ),
        FieldSpec::text("insert_delay", "insert-delay", "Delay suspected bots"),
        FieldSpec::text("delay_time", "delay-time", "Delay in seconds"),
        FieldSpec::text(
            "detect_mouse_event",
            "detect-mouse-event",
            "Require mouse events",
        ),
        FieldSpec::list(
            "blacklisted_categories",
            "blacklisted-categories",
            "Bot categories denied",
        ),
        FieldSpec::list(
            "whitelisted_bots",
            "whitelisted-bots",
            "Bots always allowed",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static RATE_CONTROL_POOLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_rate_control_pools",
    description: "A pool limiting concurrent requests per client",
    endpoint: Endpoint::new(&[Lit("rate-control-pools")]),
    fields: &[
        FieldSpec::text("name", "name", "Pool name").required(),
        FieldSpec::text(
            "max_active_requests",
            "max-active-requests",
            "Most requests processed at once",
        ),
        FieldSpec::text(
            "max_per_client_backlog",
            "max-per-client-backlog",
            "Most queued requests per client",
        ),
        FieldSpec::text(
            "max_unconfigured_clients",
            "max-unconfigured-clients",
            "Most clients queued without a preferred entry",
        ),
    ],
    sub_resources: &[],
};

pub static RESPONSE_PAGES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_response_pages",
    description: "A custom page returned by deny actions",
    endpoint: Endpoint::new(&[Lit("response-pages")]),
    fields: &[
        FieldSpec::text("name", "name", "Page name").required(),
        FieldSpec::text(
            "type",
            "type",
            "Page type (Action Policy, Authentication, Captcha, ...)",
        )
        .update_exempt(),
        FieldSpec::text("status_code", "status-code", "HTTP status line sent"),
        FieldSpec::text("headers", "headers", "Response headers sent"),
        FieldSpec::text("body", "body", "Response body template"),
    ],
    sub_resources: &[],
};

pub static SESSION_IDENTIFIERS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_session_identifiers",
    description: "A token recognized as an application session identifier",
    endpoint: Endpoint::new(&[Lit("session-identifiers")]),
    fields: &[
        FieldSpec::text("name", "name", "Identifier name")
            .required(),
        FieldSpec::text(
            "token_type",
            "token-type",
            "Where the token appears (Request Header, Parameter, ...)",
        )
        .required(),
        FieldSpec::text("session_key", "session-key", "Name of the session token"),
        FieldSpec::text(
            "start_delimiter",
            "start-delimiter",
            "Text preceding the token value",
        ),
        FieldSpec::text(
            "end_delimiter",
            "end-delimiter",
            "Text following the token value",
        ),
    ],
    sub_resources: &[],
};

pub static CUSTOM_PARAMETER_CLASSES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_custom_parameter_classes",
    description: "A reusable class of parameter validations",
    endpoint: Endpoint::new(&[Lit("custom-parameter-classes")]),
    fields: &[
        FieldSpec::text("name", "name", "Class name").required(),
        FieldSpec::text(
            "input_type_validation",
            "input-type-validation",
            "Built-in input type the value must match",
        ),
        FieldSpec::text(
            "custom_input_type_validation",
            "custom-input-type-validation",
            "Custom input type the value must match",
        ),
        FieldSpec::text(
            "denied_metacharacters",
            "denied-metacharacters",
            "Metacharacters rejected in values",
        ),
        FieldSpec::list(
            "blocked_attack_types",
            "blocked-attack-types",
            "Attack types blocked",
        ),
        FieldSpec::list(
            "custom_blocked_attack_types",
            "custom-blocked-attack-types",
            "Custom attack types blocked",
        ),
    ],
    sub_resources: &[],
};
