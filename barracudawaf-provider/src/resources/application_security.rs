//! Per-service request inspection: URL and parameter profiles, ACLs and rewrite rules

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor};

pub static URL_PROFILES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_url_profiles",
    description: "A URL profile describing allowed requests for a URL space",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("url-profiles")]),
    fields: &[
        FieldSpec::text("name", "name", "Profile name").required(),
        FieldSpec::text("url", "url", "URL the profile applies to")
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
        FieldSpec::text("status", "status", "Enable or disable the profile"),
        FieldSpec::text("mode", "mode", "Learning, Passive or Active"),
        FieldSpec::list("allowed_methods", "allowed-methods", "HTTP methods allowed"),
        FieldSpec::list(
            "allowed_content_types",
            "allowed-content-types",
            "Content types allowed in request bodies",
        ),
        FieldSpec::text(
            "max_content_length",
            "max-content-length",
            "Largest request body in bytes",
        ),
        FieldSpec::text(
            "allow_query_string",
            "allow-query-string",
            "Allow a query string",
        ),
        FieldSpec::text(
            "hidden_parameter_protection",
            "hidden-parameter-protection",
            "Protect hidden form parameters",
        ),
        FieldSpec::text("csrf_prevention", "csrf-prevention", "CSRF protection mode"),
        FieldSpec::list(
            "exception_patterns",
            "exception-patterns",
            "Patterns exempted from attack detection",
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
            "referrers_for_the_url_profile",
            "referrers-for-the-url-profile",
            "Referrers allowed",
        ),
        FieldSpec::text("comment", "comment", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static PARAMETER_PROFILES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_parameter_profiles",
    description: "A parameter profile within a URL profile",
    endpoint: Endpoint::new(&[
        Lit("services"),
        Parent,
        Lit("url-profiles"),
        Parent,
        Lit("parameter-profiles"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "Profile name").required(),
        FieldSpec::text("parameter", "parameter", "Parameter name matched")
            .required(),
        FieldSpec::text(
            "type",
            "type",
            "Parameter type (Input, Read-only, Session Choice, Global Choice, ...)",
        ),
        FieldSpec::text("status", "status", "Enable or disable the profile"),
        FieldSpec::list("values", "values", "Allowed values for choice parameters"),
        FieldSpec::text("max_length", "max-length", "Longest value accepted"),
        FieldSpec::text(
            "required",
            "required",
            "Reject requests without the parameter",
        ),
        FieldSpec::text("ignore", "ignore", "Skip validation of this parameter"),
        FieldSpec::text(
            "parameter_class",
            "parameter-class",
            "Input type class of the value",
        ),
        FieldSpec::text(
            "base64_decode_parameter_value",
            "base64-decode-parameter-value",
            "Decode base64 values before inspection",
        ),
        FieldSpec::text(
            "maximum_instances",
            "maximum-instances",
            "Maximum occurrences per request",
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
            "exception_patterns",
            "exception-patterns",
            "Patterns exempted from attack detection",
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
        FieldSpec::text(
            "validate_parameter_name",
            "validate-parameter-name",
            "Validate the parameter name",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static URL_ACLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_url_acls",
    description: "An access control rule on URL and host",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("url-acls")]),
    fields: &[
        FieldSpec::text("name", "name", "ACL name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
            .required(),
        FieldSpec::text(
            "action",
            "action",
            "Allow, Process, Deny and Log, Deny with no Log, Redirect, Temporary Redirect",
        ),
        FieldSpec::text("status", "status", "Enable or disable the ACL"),
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
            "deny_response",
            "deny-response",
            "Response sent when denying",
        ),
        FieldSpec::text(
            "response_page",
            "response-page",
            "Response page sent when denying",
        ),
        FieldSpec::text("redirect_url", "redirect-url", "Target of redirect actions"),
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

pub static HEADER_ACLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_header_acls",
    description: "An access control rule on a request header",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("header-acls")]),
    fields: &[
        FieldSpec::text("name", "name", "ACL name").required(),
        FieldSpec::text("header_name", "header-name", "Header inspected")
            .required(),
        FieldSpec::text("status", "status", "Enable or disable the ACL"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text(
            "max_header_value_length",
            "max-header-value-length",
            "Longest header value accepted",
        ),
        FieldSpec::text(
            "denied_metachars",
            "denied-metachars",
            "Metacharacters rejected in the value",
        ),
        FieldSpec::list(
            "exception_patterns",
            "exception-patterns",
            "Patterns exempted from attack detection",
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
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static ALLOW_DENY_CLIENTS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_allow_deny_clients",
    description: "A client certificate allow/deny rule",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("allow-deny-clients")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("sequence", "sequence", "Evaluation order")
            .required(),
        FieldSpec::text("action", "action", "Allow or Deny"),
        FieldSpec::text("status", "status", "Enable or disable the rule"),
        FieldSpec::text(
            "certificate_serial",
            "certificate-serial",
            "Certificate serial number matched",
        ),
        FieldSpec::text(
            "common_name",
            "common-name",
            "Certificate common name matched",
        ),
        FieldSpec::text("country", "country", "Certificate country matched"),
        FieldSpec::text("locality", "locality", "Certificate locality matched"),
        FieldSpec::text(
            "organization",
            "organization",
            "Certificate organization matched",
        ),
        FieldSpec::text(
            "organizational_unit",
            "organizational-unit",
            "Certificate organizational unit matched",
        ),
        FieldSpec::text("state", "state", "Certificate state matched"),
    ],
    sub_resources: &[],
};

pub static URL_TRANSLATIONS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_url_translations",
    description: "An inside/outside URL translation rule",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("url-translations")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("inside_url", "inside-url", "URL as seen by the servers")
            .required(),
        FieldSpec::text("outside_url", "outside-url", "URL as seen by clients")
            .required(),
        FieldSpec::text(
            "alternate_hostname",
            "alternate-hostname",
            "Host name rewritten alongside the URL",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static URL_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_url_policies",
    description: "A URL policy enabling per-URL protections",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("url-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Policy name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
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
        FieldSpec::text("status", "status", "Enable or disable the policy"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text(
            "data_theft_protection",
            "data-theft-protection",
            "Enable data theft protection",
        ),
        FieldSpec::text(
            "parameter_protection",
            "parameter-protection",
            "Enable parameter protection",
        ),
        FieldSpec::text(
            "web_scraping_policy",
            "web-scraping-policy",
            "Web scraping policy applied",
        ),
        FieldSpec::text(
            "rate_control_pool",
            "rate-control-pool",
            "Rate control pool applied",
        ),
        FieldSpec::text(
            "counting_criterion",
            "counting-criterion",
            "Rate control counting criterion",
        ),
        FieldSpec::text(
            "enable_virus_scan",
            "enable-virus-scan",
            "Scan uploads for viruses",
        ),
        FieldSpec::text(
            "enable_batd_scan",
            "enable-batd-scan",
            "Scan uploads with Advanced Threat Protection",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static URL_ENCRYPTION_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_url_encryption_rules",
    description: "A rule encrypting URLs in responses",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("url-encryption-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
            .required(),
        FieldSpec::text("status", "status", "Enable or disable the rule"),
        FieldSpec::list("exclude_urls", "exclude-urls", "URLs left unencrypted"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static HTTP_REQUEST_REWRITE_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_http_request_rewrite_rules",
    description: "A request header or URL rewrite rule",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("http-request-rewrite-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("sequence_number", "sequence-number", "Evaluation order")
            .required(),
        FieldSpec::text(
            "action",
            "action",
            "Insert Header, Remove Header, Rewrite Header, Rewrite URL, Redirect URL",
        )
        .required(),
        FieldSpec::text("header", "header", "Header operated on"),
        FieldSpec::text("old_value", "old-value", "Value replaced"),
        FieldSpec::text("rewrite_value", "rewrite-value", "Replacement value"),
        FieldSpec::text("condition", "condition", "Condition expression"),
        FieldSpec::text(
            "continue_processing",
            "continue-processing",
            "Evaluate further rules after a match",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static HTTP_RESPONSE_REWRITE_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_http_response_rewrite_rules",
    description: "A response header rewrite rule",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("http-response-rewrite-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("sequence_number", "sequence-number", "Evaluation order")
            .required(),
        FieldSpec::text(
            "action",
            "action",
            "Insert Header, Remove Header, Rewrite Header",
        )
        .required(),
        FieldSpec::text("header", "header", "Header operated on"),
        FieldSpec::text("old_value", "old-value", "Value replaced"),
        FieldSpec::text("rewrite_value", "rewrite-value", "Replacement value"),
        FieldSpec::text("condition", "condition", "Condition expression"),
        FieldSpec::text(
            "continue_processing",
            "continue-processing",
            "Evaluate further rules after a match",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static RESPONSE_BODY_REWRITE_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_response_body_rewrite_rules",
    description: "A search and replace rule on response bodies",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("response-body-rewrite-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("sequence_number", "sequence-number", "Evaluation order")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
            .required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("search_string", "search-string", "Text searched for")
            .required(),
        FieldSpec::text("replace_string", "replace-string", "Replacement text"),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static JSON_PROFILES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_json_profiles",
    description: "A JSON profile validating JSON request bodies",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("json-profiles")]),
    fields: &[
        FieldSpec::text("name", "name", "Profile name").required(),
        FieldSpec::text("host_match", "host-match", "Host pattern matched")
            .required(),
        FieldSpec::text("url_match", "url-match", "URL pattern matched")
            .required(),
        FieldSpec::list("method", "method", "HTTP methods inspected"),
        FieldSpec::text("json_policy", "json-policy", "JSON security policy applied"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text("status", "status", "Enable or disable the profile"),
        FieldSpec::text(
            "validate_key",
            "validate-key",
            "Validate keys against key profiles",
        ),
        FieldSpec::list(
            "allowed_content_types",
            "allowed-content-types",
            "Content types treated as JSON",
        ),
        FieldSpec::list(
            "exception_patterns",
            "exception-patterns",
            "Patterns exempted from attack detection",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static JSON_KEY_PROFILES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_json_key_profiles",
    description: "A key profile within a JSON profile",
    endpoint: Endpoint::new(&[
        Lit("services"),
        Parent,
        Lit("json-profiles"),
        Parent,
        Lit("json-key-profiles"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "Profile name").required(),
        FieldSpec::text("key", "key", "JSON key matched").required(),
        FieldSpec::text("value_type", "value-type", "Expected value type"),
        FieldSpec::text("max_length", "max-length", "Longest value accepted"),
        FieldSpec::text("allow_null", "allow-null", "Accept null values"),
        FieldSpec::text("status", "status", "Enable or disable the profile"),
        FieldSpec::text("validate_key", "validate-key", "Validate the key name"),
        FieldSpec::list(
            "exception_patterns",
            "exception-patterns",
            "Patterns exempted from attack detection",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static DDOS_POLICIES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_ddos_policies",
    description: "A DDoS policy issuing CAPTCHA challenges to suspicious clients",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("ddos-policies")]),
    fields: &[
        FieldSpec::text("name", "name", "Policy name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
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
            "evaluate_clients",
            "evaluate-clients",
            "Client evaluation mode",
        ),
        FieldSpec::text(
            "enforce_captcha",
            "enforce-captcha",
            "Challenge clients with a CAPTCHA",
        ),
        FieldSpec::text(
            "expiry_time",
            "expiry-time",
            "Validity of a solved challenge in seconds",
        ),
        FieldSpec::text(
            "max_captcha_attempts",
            "max-captcha-attempts",
            "CAPTCHA attempts allowed",
        ),
        FieldSpec::text(
            "max_unanswered_captcha",
            "max-unanswered-captcha",
            "Unanswered challenges allowed",
        ),
        FieldSpec::text("comments", "comments", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static ADAPTIVE_PROFILING_RULES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_adaptive_profiling_rules",
    description: "A rule scoping adaptive profile learning",
    endpoint: Endpoint::new(&[Lit("services"), Parent, Lit("adaptive-profiling-rules")]),
    fields: &[
        FieldSpec::text("name", "name", "Rule name").required(),
        FieldSpec::text("url", "url", "URL pattern matched")
            .required(),
        FieldSpec::text("host", "host", "Host pattern matched")
            .required(),
        FieldSpec::text("status", "status", "Enable or disable the rule"),
        FieldSpec::text(
            "learn_from_request",
            "learn-from-request",
            "Learn from requests",
        ),
        FieldSpec::text(
            "learn_from_response",
            "learn-from-response",
            "Learn from responses",
        ),
    ],
    sub_resources: &[],
};
