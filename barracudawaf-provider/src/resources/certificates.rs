//! Certificates: generated, issued by Let's Encrypt, and trusted

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor};

pub static SELF_SIGNED_CERTIFICATES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_self_signed_certificates",
    description: "A certificate generated and self-signed on the appliance",
    endpoint: Endpoint::new(&[Lit("certificates")]).create_at("self-signed-certificate"),
    fields: &[
        FieldSpec::text("name", "name", "Certificate name")
            .required(),
        FieldSpec::text("common_name", "common-name", "Subject common name")
            .required()
            .update_exempt(),
        FieldSpec::text("country_code", "country-code", "Subject country")
            .required()
            .update_exempt(),
        FieldSpec::text("state", "state", "Subject state or province")
            .required()
            .update_exempt(),
        FieldSpec::text("city", "city", "Subject locality")
            .required()
            .update_exempt(),
        FieldSpec::text(
            "organization_name",
            "organization-name",
            "Subject organization",
        )
        .required()
        .update_exempt(),
        FieldSpec::text(
            "organizational_unit",
            "organizational-unit",
            "Subject organizational unit",
        )
        .update_exempt(),
        FieldSpec::text("key_type", "key-type", "RSA or ECDSA")
            .update_exempt(),
        FieldSpec::text("key_size", "key-size", "RSA key size")
            .update_exempt(),
        FieldSpec::text("curve_type", "curve-type", "ECDSA curve")
            .update_exempt(),
        FieldSpec::list(
            "san_certificate",
            "san-certificate",
            "Subject alternative names",
        )
        .update_exempt(),
        FieldSpec::text(
            "allow_private_key_export",
            "allow-private-key-export",
            "Allow exporting the private key",
        ),
    ],
    sub_resources: &[],
};

pub static LETSENCRYPT_CERTIFICATES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_letsencrypt_certificates",
    description: "A certificate issued through Let's Encrypt",
    endpoint: Endpoint::new(&[Lit("certificates")]).create_at("letsencrypt-certificate"),
    fields: &[
        FieldSpec::text("name", "name", "Certificate name")
            .required(),
        FieldSpec::text(
            "common_name",
            "common-name",
            "Domain the certificate is issued for",
        )
        .required()
        .update_exempt(),
        FieldSpec::list(
            "multi_cert_domains",
            "multi-cert-domains",
            "Additional domains on the certificate",
        )
        .update_exempt(),
        FieldSpec::text(
            "auto_renew_cert",
            "auto-renew-cert",
            "Renew the certificate automatically",
        ),
        FieldSpec::text(
            "schedule_renewal_day",
            "schedule-renewal-day",
            "Days before expiry the renewal runs",
        ),
        FieldSpec::text(
            "allow_private_key_export",
            "allow-private-key-export",
            "Allow exporting the private key",
        ),
    ],
    sub_resources: &[],
};

pub static TRUSTED_CA_CERTIFICATES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_trusted_ca_certificates",
    description: "A CA certificate used to verify clients",
    endpoint: Endpoint::new(&[Lit("trusted-ca-certificate")]),
    fields: &[
        FieldSpec::text("name", "name", "Certificate name")
            .required(),
        FieldSpec::text("certificate", "certificate", "PEM encoded certificate")
            .required()
            .update_exempt(),
    ],
    sub_resources: &[],
};

pub static TRUSTED_SERVER_CERTIFICATES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_trusted_server_certificates",
    description: "A certificate used to verify back-end servers",
    endpoint: Endpoint::new(&[Lit("trusted-server-certificate")]),
    fields: &[
        FieldSpec::text("name", "name", "Certificate name")
            .required(),
        FieldSpec::text("certificate", "certificate", "PEM encoded certificate")
            .required()
            .update_exempt(),
    ],
    sub_resources: &[],
};

pub static CLIENT_CERTIFICATE_CRLS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_client_certificate_crls",
    description: "A revocation list consulted for client certificates",
    endpoint: Endpoint::new(&[
        Lit("trusted-ca-certificate"),
        Parent,
        Lit("client-certificate-crls"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "CRL name").required(),
        FieldSpec::text("url", "url", "Location the CRL is fetched from")
            .required(),
        FieldSpec::text(
            "enable_auto_update",
            "enable-auto-update",
            "Refresh the CRL periodically",
        ),
        FieldSpec::text(
            "auto_update_type",
            "auto-update-type",
            "Daily, Weekly or Monthly",
        ),
        FieldSpec::text("day_of_week", "day-of-week", "Weekday of weekly updates"),
        FieldSpec::text("date_of_month", "date-of-month", "Day of monthly updates"),
        FieldSpec::text("time_of_day", "time-of-day", "Hour of the update"),
    ],
    sub_resources: &[],
};
