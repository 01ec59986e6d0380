//! Custom pattern groups and the regular-expression patterns inside them

use super::Segment::{Lit, Parent};
use super::{Endpoint, FieldSpec, ResourceDescriptor};

pub static ATTACK_TYPES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_attack_types",
    description: "A custom attack type group",
    endpoint: Endpoint::new(&[Lit("attack-types")]),
    fields: &[
        FieldSpec::text("name", "name", "Group name").required(),
    ],
    sub_resources: &[],
};

pub static ATTACK_PATTERNS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_attack_patterns",
    description: "A pattern in a custom attack type group",
    endpoint: Endpoint::new(&[Lit("attack-types"), Parent, Lit("attack-patterns")]),
    fields: &[
        FieldSpec::text("name", "name", "Pattern name").required(),
        FieldSpec::text("regex", "regex", "Regular expression matched")
            .required(),
        FieldSpec::text("algorithm", "algorithm", "Matching algorithm"),
        FieldSpec::text("case_sensitive", "case-sensitive", "Match case-sensitively"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text("status", "status", "Enable or disable the pattern"),
        FieldSpec::text("description", "description", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static INPUT_TYPES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_input_types",
    description: "A custom input type group",
    endpoint: Endpoint::new(&[Lit("input-types")]),
    fields: &[
        FieldSpec::text("name", "name", "Group name").required(),
    ],
    sub_resources: &[],
};

pub static INPUT_PATTERNS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_input_patterns",
    description: "A pattern in a custom input type group",
    endpoint: Endpoint::new(&[Lit("input-types"), Parent, Lit("input-patterns")]),
    fields: &[
        FieldSpec::text("name", "name", "Pattern name").required(),
        FieldSpec::text("regex", "regex", "Regular expression matched")
            .required(),
        FieldSpec::text("algorithm", "algorithm", "Matching algorithm"),
        FieldSpec::text("case_sensitive", "case-sensitive", "Match case-sensitively"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text("status", "status", "Enable or disable the pattern"),
        FieldSpec::text("description", "description", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static IDENTITY_TYPES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_identity_types",
    description: "A custom identity theft type group",
    endpoint: Endpoint::new(&[Lit("identity-types")]),
    fields: &[
        FieldSpec::text("name", "name", "Group name").required(),
    ],
    sub_resources: &[],
};

pub static IDENTITY_THEFT_PATTERNS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_identity_theft_patterns",
    description: "A pattern in a custom identity theft type group",
    endpoint: Endpoint::new(&[
        Lit("identity-types"),
        Parent,
        Lit("identity-theft-patterns"),
    ]),
    fields: &[
        FieldSpec::text("name", "name", "Pattern name").required(),
        FieldSpec::text("regex", "regex", "Regular expression matched")
            .required(),
        FieldSpec::text("algorithm", "algorithm", "Matching algorithm"),
        FieldSpec::text("case_sensitive", "case-sensitive", "Match case-sensitively"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text("status", "status", "Enable or disable the pattern"),
        FieldSpec::text("description", "description", "Free-form description"),
    ],
    sub_resources: &[],
};

pub static BOT_SPAM_TYPES: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_bot_spam_types",
    description: "A custom bot spam type group",
    endpoint: Endpoint::new(&[Lit("bot-spam-types")]),
    fields: &[
        FieldSpec::text("name", "name", "Group name").required(),
    ],
    sub_resources: &[],
};

pub static BOT_SPAM_PATTERNS: ResourceDescriptor = ResourceDescriptor {
    type_name: "barracudawaf_bot_spam_patterns",
    description: "A pattern in a custom bot spam type group",
    endpoint: Endpoint::new(&[Lit("bot-spam-types"), Parent, Lit("bot-spam-patterns")]),
    fields: &[
        FieldSpec::text("name", "name", "Pattern name").required(),
        FieldSpec::text("regex", "regex", "Regular expression matched")
            .required(),
        FieldSpec::text("algorithm", "algorithm", "Matching algorithm"),
        FieldSpec::text("case_sensitive", "case-sensitive", "Match case-sensitively"),
        FieldSpec::text("mode", "mode", "Passive or Active"),
        FieldSpec::text("status", "status", "Enable or disable the pattern"),
        FieldSpec::text("description", "description", "Free-form description"),
    ],
    sub_resources: &[],
};
