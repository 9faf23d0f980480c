//! Pipelines shipped with the binary.

use fixture_core::{FixtureSchema, SchemaError};

/// A pipeline schema embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPipeline {
    pub name: &'static str,
    pub description: &'static str,
    yaml: &'static str,
}

impl BuiltinPipeline {
    /// Parse and validate the embedded schema.
    pub fn schema(&self) -> Result<FixtureSchema, SchemaError> {
        FixtureSchema::from_yaml(self.yaml)
    }
}

pub const BUILTIN_PIPELINES: &[BuiltinPipeline] = &[
    BuiltinPipeline {
        name: "schools",
        description: "Schools survey: schools, participants, responses, lab results and visits",
        yaml: include_str!("../pipelines/schools.yaml"),
    },
    BuiltinPipeline {
        name: "households",
        description: "Households survey: lab bloods and swabs, survey versions v0 to v2",
        yaml: include_str!("../pipelines/households.yaml"),
    },
];

/// Look up a built-in pipeline by name.
pub fn find(name: &str) -> Option<&'static BuiltinPipeline> {
    BUILTIN_PIPELINES.iter().find(|p| p.name == name)
}

pub fn names() -> Vec<&'static str> {
    BUILTIN_PIPELINES.iter().map(|p| p.name).collect()
}
