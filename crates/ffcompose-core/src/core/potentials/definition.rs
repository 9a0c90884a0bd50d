use super::PotentialKind;
use super::capabilities::Capability;
use crate::core::handler::compat::CompatibilityPolicy;
use crate::core::schema::{AttributeDescriptor, Schema, SchemaError};

/// Everything the handler machinery needs to know about one potential kind.
#[derive(Debug)]
pub struct PotentialDefinition {
    pub kind: PotentialKind,
    pub capabilities: Vec<&'static str>,
    pub global_schema: Schema,
    pub record_schema: Schema,
    pub policy: CompatibilityPolicy,
    pub dependencies: &'static [&'static str],
}

impl PotentialDefinition {
    /// Assembles a definition from the capabilities the kind opts into plus
    /// its own global attributes, record attributes and merge policy.
    pub fn compose(
        kind: PotentialKind,
        record_label: &'static str,
        capabilities: Vec<Capability>,
        own_attributes: Vec<AttributeDescriptor>,
        own_policy: CompatibilityPolicy,
        record_attributes: Vec<AttributeDescriptor>,
        dependencies: &'static [&'static str],
    ) -> Result<Self, SchemaError> {
        let mut names = Vec::with_capacity(capabilities.len());
        let mut globals = Vec::new();
        let mut policy = CompatibilityPolicy::new();
        for capability in capabilities {
            names.push(capability.name);
            globals.extend(capability.attributes);
            policy = policy.extend(capability.policy);
        }
        globals.extend(own_attributes);
        policy = policy.extend(own_policy);

        Ok(Self {
            kind,
            capabilities: names,
            global_schema: Schema::new(kind.tag(), globals)?,
            record_schema: Schema::new(record_label, record_attributes)?,
            policy,
            dependencies,
        })
    }
}
