use crate::core::potentials::PotentialKind;
use crate::core::schema::{AttributeError, AttributeSet, RawAttributes, RawValue, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Parameter record for {kind} has an empty environment key")]
    EmptyEnvironmentKey { kind: PotentialKind },

    #[error("Invalid parameter for environment '{environment_key}': {source}")]
    Attribute {
        environment_key: String,
        #[source]
        source: AttributeError,
    },
}

/// The coefficients one potential assigns to one chemical environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    kind: PotentialKind,
    environment_key: String,
    id: Option<String>,
    attributes: AttributeSet,
}

impl ParameterRecord {
    /// Creates a record with the kind's record defaults, leaving attributes
    /// without defaults unset.
    pub fn with_defaults(
        kind: PotentialKind,
        environment_key: impl Into<String>,
    ) -> Result<Self, RecordError> {
        Self::new(kind, environment_key, RawAttributes::new())
    }

    pub fn new(
        kind: PotentialKind,
        environment_key: impl Into<String>,
        raw: RawAttributes,
    ) -> Result<Self, RecordError> {
        let environment_key = environment_key.into();
        if environment_key.trim().is_empty() {
            return Err(RecordError::EmptyEnvironmentKey { kind });
        }
        let attributes = AttributeSet::from_raw(&kind.definition().record_schema, raw)
            .map_err(|source| RecordError::Attribute {
                environment_key: environment_key.clone(),
                source,
            })?;
        Ok(Self {
            kind,
            environment_key,
            id: None,
            attributes,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn kind(&self) -> PotentialKind {
        self.kind
    }

    pub fn environment_key(&self) -> &str {
        &self.environment_key
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn read(&self, name: &str) -> Result<&Value, AttributeError> {
        self.attributes.read(name)
    }

    /// Assigns one attribute before the record is handed to a handler.
    pub fn assign(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<(), RecordError> {
        self.attributes
            .assign(name, raw)
            .map_err(|source| RecordError::Attribute {
                environment_key: self.environment_key.clone(),
                source,
            })
    }
}
