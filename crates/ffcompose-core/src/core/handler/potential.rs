use super::HandlerError;
use super::compat::{self, IncompatibilityReport};
use super::record::ParameterRecord;
use crate::core::potentials::PotentialKind;
use crate::core::schema::{AttributeError, AttributeSet, RawAttributes, RawValue, Value};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, instrument};

/// The assembled configuration for one potential kind: validated global
/// settings plus the parameter records keyed by chemical environment.
///
/// Handlers are mutated only while a force field is being assembled. Records
/// are appended, never overwritten, and every merge passes through
/// [`check_compatible`](Self::check_compatible) first.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialHandler {
    kind: PotentialKind,
    tag: String,
    globals: AttributeSet,
    records: Vec<ParameterRecord>,
    record_index: HashMap<String, usize>,
    dependencies: BTreeSet<String>,
}

impl PotentialHandler {
    /// Creates a handler for `kind` under its canonical tag, depending on the
    /// handlers the kind declares.
    pub fn new(kind: PotentialKind, globals: RawAttributes) -> Result<Self, HandlerError> {
        let dependencies = kind
            .definition()
            .dependencies
            .iter()
            .map(|d| d.to_string())
            .collect();
        Self::create(kind, kind.tag(), globals, dependencies)
    }

    /// Creates a handler, validating every global attribute. Construction
    /// either fully succeeds or returns the first validation failure.
    pub fn create(
        kind: PotentialKind,
        tag: impl Into<String>,
        globals: RawAttributes,
        dependencies: BTreeSet<String>,
    ) -> Result<Self, HandlerError> {
        let tag = tag.into();
        let globals = AttributeSet::from_raw(&kind.definition().global_schema, globals)
            .map_err(|source| HandlerError::Attribute {
                tag: tag.clone(),
                source,
            })?;
        debug!(tag = %tag, kind = %kind, "Created potential handler.");
        Ok(Self {
            kind,
            tag,
            globals,
            records: Vec::new(),
            record_index: HashMap::new(),
            dependencies,
        })
    }

    pub fn kind(&self) -> PotentialKind {
        self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn globals(&self) -> &AttributeSet {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Result<&Value, AttributeError> {
        self.globals.read(name)
    }

    /// Replaces one global setting. Only meaningful during assembly.
    pub fn set_global(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<(), HandlerError> {
        self.globals
            .assign(name, raw)
            .map_err(|source| HandlerError::Attribute {
                tag: self.tag.clone(),
                source,
            })
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub fn records(&self) -> &[ParameterRecord] {
        &self.records
    }

    pub fn record(&self, environment_key: &str) -> Option<&ParameterRecord> {
        self.record_index
            .get(environment_key)
            .map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_record(&mut self, record: ParameterRecord) -> Result<(), HandlerError> {
        if record.kind() != self.kind {
            return Err(HandlerError::RecordKindMismatch {
                tag: self.tag.clone(),
                expected: self.kind,
                found: record.kind(),
            });
        }
        if self.record_index.contains_key(record.environment_key()) {
            return Err(HandlerError::DuplicateEnvironmentKey {
                tag: self.tag.clone(),
                environment_key: record.environment_key().to_string(),
            });
        }
        debug!(tag = %self.tag, environment = record.environment_key(), "Added parameter record.");
        self.record_index
            .insert(record.environment_key().to_string(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn check_compatible(&self, other: &PotentialHandler) -> Result<(), IncompatibilityReport> {
        compat::check_compatible(self, other)
    }

    /// Appends `other`'s records after confirming both handlers encode the
    /// same physics. On any error `self` is left untouched.
    #[instrument(skip_all, name = "handler_merge", fields(tag = %self.tag))]
    pub fn merge(&mut self, other: PotentialHandler) -> Result<(), HandlerError> {
        if self.tag != other.tag {
            return Err(HandlerError::TagMismatch {
                ours: self.tag.clone(),
                theirs: other.tag,
            });
        }
        self.check_compatible(&other)?;

        {
            let mut incoming = HashSet::with_capacity(other.records.len());
            for record in &other.records {
                let key = record.environment_key();
                if self.record_index.contains_key(key) || !incoming.insert(key) {
                    return Err(HandlerError::DuplicateEnvironmentKey {
                        tag: self.tag.clone(),
                        environment_key: key.to_string(),
                    });
                }
            }
        }

        let added = other.records.len();
        for record in other.records {
            self.record_index
                .insert(record.environment_key().to_string(), self.records.len());
            self.records.push(record);
        }
        self.dependencies.extend(other.dependencies);
        info!(tag = %self.tag, added, total = self.records.len(), "Merged compatible handler.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handler::compat::IncompatibilityReason;

    fn raw(pairs: &[(&str, &str)]) -> RawAttributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), (*v).into()))
            .collect()
    }

    fn buckingham_record(key: &str) -> ParameterRecord {
        ParameterRecord::new(
            PotentialKind::DampedBuckingham68,
            key,
            raw(&[
                ("a", "1600000.0 * kilojoule_per_mole"),
                ("b", "42.0 * nanometer**-1"),
                ("c6", "0.0016 * kilojoule_per_mole * nanometer**6"),
                ("c8", "0.0001 * kilojoule_per_mole * nanometer**8"),
            ]),
        )
        .unwrap()
    }

    fn buckingham(globals: &[(&str, &str)], keys: &[&str]) -> PotentialHandler {
        let mut h = PotentialHandler::new(PotentialKind::DampedBuckingham68, raw(globals)).unwrap();
        for key in keys {
            h.add_record(buckingham_record(key)).unwrap();
        }
        h
    }

    #[test]
    fn new_uses_canonical_tag_and_kind_dependencies() {
        let h = PotentialHandler::new(PotentialKind::Multipole, RawAttributes::new()).unwrap();
        assert_eq!(h.tag(), "Multipole");
        assert!(h.dependencies().contains("vdW"));
        assert!(h.is_empty());
    }

    #[test]
    fn create_fails_on_invalid_global() {
        let err = PotentialHandler::new(
            PotentialKind::DampedBuckingham68,
            raw(&[("cutoff", "9.0 * kilojoule_per_mole")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Attribute {
                source: AttributeError::Dimension { .. },
                ..
            }
        ));
    }

    #[test]
    fn create_rejects_non_finite_global() {
        let err = PotentialHandler::new(PotentialKind::Multipole, raw(&[("thole", "nan")]))
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Attribute {
                source: AttributeError::Validation { .. },
                ..
            }
        ));
    }

    #[test]
    fn create_fails_on_disallowed_method() {
        let err = PotentialHandler::new(
            PotentialKind::Multipole,
            raw(&[("periodic_method", "cutoff")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Attribute {
                source: AttributeError::UnknownEnumValue { .. },
                ..
            }
        ));
    }

    #[test]
    fn add_record_keeps_insertion_order() {
        let h = buckingham(&[], &["[#1:1]", "[#6:1]", "[#8:1]"]);
        let keys: Vec<_> = h.records().iter().map(|r| r.environment_key()).collect();
        assert_eq!(keys, vec!["[#1:1]", "[#6:1]", "[#8:1]"]);
        assert!(h.record("[#6:1]").is_some());
    }

    #[test]
    fn duplicate_environment_key_is_rejected_and_records_unchanged() {
        let mut h = buckingham(&[], &["[#1:1]", "[#6:1]"]);
        let before = h.clone();
        let err = h.add_record(buckingham_record("[#6:1]")).unwrap_err();
        assert_eq!(
            err,
            HandlerError::DuplicateEnvironmentKey {
                tag: "DampedBuckingham68".into(),
                environment_key: "[#6:1]".into(),
            }
        );
        assert_eq!(h, before);
    }

    #[test]
    fn record_of_another_kind_is_rejected() {
        let mut h = buckingham(&[], &[]);
        let record = ParameterRecord::with_defaults(PotentialKind::AxilrodTeller, "[#6:1]").unwrap();
        assert!(matches!(
            h.add_record(record),
            Err(HandlerError::RecordKindMismatch { .. })
        ));
    }

    #[test]
    fn merge_appends_records_of_compatible_handler() {
        let mut base = buckingham(&[], &["[#1:1]"]);
        let overlay = buckingham(&[("cutoff", "0.9 * nanometer")], &["[#6:1]", "[#8:1]"]);
        base.merge(overlay).unwrap();
        let keys: Vec<_> = base.records().iter().map(|r| r.environment_key()).collect();
        assert_eq!(keys, vec!["[#1:1]", "[#6:1]", "[#8:1]"]);
        assert!(base.record("[#8:1]").is_some());
    }

    #[test]
    fn merge_rejects_incompatible_handler_without_side_effects() {
        let mut base = buckingham(&[], &["[#1:1]"]);
        let before = base.clone();
        let overlay = buckingham(&[("cutoff", "9.01 * angstrom")], &["[#6:1]"]);
        let err = base.merge(overlay).unwrap_err();
        match err {
            HandlerError::Incompatible(report) => assert!(matches!(
                report.reason,
                IncompatibilityReason::OutsideTolerance { .. }
            )),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(base, before);
    }

    #[test]
    fn merge_rejects_duplicate_keys_across_handlers_without_side_effects() {
        let mut base = buckingham(&[], &["[#1:1]"]);
        let before = base.clone();
        let overlay = buckingham(&[], &["[#6:1]", "[#1:1]"]);
        assert!(matches!(
            base.merge(overlay),
            Err(HandlerError::DuplicateEnvironmentKey { .. })
        ));
        assert_eq!(base, before);
    }

    #[test]
    fn merge_requires_matching_tags() {
        let mut a = buckingham(&[], &[]);
        let b = PotentialHandler::create(
            PotentialKind::DampedBuckingham68,
            "Other",
            RawAttributes::new(),
            BTreeSet::new(),
        )
        .unwrap();
        assert!(matches!(a.merge(b), Err(HandlerError::TagMismatch { .. })));
    }

    #[test]
    fn merge_unions_dependencies() {
        let mut a = PotentialHandler::create(
            PotentialKind::AxilrodTeller,
            "AxilrodTeller",
            RawAttributes::new(),
            BTreeSet::from(["vdW".to_string()]),
        )
        .unwrap();
        let b = PotentialHandler::create(
            PotentialKind::AxilrodTeller,
            "AxilrodTeller",
            RawAttributes::new(),
            BTreeSet::from(["Electrostatics".to_string()]),
        )
        .unwrap();
        a.merge(b).unwrap();
        assert_eq!(a.dependencies().len(), 2);
    }

    #[test]
    fn set_global_validates_through_the_descriptor() {
        let mut h = buckingham(&[], &[]);
        h.set_global("scale14", 0.8333).unwrap();
        assert_eq!(h.global("scale14").unwrap(), &Value::Float(0.8333));
        assert!(h.set_global("switch_width", "1.0 * kilojoule_per_mole").is_err());
    }
}
