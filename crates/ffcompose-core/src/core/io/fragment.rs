use crate::core::handler::{HandlerError, ParameterRecord, PotentialHandler};
use crate::core::potentials::PotentialKind;
use crate::core::schema::{RawAttributes, RawValue};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const ENVIRONMENT_KEY: &str = "smirks";
const RECORD_ID: &str = "id";

#[derive(Debug, Deserialize)]
struct Section {
    #[serde(rename = "Atom", default)]
    records: Vec<RawAttributes>,
    #[serde(flatten)]
    globals: RawAttributes,
}

#[derive(Debug, Error)]
pub enum FragmentLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown potential tag '{tag}' in '{path}'")]
    UnknownTag { path: String, tag: String },
    #[error("Atom entry {index} of '{tag}' in '{path}' has no 'smirks' text")]
    MissingEnvironmentKey {
        path: String,
        tag: String,
        index: usize,
    },
    #[error("Invalid '{tag}' section in '{path}': {source}")]
    Handler {
        path: String,
        tag: String,
        source: HandlerError,
    },
}

/// Reads a TOML force-field fragment and builds one handler per section.
///
/// Each top-level table is named by a potential tag. Its scalar keys are the
/// handler's global attributes and its `Atom` array holds the parameter
/// records, each keyed by a `smirks` pattern:
///
/// ```toml
/// [DampedBuckingham68]
/// cutoff = "9.0 * angstrom"
///
/// [[DampedBuckingham68.Atom]]
/// smirks = "[#6:1]"
/// a = "1600000.0 * kilojoule_per_mole"
/// ```
pub fn load_fragment(path: &Path) -> Result<Vec<PotentialHandler>, FragmentLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| FragmentLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_fragment(&content, &path.to_string_lossy())
}

/// Parses fragment text; `origin` names the source in error messages.
pub fn parse_fragment(
    content: &str,
    origin: &str,
) -> Result<Vec<PotentialHandler>, FragmentLoadError> {
    let sections: BTreeMap<String, Section> =
        toml::from_str(content).map_err(|e| FragmentLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;

    let mut handlers = Vec::with_capacity(sections.len());
    for (tag, section) in sections {
        let kind = PotentialKind::from_tag(&tag).ok_or_else(|| FragmentLoadError::UnknownTag {
            path: origin.to_string(),
            tag: tag.clone(),
        })?;
        let handler = build_handler(kind, section, origin)?;
        debug!(
            "Loaded '{}' with {} record(s) from '{}'.",
            tag,
            handler.len(),
            origin
        );
        handlers.push(handler);
    }
    Ok(handlers)
}

fn build_handler(
    kind: PotentialKind,
    section: Section,
    origin: &str,
) -> Result<PotentialHandler, FragmentLoadError> {
    let wrap = |source: HandlerError| FragmentLoadError::Handler {
        path: origin.to_string(),
        tag: kind.tag().to_string(),
        source,
    };

    let mut handler = PotentialHandler::new(kind, section.globals).map_err(wrap)?;
    for (index, mut raw) in section.records.into_iter().enumerate() {
        let environment_key = match raw.remove(ENVIRONMENT_KEY) {
            Some(RawValue::Text(key)) => key,
            _ => {
                return Err(FragmentLoadError::MissingEnvironmentKey {
                    path: origin.to_string(),
                    tag: kind.tag().to_string(),
                    index,
                });
            }
        };
        let id = match raw.remove(RECORD_ID) {
            Some(RawValue::Text(id)) => Some(id),
            Some(other) => Some(other.to_string()),
            None => None,
        };
        let mut record = ParameterRecord::new(kind, environment_key, raw)
            .map_err(|e| wrap(HandlerError::from(e)))?;
        if let Some(id) = id {
            record = record.with_id(id);
        }
        handler.add_record(record).map_err(wrap)?;
    }
    Ok(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{AttributeError, AxisType};
    use crate::core::units::Unit;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::tempdir;

    const BUCKINGHAM: &str = r#"
        [DampedBuckingham68]
        cutoff = "9.0 * angstrom"
        scale14 = 0.5
        gamma = "35.8967 * nanometer**-1"

        [[DampedBuckingham68.Atom]]
        smirks = "[#1:1]"
        id = "h1"
        a = "1600000.0 * kilojoule_per_mole"
        b = "42.0 * nanometer**-1"
        c6 = "0.0001 * kilojoule_per_mole * nanometer**6"
        c8 = "0.00001 * kilojoule_per_mole * nanometer**8"

        [[DampedBuckingham68.Atom]]
        smirks = "[#6:1]"
        a = "1700000.0 * kilojoule_per_mole"
        b = "36.0 * nanometer**-1"
        c6 = "0.0016 * kilojoule_per_mole * nanometer**6"
        c8 = "0.0002 * kilojoule_per_mole * nanometer**8"
    "#;

    #[test]
    fn parse_fragment_builds_handlers_with_records() {
        let handlers = parse_fragment(BUCKINGHAM, "inline").unwrap();
        assert_eq!(handlers.len(), 1);
        let h = &handlers[0];
        assert_eq!(h.kind(), PotentialKind::DampedBuckingham68);
        assert_eq!(h.len(), 2);
        assert_eq!(h.records()[0].id(), Some("h1"));
        let carbon = h.record("[#6:1]").unwrap();
        assert_relative_eq!(carbon.attributes().quantity("b").unwrap().magnitude(), 36.0);
        assert_relative_eq!(
            h.globals().quantity("cutoff").unwrap().value_in(Unit::ANGSTROM).unwrap(),
            9.0
        );
    }

    #[test]
    fn parse_fragment_reads_multiple_sections() {
        let content = r#"
            [AxilrodTeller]
            nonperiodic_method = "no-cutoff"
            [[AxilrodTeller.Atom]]
            smirks = "[#18:1]"
            c9 = "0.5 * kilojoule_per_mole * nanometer**9"

            [Multipole]
            polarization_type = "direct"
            [[Multipole.Atom]]
            smirks = "[#8:1]"
            axisType = "ZThenX"
            multipoleAtomZ = 1
            polarity = "0.000837 * nanometer**3"
        "#;
        let handlers = parse_fragment(content, "inline").unwrap();
        assert_eq!(handlers.len(), 2);
        let multipole = handlers
            .iter()
            .find(|h| h.kind() == PotentialKind::Multipole)
            .unwrap();
        let oxygen = multipole.record("[#8:1]").unwrap();
        assert_eq!(oxygen.attributes().mode::<AxisType>("axisType").unwrap(), AxisType::ZThenX);
        assert_eq!(oxygen.attributes().integer("multipoleAtomZ").unwrap(), 1);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let result = parse_fragment("[Bonds]\ncutoff = 1.0\n", "inline");
        assert!(matches!(result, Err(FragmentLoadError::UnknownTag { ref tag, .. }) if tag == "Bonds"));
    }

    #[test]
    fn record_without_environment_key_is_rejected() {
        let content = r#"
            [AxilrodTeller]
            [[AxilrodTeller.Atom]]
            c9 = "0.5 * kilojoule_per_mole * nanometer**9"
        "#;
        assert!(matches!(
            parse_fragment(content, "inline"),
            Err(FragmentLoadError::MissingEnvironmentKey { index: 0, .. })
        ));
    }

    #[test]
    fn duplicate_environment_key_in_one_section_is_rejected() {
        let content = r#"
            [AxilrodTeller]
            [[AxilrodTeller.Atom]]
            smirks = "[#18:1]"
            [[AxilrodTeller.Atom]]
            smirks = "[#18:1]"
        "#;
        assert!(matches!(
            parse_fragment(content, "inline"),
            Err(FragmentLoadError::Handler {
                source: HandlerError::DuplicateEnvironmentKey { .. },
                ..
            })
        ));
    }

    #[test]
    fn invalid_global_is_reported_with_its_section() {
        let content = "[DoubleExponential]\nalpha = \"steep\"\n";
        match parse_fragment(content, "inline") {
            Err(FragmentLoadError::Handler { tag, source, .. }) => {
                assert_eq!(tag, "DoubleExponential");
                assert!(matches!(
                    source,
                    HandlerError::Attribute {
                        source: AttributeError::Validation { .. },
                        ..
                    }
                ));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn load_fragment_reads_from_disk() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("buckingham.toml");
        fs::write(&file_path, BUCKINGHAM).unwrap();
        let handlers = load_fragment(&file_path).unwrap();
        assert_eq!(handlers[0].len(), 2);
    }

    #[test]
    fn load_fragment_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_fragment(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(FragmentLoadError::Io { .. })));
    }

    #[test]
    fn load_fragment_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        assert!(matches!(
            load_fragment(&file_path),
            Err(FragmentLoadError::Toml { .. })
        ));
    }
}
