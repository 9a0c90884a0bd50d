use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use ffcompose::core::handler::{IncompatibilityReport, PotentialHandler};
use ffcompose::core::io::load_fragment;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Verdict {
    pub tag: String,
    pub outcome: std::result::Result<(), IncompatibilityReport>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let verdicts = compare(&args.first, &args.second)?;
    if verdicts.is_empty() {
        println!("No handler tags are shared between the two fragments.");
        return Ok(());
    }

    let mut rejected = 0;
    for verdict in &verdicts {
        match &verdict.outcome {
            Ok(()) => println!("ACCEPT  {}", verdict.tag),
            Err(report) => {
                rejected += 1;
                println!("REJECT  {}: {}", verdict.tag, report.reason);
            }
        }
    }

    if rejected > 0 {
        return Err(CliError::Incompatible {
            rejected,
            checked: verdicts.len(),
        });
    }
    Ok(())
}

/// Runs the compatibility check on every tag present in both fragments.
pub fn compare(first: &Path, second: &Path) -> Result<Vec<Verdict>> {
    let ours = by_tag(load_fragment(first)?);
    let theirs = by_tag(load_fragment(second)?);

    let mut verdicts = Vec::new();
    for (tag, handler) in &ours {
        let Some(other) = theirs.get(tag) else {
            info!("'{}' only appears in '{}'.", tag, first.display());
            continue;
        };
        let outcome = handler.check_compatible(other);
        if let Err(report) = &outcome {
            warn!("{}", report);
        }
        verdicts.push(Verdict {
            tag: tag.clone(),
            outcome,
        });
    }
    for tag in theirs.keys().filter(|tag| !ours.contains_key(*tag)) {
        info!("'{}' only appears in '{}'.", tag, second.display());
    }
    Ok(verdicts)
}

fn by_tag(handlers: Vec<PotentialHandler>) -> BTreeMap<String, PotentialHandler> {
    handlers
        .into_iter()
        .map(|handler| (handler.tag().to_string(), handler))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcompose::core::handler::IncompatibilityReason;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn close_cutoffs_are_accepted() {
        let dir = tempdir().unwrap();
        let a = write(&dir, "a.toml", "[DampedBuckingham68]\ncutoff = \"9.0 * angstrom\"\n");
        let b = write(&dir, "b.toml", "[DampedBuckingham68]\ncutoff = \"9.00009 * angstrom\"\n");
        let verdicts = compare(&a, &b).unwrap();
        assert_eq!(verdicts.len(), 1);
        assert!(verdicts[0].outcome.is_ok());
    }

    #[test]
    fn differing_periodic_methods_are_rejected() {
        let dir = tempdir().unwrap();
        let a = write(&dir, "a.toml", "[DoubleExponential]\nperiodic_method = \"cutoff\"\n");
        let b = write(&dir, "b.toml", "[DoubleExponential]\nperiodic_method = \"no-cutoff\"\n");
        let verdicts = compare(&a, &b).unwrap();
        let report = verdicts[0].outcome.as_ref().unwrap_err();
        assert!(matches!(
            &report.reason,
            IncompatibilityReason::NotIdentical { attribute, .. } if attribute == "periodic_method"
        ));
    }

    #[test]
    fn tags_in_only_one_fragment_are_not_compared() {
        let dir = tempdir().unwrap();
        let a = write(&dir, "a.toml", "[AxilrodTeller]\n");
        let b = write(&dir, "b.toml", "[Multipole]\n");
        assert!(compare(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn run_fails_when_any_tag_is_rejected() {
        let dir = tempdir().unwrap();
        let a = write(&dir, "a.toml", "[DampedBuckingham68]\ncutoff = \"9.01 * angstrom\"\n");
        let b = write(&dir, "b.toml", "[DampedBuckingham68]\ncutoff = \"9.00 * angstrom\"\n");
        let result = run(CheckArgs { first: a, second: b });
        assert!(matches!(
            result,
            Err(CliError::Incompatible {
                rejected: 1,
                checked: 1
            })
        ));
    }
}
