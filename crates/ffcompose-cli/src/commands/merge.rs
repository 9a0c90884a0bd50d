use crate::cli::MergeArgs;
use crate::error::Result;
use ffcompose::forcefield::{AddOutcome, ForceField, ForceFieldBuilder, MergePolicy};
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

pub fn run(args: MergeArgs) -> Result<()> {
    let policy = if args.keep_existing {
        MergePolicy::KeepExisting
    } else {
        MergePolicy::Abort
    };
    let (forcefield, skipped) = assemble(&args.files, policy)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "Handler order:").context("failed to write handler order")?;
    for (position, handler) in forcefield.handlers().iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {:<20} {} record(s)",
            position + 1,
            handler.tag(),
            handler.len()
        )
        .context("failed to write handler order")?;
    }
    if skipped > 0 {
        writeln!(out, "{} handler(s) kept unmerged.", skipped)
            .context("failed to write handler order")?;
    }
    Ok(())
}

/// Loads every fragment in order and returns the assembled force field with
/// the number of handlers the policy chose to skip.
pub fn assemble(files: &[PathBuf], policy: MergePolicy) -> Result<(ForceField, usize)> {
    let mut builder = ForceFieldBuilder::new().merge_policy(policy);
    let mut skipped = 0;
    for path in files {
        let outcomes = builder.load_fragment(path)?;
        skipped += outcomes
            .iter()
            .filter(|outcome| matches!(outcome, AddOutcome::Skipped(_)))
            .count();
    }
    let forcefield = builder.build()?;
    info!(
        "Assembled {} fragment(s) into {} handler(s).",
        files.len(),
        forcefield.len()
    );
    Ok((forcefield, skipped))
}
