use super::ForceField;
use super::error::AssemblyError;
use crate::core::handler::{HandlerError, PotentialHandler};
use crate::core::io::load_fragment;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What happens when a handler cannot be merged into one already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Fail the whole assembly.
    #[default]
    Abort,
    /// Keep the existing handler unchanged and drop the incoming one.
    KeepExisting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Inserted,
    Merged,
    Skipped(HandlerError),
}

/// Collects handlers by tag, merging repeated tags, until [`build`](Self::build)
/// publishes them as an immutable [`ForceField`].
#[derive(Debug, Default)]
pub struct ForceFieldBuilder {
    policy: MergePolicy,
    handlers: BTreeMap<String, PotentialHandler>,
}

impl ForceFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn get(&self, tag: &str) -> Option<&PotentialHandler> {
        self.handlers.get(tag)
    }

    pub fn add_handler(&mut self, handler: PotentialHandler) -> Result<AddOutcome, AssemblyError> {
        add_to(&mut self.handlers, self.policy, handler)
    }

    /// Loads a fragment file and adds each of its handlers in turn.
    ///
    /// The fragment is applied as a unit: merges run against staged copies
    /// of the affected handlers, so when any section is rejected the builder
    /// is left exactly as it was.
    pub fn load_fragment(&mut self, path: &Path) -> Result<Vec<AddOutcome>, AssemblyError> {
        info!("Loading force-field fragment '{}'.", path.display());
        let handlers = load_fragment(path)?;

        let mut staged = BTreeMap::new();
        for handler in &handlers {
            if let Some(existing) = self.handlers.get(handler.tag()) {
                staged
                    .entry(handler.tag().to_string())
                    .or_insert_with(|| existing.clone());
            }
        }
        let outcomes = handlers
            .into_iter()
            .map(|handler| add_to(&mut staged, self.policy, handler))
            .collect::<Result<Vec<_>, _>>()?;

        self.handlers.extend(staged);
        Ok(outcomes)
    }

    /// Orders the handlers so that each comes after every handler it depends
    /// on, breaking ties alphabetically by tag.
    #[instrument(skip_all, name = "forcefield_build", fields(handlers = self.handlers.len()))]
    pub fn build(self) -> Result<ForceField, AssemblyError> {
        let order = resolve_order(&self.handlers)?;
        let mut handlers = self.handlers;
        let ordered: Vec<Arc<PotentialHandler>> = order
            .iter()
            .filter_map(|tag| handlers.remove(tag))
            .map(Arc::new)
            .collect();
        info!(
            "Assembled force field with {} handler(s): {}",
            ordered.len(),
            order.join(" -> ")
        );
        Ok(ForceField::from_ordered(ordered))
    }
}

fn add_to(
    handlers: &mut BTreeMap<String, PotentialHandler>,
    policy: MergePolicy,
    handler: PotentialHandler,
) -> Result<AddOutcome, AssemblyError> {
    let tag = handler.tag().to_string();
    let Some(existing) = handlers.get_mut(&tag) else {
        debug!("Registering handler '{}' with {} record(s).", tag, handler.len());
        handlers.insert(tag, handler);
        return Ok(AddOutcome::Inserted);
    };

    // merge leaves the existing handler untouched when it fails
    match existing.merge(handler) {
        Ok(()) => Ok(AddOutcome::Merged),
        Err(source) => match policy {
            MergePolicy::Abort => Err(AssemblyError::Handler { tag, source }),
            MergePolicy::KeepExisting => {
                warn!("Keeping existing handler '{}': {}", tag, source);
                Ok(AddOutcome::Skipped(source))
            }
        },
    }
}

fn resolve_order(
    handlers: &BTreeMap<String, PotentialHandler>,
) -> Result<Vec<String>, AssemblyError> {
    let mut pending: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (tag, handler) in handlers {
        let mut needs = BTreeSet::new();
        for dependency in handler.dependencies() {
            if handlers.contains_key(dependency) {
                needs.insert(dependency.as_str());
            } else {
                warn!(
                    "Handler '{}' depends on '{}', which is not present; ignoring.",
                    tag, dependency
                );
            }
        }
        pending.insert(tag.as_str(), needs);
    }

    let mut order = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        let Some(next) = pending
            .iter()
            .find(|(_, needs)| needs.is_empty())
            .map(|(tag, _)| *tag)
        else {
            return Err(AssemblyError::DependencyCycle {
                tags: pending.keys().map(|tag| tag.to_string()).collect(),
            });
        };
        pending.remove(next);
        for needs in pending.values_mut() {
            needs.remove(next);
        }
        order.push(next.to_string());
    }
    Ok(order)
}
