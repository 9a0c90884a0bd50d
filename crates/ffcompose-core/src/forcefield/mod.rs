//! # Force Field Assembly
//!
//! Handlers loaded from several fragments are combined by a
//! [`ForceFieldBuilder`], which merges handlers sharing a tag and resolves an
//! application order from their dependencies. The result is a [`ForceField`]
//! whose handlers can no longer be changed and may be shared across threads.

mod builder;
mod error;

pub use builder::{AddOutcome, ForceFieldBuilder, MergePolicy};
pub use error::AssemblyError;

use crate::core::handler::PotentialHandler;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ForceField {
    handlers: Vec<Arc<PotentialHandler>>,
    index: HashMap<String, usize>,
}

impl ForceField {
    fn from_ordered(handlers: Vec<Arc<PotentialHandler>>) -> Self {
        let index = handlers
            .iter()
            .enumerate()
            .map(|(i, handler)| (handler.tag().to_string(), i))
            .collect();
        Self { handlers, index }
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<PotentialHandler>> {
        self.index.get(tag).map(|&i| &self.handlers[i])
    }

    /// Handlers in application order.
    pub fn handlers(&self) -> &[Arc<PotentialHandler>] {
        &self.handlers
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.iter().map(|handler| handler.tag())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potentials::PotentialKind;
    use crate::core::schema::RawAttributes;
    use std::thread;

    #[test]
    fn handlers_are_shared_read_only_across_threads() {
        let mut builder = ForceFieldBuilder::new();
        builder
            .add_handler(PotentialHandler::new(PotentialKind::AxilrodTeller, RawAttributes::new()).unwrap())
            .unwrap();
        let forcefield = builder.build().unwrap();
        let handler = Arc::clone(forcefield.get("AxilrodTeller").unwrap());
        let tag = thread::spawn(move || handler.tag().to_string()).join().unwrap();
        assert_eq!(tag, "AxilrodTeller");
        assert_eq!(Arc::strong_count(&forcefield.handlers()[0]), 1);
    }

    #[test]
    fn empty_builder_yields_empty_forcefield() {
        let forcefield = ForceFieldBuilder::new().build().unwrap();
        assert!(forcefield.is_empty());
        assert!(forcefield.get("Multipole").is_none());
    }
}
