use crate::core::handler::HandlerError;
use crate::core::io::FragmentLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Cannot add handler '{tag}': {source}")]
    Handler {
        tag: String,
        #[source]
        source: HandlerError,
    },

    #[error("Handler dependencies form a cycle among: {}", tags.join(", "))]
    DependencyCycle { tags: Vec<String> },

    #[error(transparent)]
    Load(#[from] FragmentLoadError),
}
