use ffcompose::core::io::FragmentLoadError;
use ffcompose::forcefield::AssemblyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] FragmentLoadError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("{rejected} of {checked} shared handler(s) are incompatible")]
    Incompatible { rejected: usize, checked: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
