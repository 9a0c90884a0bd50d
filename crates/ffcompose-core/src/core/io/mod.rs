//! Declarative force-field fragments.

pub mod fragment;

pub use fragment::{FragmentLoadError, load_fragment, parse_fragment};
