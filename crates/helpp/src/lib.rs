// src/lib.rs
//
// A single HelppError covers loading, pattern compilation and convergence.

pub mod alias;
pub mod config;
pub mod directive;
pub mod engine;
pub mod lines;
pub mod source;
pub mod text;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use alias::{Alias, MacroTable};
pub use config::{ConfigError, HelppConfig};
pub use engine::{Expansion, Preprocessor, Settings, WhitespaceMode};
pub use source::{FsLoader, MemoryLoader, SourceLoader};

#[derive(Error, Debug)]
pub enum HelppError {
    #[error("invalid usage ({0})")]
    Usage(String),

    #[error("cannot open file {path:?}: {source}")]
    Load { path: PathBuf, source: io::Error },

    #[error("cannot write file {path:?}: {source}")]
    Store { path: PathBuf, source: io::Error },

    #[error("invalid macro pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("non-convergent expansion: text still changing after {passes} passes")]
    NonConvergent { passes: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type HelppResult<T> = Result<T, HelppError>;

/// Aborts the process when an internal precondition does not hold.
///
/// These are programmer errors, never input errors, so there is nothing to
/// propagate: the failed expression is reported with its location and the
/// process stops.
#[macro_export]
macro_rules! help_assert {
    ($cond:expr) => {
        if !($cond) {
            log::error!(
                "help_assert!({}) failed in {} at line {}",
                stringify!($cond),
                file!(),
                line!()
            );
            eprintln!(
                "helpp assertion failed: (fatal)\nhelp_assert!({}) in {} at line {}.",
                stringify!($cond),
                file!(),
                line!()
            );
            std::process::abort();
        }
    };
}
