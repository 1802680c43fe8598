use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a preprocessing run.
///
/// There is no local recovery anywhere in the pipeline: the first failure
/// is returned to the caller together with the context needed to report it
/// (macro name, file path, offending line number).
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// A `#define` (or a seeded definition) named a macro that already
    /// exists. Definitions are immutable; the old one must be removed with
    /// `#undefine` first.
    #[error("macro `{name}` is already defined")]
    DefinitionConflict { name: String },

    /// An include file could not be read or decoded.
    #[error("cannot include `{}`: {source}", path.display())]
    Include {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `#else` or `#endif` appeared with no conditional open.
    #[error("`#{directive}` without a matching `#ifdef`/`#ifndef`")]
    StackUnderflow { directive: &'static str },

    /// A macro body ended with a continuation marker on the last line of
    /// the stream.
    #[error("macro `{name}` continues past the end of input")]
    UnterminatedDefine { name: String },

    /// Substitution sweeps on one line never reached a fixed point, or the
    /// line grew past the expansion size cap.
    #[error("macro expansion failed to settle on line {line} after {sweeps} sweeps")]
    ExpansionLimit { line: usize, sweeps: usize },
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
