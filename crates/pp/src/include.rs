//! Include resolution and splicing support.
//!
//! Include handling is single-level by construction: spliced lines are never
//! rescanned for further `#include` directives, so a nested include survives
//! as literal text. Every file read is also recorded, keyed by its base
//! name, for display surfaces; the pipeline itself never reads the registry
//! back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Config;
use crate::error::{PreprocessError, Result};
use crate::line::{self, SourceLine};

/// Include texts by base name (file name with the extension dropped),
/// newline-normalized but otherwise raw.
pub type IncludeRegistry = BTreeMap<String, String>;

/// Resolve a `#include "path"` target against the base directory.
pub fn resolve_quoted(config: &Config, path: &str) -> PathBuf {
    config.base_dir.join(path)
}

/// Resolve a `#include <path>` target against the include folder, or use it
/// as written when no folder is configured.
pub fn resolve_angled(config: &Config, path: &str) -> PathBuf {
    match &config.include_dir {
        Some(dir) => dir.join(path),
        None => PathBuf::from(path),
    }
}

/// Read, decode and normalize one include file, record its text in the
/// registry, and return its line stream ready for splicing. Line numbers
/// restart at zero inside the included file.
pub fn load(config: &Config, path: &Path, registry: &mut IncludeRegistry) -> Result<Vec<SourceLine>> {
    let include_err = |source| PreprocessError::Include {
        path: path.to_path_buf(),
        source,
    };
    let bytes = fs::read(path).map_err(include_err)?;
    let text = line::fold_newlines(&config.encoding.decode(bytes).map_err(include_err)?);
    let base = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("including {} as `{}` ({} bytes)", path.display(), base, text.len());
    let lines = line::split_normalized(&text);
    registry.insert(base, text);
    Ok(lines)
}
