use std::io;
use std::path::PathBuf;

/// Character encoding used when decoding source and include files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8; invalid byte sequences abort the run.
    #[default]
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value, so
    /// decoding cannot fail.
    Latin1,
}

impl Encoding {
    /// Look up an encoding by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Encoding::Utf8),
            "latin1" | "iso-8859-1" | "ansi" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    pub fn decode(self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Encoding::Latin1 => Ok(bytes.into_iter().map(|b| b as char).collect()),
        }
    }
}

/// Per-run settings. Callers construct this explicitly; the pipeline reads
/// no ambient process state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that `#include "path"` resolves against.
    pub base_dir: PathBuf,
    /// Directory that `#include <path>` resolves against. When unset the
    /// bracketed path is used as written.
    pub include_dir: Option<PathBuf>,
    /// Encoding of include files.
    pub encoding: Encoding,
    /// Drop ordinary lines, and skip define/undefine directives, inside
    /// false conditional branches. Off by default: the stock pipeline
    /// tracks conditional state without acting on it.
    pub apply_conditionals: bool,
    /// Upper bound on whole-table substitution sweeps per line before the
    /// run is aborted.
    pub max_sweeps: usize,
}

pub const DEFAULT_MAX_SWEEPS: usize = 4096;

impl Default for Config {
    fn default() -> Self {
        Config {
            base_dir: PathBuf::from("."),
            include_dir: None,
            encoding: Encoding::default(),
            apply_conditionals: false,
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}
