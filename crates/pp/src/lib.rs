//! Source-text preparation for the 8051 assembler: turns raw assembler text
//! into a flat, directive-free, literal-escaped line stream.
//!
//! A run makes two passes over the normalized lines. The first splices
//! `#include` files in place of their directives (single-level: spliced
//! text is never rescanned for includes). The second dispatches the
//! remaining directives against the macro table and conditional stack,
//! expands macros on ordinary lines to a fixed point, and rewrites quoted
//! literals into hex byte lists. Line numbers are zero-based and restart
//! inside each included file.
//!
//! ```
//! use pp::{Config, Preprocessor};
//!
//! let mut pp = Preprocessor::new(Config::default());
//! pp.define_object("DEBUG", "1")?;
//! let out = pp.run("#define LED P1\nMOV LED, #'x'\n")?;
//! assert_eq!(out.lines[0].text, "MOV P1, #78h");
//! # Ok::<(), pp::PreprocessError>(())
//! ```

mod cond;
mod config;
mod cursor;
mod directive;
mod error;
mod escape;
mod expand;
mod include;
mod line;
mod table;

pub use config::{Config, Encoding, DEFAULT_MAX_SWEEPS};
pub use error::{PreprocessError, Result};
pub use include::IncludeRegistry;
pub use line::SourceLine;

use log::debug;

use crate::cond::CondStack;
use crate::cursor::LineCursor;
use crate::directive::{classify, Directive};
use crate::table::{Macro, MacroTable};

/// Result of one run: the transformed line stream plus the text of every
/// spliced include, keyed by base name.
#[derive(Debug)]
pub struct Output {
    pub lines: Vec<SourceLine>,
    pub includes: IncludeRegistry,
}

impl Output {
    /// The line stream joined with newlines, numbering dropped.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

/// One-shot preprocessor. Seed definitions, then consume it with [`run`].
///
/// [`run`]: Preprocessor::run
#[derive(Debug, Default)]
pub struct Preprocessor {
    config: Config,
    macros: MacroTable,
    conds: CondStack,
    registry: IncludeRegistry,
}

impl Preprocessor {
    pub fn new(config: Config) -> Self {
        Preprocessor {
            config,
            macros: MacroTable::new(),
            conds: CondStack::new(),
            registry: IncludeRegistry::new(),
        }
    }

    /// Seed an object-like macro before the run. Seeds obey the same
    /// immutability rule as `#define`, so seeding a name twice is a
    /// conflict.
    pub fn define_object(&mut self, name: &str, body: &str) -> Result<()> {
        self.macros.define(name, Macro::object(body))
    }

    /// Drop a seeded macro. Absent names are ignored.
    pub fn undefine(&mut self, name: &str) {
        self.macros.undefine(name);
    }

    /// Run the whole pipeline over `source`.
    pub fn run(mut self, source: &str) -> Result<Output> {
        let mut cursor = LineCursor::new(line::normalize(source));
        self.splice_includes(&mut cursor)?;
        cursor.rewind();
        let lines = self.transform(&mut cursor)?;
        debug!(
            "run complete: {} lines out, {} macros live, {} includes",
            lines.len(),
            self.macros.len(),
            self.registry.len()
        );
        Ok(Output {
            lines,
            includes: self.registry,
        })
    }

    /// First pass: replace each include directive with the lines of its
    /// file. The cursor lands after every splice, so includes brought in by
    /// other includes are left as literal text.
    fn splice_includes(&mut self, cursor: &mut LineCursor) -> Result<()> {
        loop {
            let target = match cursor.peek() {
                Some(current) => match classify(&current.text) {
                    Directive::IncludeQuoted(path) => include::resolve_quoted(&self.config, &path),
                    Directive::IncludeAngled(path) => include::resolve_angled(&self.config, &path),
                    _ => {
                        cursor.advance();
                        continue;
                    }
                },
                None => return Ok(()),
            };
            cursor.take_next();
            let spliced = include::load(&self.config, &target, &mut self.registry)?;
            cursor.splice(spliced);
        }
    }

    /// Second pass: dispatch directives, expand macros on everything else,
    /// escape literals, and collect the surviving lines in order.
    fn transform(&mut self, cursor: &mut LineCursor) -> Result<Vec<SourceLine>> {
        let mut out = Vec::new();
        while let Some(current) = cursor.take_next() {
            if current.text.is_empty() {
                continue;
            }
            match classify(&current.text) {
                Directive::Define { name, params, body } => {
                    if self.suppressed() {
                        continue;
                    }
                    let body = collect_body(&name, body, cursor)?;
                    let mac = match params {
                        Some(params) => Macro::function(&name, params, body),
                        None => Macro::object(body),
                    };
                    debug!("line {}: define `{}`", current.number, name);
                    self.macros.define(&name, mac)?;
                }
                Directive::Undefine(name) => {
                    if self.suppressed() {
                        continue;
                    }
                    debug!("line {}: undefine `{}`", current.number, name);
                    self.macros.undefine(&name);
                }
                Directive::IfDef(name) => {
                    let active = self.macros.is_defined(&name);
                    debug!("line {}: ifdef `{}` -> {}", current.number, name, active);
                    self.conds.push(active);
                }
                Directive::IfNDef(name) => {
                    let active = !self.macros.is_defined(&name);
                    debug!("line {}: ifndef `{}` -> {}", current.number, name, active);
                    self.conds.push(active);
                }
                Directive::Else => self.conds.invert()?,
                Directive::EndIf => self.conds.pop()?,
                // Includes were handled by the first pass; one that shows up
                // here was spliced in and stays ordinary text.
                Directive::IncludeQuoted(_) | Directive::IncludeAngled(_) | Directive::Plain => {
                    if self.suppressed() {
                        continue;
                    }
                    let expanded = expand::fixed_point(
                        &self.macros,
                        self.config.max_sweeps,
                        current.number,
                        &current.text,
                    )?;
                    out.push(SourceLine::new(
                        current.number,
                        escape::escape_literals(&expanded),
                    ));
                }
            }
        }
        Ok(out)
    }

    /// True when the current line sits in a false branch and suppression is
    /// switched on. A suppressed `#define` is skipped before its body is
    /// parsed, so its continuation lines stay in the stream as ordinary
    /// (suppressed) text.
    fn suppressed(&self) -> bool {
        self.config.apply_conditionals && !self.conds.all_active()
    }
}

/// Fold continuation lines into a macro body: drop the trailing `\`, append
/// a single space and the next raw stream entry, and repeat until the body
/// no longer ends with the marker.
fn collect_body(name: &str, mut body: String, cursor: &mut LineCursor) -> Result<String> {
    while body.ends_with('\\') {
        body.pop();
        body.push(' ');
        match cursor.take_next() {
            Some(cont) => body.push_str(&cont.text),
            None => {
                return Err(PreprocessError::UnterminatedDefine {
                    name: name.to_string(),
                })
            }
        }
    }
    Ok(body)
}
