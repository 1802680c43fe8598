//! Macro storage and application.
//!
//! A definition is immutable once created: redefining a live name is a hard
//! error and the only way to change a macro is `#undefine` followed by a new
//! `#define`. The table keeps definition order so substitution sweeps apply
//! macros deterministically.

use std::collections::HashMap;

use regex::{NoExpand, Regex};

use crate::error::{PreprocessError, Result};

/// One macro definition.
#[derive(Debug, Clone)]
pub enum Macro {
    /// Plain name-to-text substitution; every occurrence of the name is
    /// replaced, with no identifier-boundary check.
    Object { body: String },
    /// Parameterized template. The call-site matcher is derived from the
    /// parameter count at definition time and matches case-sensitively,
    /// unlike directive keywords.
    Function {
        params: Vec<String>,
        body: String,
        call: Regex,
    },
}

impl Macro {
    pub fn object(body: impl Into<String>) -> Self {
        Macro::Object { body: body.into() }
    }

    pub fn function(name: &str, params: Vec<String>, body: impl Into<String>) -> Self {
        Macro::Function {
            call: call_pattern(name, params.len()),
            params,
            body: body.into(),
        }
    }

    /// Apply this macro to `line` once. Object macros replace every bare
    /// occurrence of `name`; function macros substitute the captured
    /// arguments into the body and replace only the first call, leaving any
    /// later calls for the next sweep.
    pub fn apply(&self, name: &str, line: &str) -> String {
        match self {
            Macro::Object { body } => line.replace(name, body),
            Macro::Function { params, body, call } => {
                let caps = match call.captures(line) {
                    Some(caps) => caps,
                    None => return line.to_string(),
                };
                let mut replacement = body.clone();
                for (i, param) in params.iter().enumerate() {
                    let arg = caps.get(i + 1).map_or("", |m| m.as_str());
                    replacement = replacement.replace(param.as_str(), arg);
                }
                call.replace(line, NoExpand(&replacement)).into_owned()
            }
        }
    }
}

/// Build the call-site matcher for a function macro: the name, an opening
/// paren with no space allowed before it, one lazy non-comma capture per
/// parameter separated by `, ?`, and the closing paren.
fn call_pattern(name: &str, arity: usize) -> Regex {
    let mut pattern = regex::escape(name);
    pattern.push_str(r"\(");
    for i in 0..arity {
        if i > 0 {
            pattern.push_str(", ?");
        }
        pattern.push_str("([^,]+?)");
    }
    pattern.push_str(r"\)");
    // Cannot fail: the name is escaped and the rest is fixed syntax.
    Regex::new(&pattern).unwrap()
}

/// Macro definitions keyed by name, iterated in definition order.
#[derive(Debug, Default)]
pub struct MacroTable {
    macros: HashMap<String, Macro>,
    order: Vec<String>,
}

impl MacroTable {
    pub fn new() -> Self {
        MacroTable::default()
    }

    /// Insert a new definition. A name that is already live is a conflict;
    /// it must be undefined before it can be defined again.
    pub fn define(&mut self, name: &str, mac: Macro) -> Result<()> {
        if self.macros.contains_key(name) {
            return Err(PreprocessError::DefinitionConflict {
                name: name.to_string(),
            });
        }
        self.order.push(name.to_string());
        self.macros.insert(name.to_string(), mac);
        Ok(())
    }

    /// Remove a definition. Removing an absent name is a no-op.
    pub fn undefine(&mut self, name: &str) {
        if self.macros.remove(name).is_some() {
            self.order.retain(|n| n != name);
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Iterate `(name, macro)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Macro)> + '_ {
        self.order.iter().map(|name| (name.as_str(), &self.macros[name]))
    }
}
