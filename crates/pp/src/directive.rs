//! Directive recognition.
//!
//! Both passes share one classifier. Each pattern is anchored to the whole
//! line, keyword matching is case-insensitive, and the first hit wins; a
//! `#`-prefixed line matching none of the forms is `Plain` and flows through
//! macro expansion as ordinary text. That fallthrough is load-bearing: a
//! nested `#include` spliced in by the first pass must survive the second
//! pass as literal text instead of being resolved or rejected.

use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)^\s*#include\s+"(.*)"\s*$"#).unwrap());
static INCLUDE_ANGLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#include\s+<(.*)>\s*$").unwrap());
// The single literal space before the body is part of the grammar: a
// `#define` with a name but no body is not a directive at all.
static DEFINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#define\s+(\w+?)(?:\((.*)\))? (.*)$").unwrap());
static UNDEFINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#undefine\s+(\w+?)\s*$").unwrap());
static IFDEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*#ifdef\s+(\w+?)\s*$").unwrap());
static IFNDEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*#ifndef\s+(\w+?)\s*$").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*#else\s*$").unwrap());
static ENDIF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*#endif\s*$").unwrap());

static PARAM_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(", ?").unwrap());

/// A classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `#include "path"`, resolved against the base directory.
    IncludeQuoted(String),
    /// `#include <path>`, resolved against the include folder.
    IncludeAngled(String),
    /// `#define NAME BODY` or `#define NAME(a, b) BODY`. The body is kept
    /// verbatim and may still end with a continuation marker.
    Define {
        name: String,
        params: Option<Vec<String>>,
        body: String,
    },
    /// `#undefine NAME`
    Undefine(String),
    /// `#ifdef NAME`
    IfDef(String),
    /// `#ifndef NAME`
    IfNDef(String),
    /// `#else`
    Else,
    /// `#endif`
    EndIf,
    /// Not a directive; processed as ordinary text.
    Plain,
}

/// Classify one normalized line.
pub fn classify(text: &str) -> Directive {
    if !text.trim_start().starts_with('#') {
        return Directive::Plain;
    }
    if let Some(caps) = INCLUDE_QUOTED.captures(text) {
        return Directive::IncludeQuoted(caps[1].to_string());
    }
    if let Some(caps) = INCLUDE_ANGLED.captures(text) {
        return Directive::IncludeAngled(caps[1].to_string());
    }
    if let Some(caps) = DEFINE.captures(text) {
        // Parameter names are split on `, ?` and deliberately not trimmed:
        // substitution later replaces the names exactly as written here.
        let params = caps
            .get(2)
            .map(|list| PARAM_SEP.split(list.as_str()).map(String::from).collect());
        return Directive::Define {
            name: caps[1].to_string(),
            params,
            body: caps[3].to_string(),
        };
    }
    if let Some(caps) = UNDEFINE.captures(text) {
        return Directive::Undefine(caps[1].to_string());
    }
    if let Some(caps) = IFDEF.captures(text) {
        return Directive::IfDef(caps[1].to_string());
    }
    if let Some(caps) = IFNDEF.captures(text) {
        return Directive::IfNDef(caps[1].to_string());
    }
    if ELSE.is_match(text) {
        return Directive::Else;
    }
    if ENDIF.is_match(text) {
        return Directive::EndIf;
    }
    Directive::Plain
}
