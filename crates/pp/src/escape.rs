//! Literal escaping: the final rewriting stage.
//!
//! Quoted literals are turned into the hex byte lists the assembler stages
//! downstream expect. `"AB"` becomes `41h, 42h` and `'x'` becomes `78h`,
//! with two-digit lowercase hex per character. Strings are rewritten before
//! characters so that an apostrophe inside a string is consumed as string
//! content, and each loop replaces one leftmost match at a time until none
//! remains. Malformed quoting never matches and passes through untouched.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).unwrap());
static CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(.)'").unwrap());

fn hex_bytes(content: &str) -> String {
    let mut out = String::new();
    for (i, ch) in content.chars().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{:02x}h", ch as u32));
    }
    out
}

/// Rewrite every quoted literal in `line` into hex notation.
pub fn escape_literals(line: &str) -> String {
    let mut text = line.to_string();
    while let Some(caps) = STRING.captures(&text) {
        let bytes = hex_bytes(&caps[1]);
        text = STRING.replace(&text, NoExpand(&bytes)).into_owned();
    }
    while let Some(caps) = CHAR.captures(&text) {
        let bytes = hex_bytes(&caps[1]);
        text = CHAR.replace(&text, NoExpand(&bytes)).into_owned();
    }
    text
}
