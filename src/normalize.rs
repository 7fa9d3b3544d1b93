//! Path normalization
//!
//! Rewrites path-template placeholders into a concrete dummy path a probe
//! can actually request. The probe only needs a path that routes correctly;
//! it is not validating parameter semantics, so any syntactically valid
//! placeholder value does.

use once_cell::sync::Lazy;
use regex::Regex;

/// `{id}`, `{userId}`, ... — a brace, one or more word characters, a brace.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\w+\}").unwrap());

/// The dummy value substituted for every placeholder.
const DUMMY_SEGMENT: &str = "0";

/// Replaces every placeholder in `template` with `0`.
///
/// Total and idempotent: a path without placeholders (including an already
/// normalized one) passes through unchanged.
pub fn normalize_path(template: &str) -> String {
    PLACEHOLDER.replace_all(template, DUMMY_SEGMENT).into_owned()
}
