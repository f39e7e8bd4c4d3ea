//! A single ignore rule.

use super::glob::{compile_glob, CompiledGlob};

/// One parsed ignore-rule line.
///
/// The body is stored root-relative: no leading `!`, `/` or `./` and no
/// trailing `/`. Candidates passed to [`Pattern::matches`] must already be
/// normalized the same way; the matcher does that once per lookup.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    body: String,
    negated: bool,
    glob: CompiledGlob,
}

impl Pattern {
    /// Parse a raw line. Any input is accepted.
    pub fn new(line: &str) -> Self {
        let raw = normalize_line(line).to_string();

        let (negated, rest) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let body = normalize_body(rest).to_string();
        let glob = compile_glob(&body);

        Self {
            raw,
            body,
            negated,
            glob,
        }
    }

    /// The trimmed source line (negation marker included).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The root-relative glob body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// True if this rule re-includes (`!pattern`).
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Test an already-normalized candidate path.
    pub fn matches(&self, candidate: &str) -> bool {
        self.glob.is_match(candidate)
    }
}

/// Trim, drop a leading `./` and a single trailing `/`.
pub(crate) fn normalize_line(line: &str) -> &str {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.strip_suffix('/').unwrap_or(trimmed)
}

/// Make the body root-relative. The trailing `/` is already gone from the line.
fn normalize_body(body: &str) -> &str {
    let body = body.trim_start_matches('/');
    body.strip_prefix("./").unwrap_or(body)
}
