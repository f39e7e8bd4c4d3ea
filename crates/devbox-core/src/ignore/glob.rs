//! Glob compiler for ignore patterns.
//!
//! Translates one ignore-pattern body into an anchored regular expression:
//!
//! | Glob   | Meaning                                       |
//! |--------|-----------------------------------------------|
//! | `*`    | any run of characters except `/`              |
//! | `**/`  | zero or more whole path segments              |
//! | `**`   | any run of characters, including `/`          |
//! | `?`    | exactly one character that is not `/`         |
//! | `[..]` | character class (literal `[` if unterminated) |
//!
//! Everything else matches literally.

use regex::Regex;

/// A compiled glob, matched against normalized root-relative paths.
#[derive(Debug, Clone)]
pub struct CompiledGlob {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Regex(Regex),
    /// Fallback when the regex engine rejects the translation.
    Literal(String),
}

impl CompiledGlob {
    /// True if the whole candidate matches.
    pub fn is_match(&self, candidate: &str) -> bool {
        match &self.inner {
            Inner::Regex(re) => re.is_match(candidate),
            Inner::Literal(body) => body == candidate,
        }
    }
}

/// Compile a pattern body into a matcher. Never fails.
pub fn compile_glob(body: &str) -> CompiledGlob {
    let source = translate(body);
    let inner = match Regex::new(&source) {
        Ok(re) => Inner::Regex(re),
        Err(e) => {
            tracing::warn!(pattern = %body, error = %e, "Glob rejected by regex engine, matching literally");
            Inner::Literal(body.to_string())
        }
    };
    CompiledGlob { inner }
}

/// Translate a glob body into anchored regex source.
fn translate(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() * 2 + 8);
    // `.` must cross newlines too, or `**` would match less than `*`.
    out.push_str("(?s)^(?:");

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    i += 2;
                    if chars.get(i) == Some(&'/') {
                        out.push_str("(?:.*/)?");
                        i += 1;
                    } else {
                        out.push_str(".*");
                    }
                    continue;
                }
                out.push_str("[^/]*");
            }
            '?' => out.push_str("[^/]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
        i += 1;
    }

    out.push_str(")$");
    out
}

/// Index of the `]` closing the class opened at `start`, if any.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    chars[start + 1..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + 1 + offset)
}

/// Emit a class body. A `-` is a range operator only between two members;
/// anywhere else it is a literal, so `--` never reaches the engine as set
/// difference.
fn push_class(out: &mut String, members: &[char]) {
    out.push('[');
    let members = match members.split_first() {
        Some(('^', rest)) => {
            out.push('^');
            rest
        }
        _ => members,
    };

    let mut i = 0;
    while i < members.len() {
        push_class_member(out, members[i]);
        if members.get(i + 1) == Some(&'-') && i + 2 < members.len() {
            out.push('-');
            push_class_member(out, members[i + 2]);
            i += 3;
        } else {
            i += 1;
        }
    }
    out.push(']');
}

/// Copy one class member, escaping what the regex class syntax would
/// otherwise interpret (backslash, nested classes, set operators).
fn push_class_member(out: &mut String, member: char) {
    match member {
        '\\' => out.push_str(r"\\"),
        '[' | '&' | '~' | '-' => {
            out.push('\\');
            out.push(member);
        }
        _ => out.push(member),
    }
}
