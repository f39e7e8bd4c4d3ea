//! Ordered `.dockerignore` evaluation.

use super::pattern::{normalize_line, Pattern};

/// Name of the conventional ignore file.
pub const DOCKERIGNORE: &str = ".dockerignore";

/// An ordered set of ignore rules.
///
/// Evaluation follows Docker's `MatchesOrParentMatches`: rules are applied in
/// file order, a rule matching any ancestor directory matches the path, and
/// `!` rules re-include what earlier rules excluded.
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// Build a matcher from parsed patterns, keeping their order.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Parse every line as a pattern, in order.
    pub fn from_patterns<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            lines
                .into_iter()
                .map(|line| Pattern::new(line.as_ref()))
                .collect(),
        )
    }

    /// The rules in evaluation order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// True if any rule is a `!` re-inclusion.
    pub fn has_negations(&self) -> bool {
        self.patterns.iter().any(Pattern::negated)
    }

    /// Returns true when `path` should be excluded.
    ///
    /// `path` is relative to the upload root; either separator is accepted.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_path(path);

        // Docker never ships the ignore file itself.
        if self.patterns.is_empty() {
            return path == DOCKERIGNORE;
        }

        let parents = ancestors(&path);
        let mut matched = false;

        for pattern in &self.patterns {
            // Until something matched only exclusions can flip the result;
            // afterwards only re-inclusions can.
            if pattern.negated() != matched {
                continue;
            }

            let hit = pattern.matches(&path) || parents.iter().any(|dir| pattern.matches(dir));
            if hit {
                matched = !pattern.negated();
                tracing::trace!(path = %path, pattern = %pattern.raw(), matched, "Ignore rule applied");
            }
        }

        matched
    }
}

/// Build a matcher from raw lines, or `None` if no usable rule remains.
///
/// Blank lines and `#` comments are dropped; `None` means "include everything".
pub fn create_ignore_matcher<I, S>(lines: I) -> Option<IgnoreMatcher>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let patterns: Vec<Pattern> = lines
        .into_iter()
        .filter_map(|line| {
            let line = normalize_line(line.as_ref());
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(Pattern::new(line))
            }
        })
        .collect();

    if patterns.is_empty() {
        return None;
    }
    tracing::debug!(count = patterns.len(), "Ignore matcher created");
    Some(IgnoreMatcher::new(patterns))
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path);
    let path = if path == "/" {
        path
    } else {
        path.strip_suffix('/').unwrap_or(path)
    };

    if path.is_empty() {
        ".".to_string()
    } else {
        path.to_string()
    }
}

/// Strict prefixes of `path`, shortest first: `a/b/c` gives `a`, `a/b`.
fn ancestors(path: &str) -> Vec<&str> {
    path.match_indices('/')
        .map(|(idx, _)| &path[..idx])
        .filter(|prefix| !prefix.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matcher(lines: &[&str]) -> IgnoreMatcher {
        IgnoreMatcher::from_patterns(lines)
    }

    #[test]
    fn test_pattern_matches_itself() {
        for line in ["foo", "foo/bar", "a.b", "x+y", "file[0", "node_modules"] {
            assert!(matcher(&[line]).matches(line), "{line} should match itself");
        }
    }

    #[test]
    fn test_single_star_vs_double_star() {
        let m = matcher(&["*.log"]);
        assert!(m.matches("app.log"));
        assert!(!m.matches("logs/app.log"));

        let m = matcher(&["**/*.log"]);
        assert!(m.matches("app.log"));
        assert!(m.matches("logs/app.log"));
    }

    #[test]
    fn test_directory_matches_children() {
        let m = matcher(&["node_modules"]);
        assert!(m.matches("node_modules"));
        assert!(m.matches("node_modules/foo.js"));
        assert!(m.matches("node_modules/a/b/c.js"));
        assert!(!m.matches("src/node_modules"));
    }

    #[test]
    fn test_leading_slash_forms() {
        let m = matcher(&["/foo"]);
        assert!(m.matches("foo"));
        assert!(m.matches("foo/x"));

        for line in ["/foo/bar", "/foo/bar/", "foo/bar"] {
            let m = matcher(&[line]);
            assert!(m.matches("foo/bar"), "{line}");
            assert!(m.matches("foo/bar/"), "{line}");
            assert!(m.matches("foo/bar/baz.txt"), "{line}");
            assert!(!m.matches("foo"), "{line}");
        }
    }

    #[test]
    fn test_negation() {
        let m = matcher(&["*.log", "!keep.log"]);
        assert!(!m.matches("keep.log"));
        assert!(m.matches("other.log"));

        let m = matcher(&["*.log", "!/keep.log"]);
        assert!(!m.matches("keep.log"));
        assert!(m.matches("other.log"));
    }

    #[test]
    fn test_exclusion_after_inclusion() {
        let m = matcher(&["*.log", "!keep.log", "keep.log"]);
        assert!(m.matches("keep.log"));
    }

    #[test]
    fn test_negation_before_any_match_is_skipped() {
        let m = matcher(&["!keep.log", "*.log"]);
        assert!(m.matches("keep.log"));
    }

    #[test]
    fn test_reinclude_inside_excluded_directory() {
        let m = matcher(&["docs", "!docs/README.md"]);
        assert!(m.matches("docs/guide.md"));
        assert!(!m.matches("docs/README.md"));
    }

    #[test]
    fn test_path_normalization() {
        let m = matcher(&["build"]);
        assert!(m.matches("./build"));
        assert!(m.matches("build/"));
        assert!(m.matches(r"build\out\app.o"));
    }

    #[test]
    fn test_empty_path_is_root() {
        let m = matcher(&["."]);
        assert!(m.matches(""));
        assert!(m.matches("./"));
    }

    #[test]
    fn test_empty_matcher_ignores_dockerignore() {
        let m = IgnoreMatcher::default();
        assert!(m.matches(".dockerignore"));
        assert!(m.matches("./.dockerignore"));
        assert!(!m.matches("Dockerfile"));
        assert!(!m.matches("src/main.rs"));
    }

    #[test]
    fn test_create_returns_none_without_rules() {
        assert!(create_ignore_matcher(Vec::<String>::new()).is_none());
        assert!(create_ignore_matcher(["   ", "# comment"]).is_none());
        assert!(create_ignore_matcher(["./", "  "]).is_none());
    }

    #[test]
    fn test_create_keeps_order() {
        let m = create_ignore_matcher(["# build output", "target/", "", "!target/keep"])
            .expect("matcher");
        let raws: Vec<&str> = m.patterns().iter().map(Pattern::raw).collect();
        assert_eq!(raws, ["target", "!target/keep"]);
        assert!(m.has_negations());
        assert!(m.matches("target/debug/app"));
        assert!(!m.matches("target/keep"));
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("a/b/c"), ["a", "a/b"]);
        assert!(ancestors("a").is_empty());
    }

    proptest! {
        #[test]
        fn prop_pattern_matches_its_own_path((line, path) in plain_pattern()) {
            let m = matcher(&[line.as_str()]);
            prop_assert!(m.matches(&path));
            let dotted = format!("./{path}");
            prop_assert!(m.matches(&dotted));
            let trailing = format!("{path}/");
            prop_assert!(m.matches(&trailing));
        }

        #[test]
        fn prop_pattern_matches_paths_below_it((line, path) in plain_pattern()) {
            let m = matcher(&[line.as_str()]);
            let child = format!("{path}/child");
            prop_assert!(m.matches(&child));
            let nested = format!("{path}/a/b.txt");
            prop_assert!(m.matches(&nested));
        }
    }

    /// A pattern line without `!`, comments or classes, paired with the
    /// root-relative path it spells.
    fn plain_pattern() -> impl Strategy<Value = (String, String)> {
        let segment = "[a-zA-Z0-9._+*?-]{1,6}".prop_filter("not a dot segment", |s| s != ".");
        (
            prop::sample::select(vec!["", "/", "./"]),
            prop::collection::vec(segment, 1..4),
            prop::sample::select(vec!["", "/"]),
        )
            .prop_map(|(prefix, segments, suffix)| {
                let path = segments.join("/");
                (format!("{prefix}{path}{suffix}"), path)
            })
    }
}
