//! Loading ignore rules from disk.
//!
//! Loaders fail open: a missing, unreadable or non-regular ignore file means
//! "no rules", never an error, so a bad ignore file cannot block an upload.

use super::matcher::{create_ignore_matcher, IgnoreMatcher, DOCKERIGNORE};
use std::path::{Path, PathBuf};

/// Load `.dockerignore` from `dir`.
pub async fn load_ignore_dir(dir: &Path) -> Option<IgnoreMatcher> {
    load_ignore_file(&dir.join(DOCKERIGNORE)).await
}

/// Load an ignore file from an explicit path.
pub async fn load_ignore_file(path: &Path) -> Option<IgnoreMatcher> {
    let content = match read_regular_file(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No ignore file");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable ignore file");
            return None;
        }
    };

    let matcher = parse_ignore_file(&content);
    tracing::debug!(
        path = %path.display(),
        rules = matcher.as_ref().map_or(0, |m| m.patterns().len()),
        "Loaded ignore file"
    );
    matcher
}

/// Parse ignore-file text: one rule per line, `#` comments and blanks skipped.
pub fn parse_ignore_file(content: &str) -> Option<IgnoreMatcher> {
    create_ignore_matcher(
        content
            .split(|c: char| c == '\n' || c == '\r')
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

async fn read_regular_file(path: &Path) -> std::io::Result<String> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    tokio::fs::read_to_string(path).await
}

/// Where the upload path gets its ignore rules from.
#[derive(Debug, Clone, Default)]
pub enum IgnoreSource {
    /// `.dockerignore` in the upload root, if present.
    #[default]
    Default,
    /// An explicit ignore file. Relative paths resolve against the upload root.
    File(PathBuf),
    /// Inline rules.
    Patterns(Vec<String>),
    /// A matcher built by the caller.
    Matcher(IgnoreMatcher),
    /// No filtering.
    None,
}

impl IgnoreSource {
    /// Produce the matcher for an upload rooted at `root`.
    ///
    /// `None` means every entry is included.
    pub async fn resolve(&self, root: &Path) -> Option<IgnoreMatcher> {
        match self {
            Self::Default => load_ignore_dir(root).await,
            Self::File(path) if path.is_absolute() => load_ignore_file(path).await,
            Self::File(path) => load_ignore_file(&root.join(path)).await,
            Self::Patterns(lines) => create_ignore_matcher(lines),
            Self::Matcher(matcher) => Some(matcher.clone()),
            Self::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let matcher = parse_ignore_file("# deps\nnode_modules\n\n   \n*.log\n").expect("rules");
        let raws: Vec<&str> = matcher.patterns().iter().map(|p| p.raw()).collect();
        assert_eq!(raws, ["node_modules", "*.log"]);
    }

    #[test]
    fn test_parse_handles_any_newline() {
        let matcher = parse_ignore_file("a\r\nb\rc\n").expect("rules");
        assert_eq!(matcher.patterns().len(), 3);
    }

    #[test]
    fn test_parse_only_comments() {
        assert!(parse_ignore_file("# nothing here\n\n").is_none());
        assert!(parse_ignore_file("").is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let path = Path::new("/nonexistent/devbox/.dockerignore");
        assert!(load_ignore_file(path).await.is_none());
    }

    #[tokio::test]
    async fn test_inline_source() {
        let source = IgnoreSource::Patterns(vec!["target".into(), "# x".into()]);
        let matcher = source.resolve(Path::new("/unused")).await.expect("rules");
        assert!(matcher.matches("target/debug"));
    }

    #[tokio::test]
    async fn test_none_source() {
        assert!(IgnoreSource::None.resolve(Path::new("/unused")).await.is_none());
    }
}
