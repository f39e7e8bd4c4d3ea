//! `.dockerignore` handling for directory uploads.
//!
//! ```text
//! raw lines ──▶ Pattern (negation + normalized body) ──▶ CompiledGlob
//!                    │
//!                    ▼
//!             IgnoreMatcher::matches(path)  ──▶ true = exclude
//! ```

mod glob;
mod loader;
mod matcher;
mod pattern;

pub use glob::{compile_glob, CompiledGlob};
pub use loader::{load_ignore_dir, load_ignore_file, parse_ignore_file, IgnoreSource};
pub use matcher::{create_ignore_matcher, IgnoreMatcher, DOCKERIGNORE};
pub use pattern::Pattern;
