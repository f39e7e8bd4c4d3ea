//! # devbox-core
//!
//! Client-side building blocks of the devbox SDK that carry real logic:
//! deciding which files of a local directory get uploaded, and keeping
//! long-lived API streams alive across server-side request timeouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     devbox-core (host)                   │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  ┌─────────────────┐     ┌──────────────────────────┐   │
//! │  │ UploadManifest  │────▶│  IgnoreSource            │   │
//! │  │   - collect()   │     │   - .dockerignore / file │   │
//! │  └─────────────────┘     │   - inline patterns      │   │
//! │           │              └──────────────────────────┘   │
//! │           ▼                         │                    │
//! │  ┌─────────────────┐                ▼                   │
//! │  │ IgnoreMatcher   │◀──── Pattern ◀── CompiledGlob       │
//! │  │  - matches()    │                                    │
//! │  └─────────────────┘                                    │
//! │                                                          │
//! │  ┌─────────────────┐     ┌──────────────────────────┐   │
//! │  │ reconnecting()  │────▶│  creator(offset)         │   │
//! │  │  408 => reopen  │     │  (API stream transport)  │   │
//! │  └─────────────────┘     └──────────────────────────┘   │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use devbox_core::{UploadConfig, UploadManifest};
//!
//! # async fn example() -> devbox_core::Result<()> {
//! let config = UploadConfig::builder()
//!     .root("./my-app")
//!     .ignore_patterns(["target", "*.log", "!keep.log"])
//!     .build()?;
//!
//! let manifest = UploadManifest::collect(&config).await?;
//! for entry in manifest.entries() {
//!     println!("{} ({} bytes)", entry.path, entry.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Docker-compatible ignore rules**: ordered evaluation, `!` negation,
//!   parent-directory matching, `*`, `**`, `?` and character classes
//! - **Fail-open loading**: a missing or unreadable ignore file never blocks an upload
//! - **Resumable streams**: request timeouts reconnect from the last delivered offset

pub mod ignore;
pub mod stream;

mod config;
mod error;
mod upload;

pub use config::{UploadConfig, UploadConfigBuilder};
pub use error::{ApiError, CoreError, HttpStatus, Result, REQUEST_TIMEOUT};
pub use ignore::{create_ignore_matcher, IgnoreMatcher, IgnoreSource, Pattern};
pub use stream::reconnecting;
pub use upload::{EntryKind, UploadEntry, UploadManifest};
