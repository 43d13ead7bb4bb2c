//! # rematch
//!
//! Regex matching with a typed error for every way the engine can fail and
//! one result shape for single and repeated matches.
//!
//! ```rust
//! use rematch::{Capture, Rematch};
//!
//! let matcher = Rematch::pattern(r"/(?P<user>\w+)@(?P<host>\w+)/").unicode().build()?;
//! let found = matcher.match_one("mail ops@example")?;
//! assert_eq!(found.name("host").and_then(Capture::as_str), Some("example"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::{Arc, OnceLock};

pub mod builder;

pub use builder::MatcherBuilder;

// Re-export the public types from the core package
pub use rematch_core::prelude::*;
pub use rematch_core::{Exec, GroupKey, Groups};

/// Engine shared by matchers built without a custom config
static GLOBAL_ENGINE: OnceLock<Arc<BacktrackEngine>> = OnceLock::new();

/// Shared default engine
pub fn global_engine() -> Arc<BacktrackEngine> {
    Arc::clone(GLOBAL_ENGINE.get_or_init(|| Arc::new(BacktrackEngine::default())))
}

/// Main entry point providing static builder methods
pub struct Rematch;

impl Rematch {
    /// Start building a matcher for `pattern`
    ///
    /// Shorthand for `MatcherBuilder::new(pattern)`
    pub fn pattern(pattern: impl Into<Pattern>) -> MatcherBuilder {
        MatcherBuilder::new(pattern)
    }
}

/// First match of `pattern` (modifiers included after the closing delimiter)
///
/// # Errors
///
/// Returns the [`MatchError`] kind the engine reported.
pub fn match_one(pattern: &str, subject: impl AsRef<[u8]>) -> MatchOutcome<MatchResult> {
    Matcher::with_engine(Pattern::new(pattern), "", global_engine()).match_one(subject)
}

/// Every match of `pattern` (modifiers included after the closing delimiter)
///
/// # Errors
///
/// Returns the [`MatchError`] kind the engine reported.
pub fn match_all(pattern: &str, subject: impl AsRef<[u8]>) -> MatchOutcome<MatchAllResult> {
    Matcher::with_engine(Pattern::new(pattern), "", global_engine()).match_all(subject)
}
