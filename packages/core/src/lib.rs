//! # rematch core
//!
//! Typed errors and uniform results over a regular-expression engine.
//!
//! A [`Matcher`] pairs a [`Pattern`] with a modifier string and exposes two
//! operations: [`Matcher::match_one`] for the first occurrence and
//! [`Matcher::match_all`] for every non-overlapping occurrence. Whatever the
//! engine reports as a failure comes back as one of six [`MatchError`] kinds,
//! each naming the engine diagnostic and the full expression that failed.
//!
//! ```rust
//! use rematch_core::prelude::*;
//!
//! let matcher = Matcher::new(Pattern::new(r"/(\d+)-(\d+)/"), "");
//! let found = matcher.match_one("12-34 and 56-78")?;
//! assert_eq!(found.index(1).and_then(Capture::as_str), Some("12"));
//!
//! let all = matcher.match_all("12-34 and 56-78")?;
//! assert_eq!(all.occurrences(), 2);
//! # Ok::<(), MatchError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod flags;
pub mod matcher;
pub mod pattern;
pub mod prelude;
pub mod result;

pub use config::{ConfigurationError, EngineConfig};
pub use engine::{BacktrackEngine, Exec, RegexEngine};
pub use error::{EngineFailure, ErrorCode, MatchError, MatchOutcome};
pub use flags::MatchFlags;
pub use matcher::Matcher;
pub use pattern::Pattern;
pub use result::{Capture, GroupKey, Groups, MatchAllResult, MatchResult};
