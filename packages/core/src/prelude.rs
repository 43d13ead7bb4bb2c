//! Types most callers need

pub use crate::config::{ConfigurationError, EngineConfig, Validator};
pub use crate::engine::{BacktrackEngine, RegexEngine};
pub use crate::error::{EngineFailure, ErrorCode, MatchError, MatchOutcome};
pub use crate::flags::MatchFlags;
pub use crate::matcher::Matcher;
pub use crate::pattern::Pattern;
pub use crate::result::{Capture, GroupKey, MatchAllResult, MatchResult};
