//! Match error types
//!
//! Six failure kinds, each wrapping the same [`EngineFailure`] payload so
//! callers can match on the kind and still log every failure uniformly.

use std::borrow::Cow;
use std::fmt;

use super::codes::ErrorCode;

/// Result type for match operations
pub type MatchOutcome<T> = Result<T, MatchError>;

/// What the engine reported when a match operation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    code: ErrorCode,
    diagnostic: Cow<'static, str>,
    expression: String,
    detail: Option<String>,
}

impl EngineFailure {
    #[must_use]
    pub fn new(
        code: ErrorCode,
        diagnostic: impl Into<Cow<'static, str>>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            code,
            diagnostic: diagnostic.into(),
            expression: expression.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Original numeric code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Engine's symbolic name for the code
    #[must_use]
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    /// Pattern text followed by the modifier, as handed to the engine
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Engine's own explanation, when it gave one
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} using pattern: {}", self.diagnostic, self.expression)
    }
}

/// Failure of a `match`/`matchAll` call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Engine-internal inconsistency unrelated to the input
    #[error("{0}")]
    Internal(EngineFailure),
    /// Backtracking budget exhausted before the match resolved
    #[error("{0}")]
    BacktrackLimit(EngineFailure),
    /// Nesting budget exhausted
    #[error("{0}")]
    RecursionLimit(EngineFailure),
    /// Subject is not valid UTF-8 in Unicode mode
    #[error("{0}")]
    BadUtf8(EngineFailure),
    /// Offset does not start a character in Unicode mode
    #[error("{0}")]
    BadUtf8Offset(EngineFailure),
    /// Compiled program exhausted its stack budget
    #[error("{0}")]
    JitStackLimit(EngineFailure),
}

impl MatchError {
    /// Shared payload of every kind
    #[must_use]
    pub fn failure(&self) -> &EngineFailure {
        match self {
            MatchError::Internal(failure)
            | MatchError::BacktrackLimit(failure)
            | MatchError::RecursionLimit(failure)
            | MatchError::BadUtf8(failure)
            | MatchError::BadUtf8Offset(failure)
            | MatchError::JitStackLimit(failure) => failure,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.failure().code()
    }

    #[must_use]
    pub fn diagnostic(&self) -> &str {
        self.failure().diagnostic()
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        self.failure().expression()
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.failure().detail()
    }

    /// Short label of the kind, for structured logs
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            MatchError::Internal(_) => "internal",
            MatchError::BacktrackLimit(_) => "backtrack_limit",
            MatchError::RecursionLimit(_) => "recursion_limit",
            MatchError::BadUtf8(_) => "bad_utf8",
            MatchError::BadUtf8Offset(_) => "bad_utf8_offset",
            MatchError::JitStackLimit(_) => "jit_stack_limit",
        }
    }
}
