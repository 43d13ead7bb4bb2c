//! Numeric engine error codes
//!
//! The engine reports the outcome of every operation as a plain integer. The
//! values below are the ones the default engine publishes; other engines may
//! report codes outside this set, which classify as internal errors.

use std::fmt;

/// Last-operation error code reported by a [`RegexEngine`](crate::engine::RegexEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// The operation completed, with or without a match
    pub const NO_ERROR: ErrorCode = ErrorCode(0);
    pub const INTERNAL_ERROR: ErrorCode = ErrorCode(1);
    pub const BACKTRACK_LIMIT_ERROR: ErrorCode = ErrorCode(2);
    pub const RECURSION_LIMIT_ERROR: ErrorCode = ErrorCode(3);
    pub const BAD_UTF8_ERROR: ErrorCode = ErrorCode(4);
    pub const BAD_UTF8_OFFSET_ERROR: ErrorCode = ErrorCode(5);
    pub const JIT_STACKLIMIT_ERROR: ErrorCode = ErrorCode(6);

    #[must_use]
    pub const fn new(raw: i32) -> Self {
        ErrorCode(raw)
    }

    /// Raw integer value as reported by the engine
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::NO_ERROR.0
    }
}

impl From<i32> for ErrorCode {
    fn from(raw: i32) -> Self {
        ErrorCode(raw)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
