//! Regex engine seam
//!
//! A [`RegexEngine`] compiles a composed `pattern + modifier` expression and
//! runs it. Every call hands back its data together with the error code of
//! that very call, so there is no shared "last error" to race on.

pub mod backtrack;
pub mod expression;

pub use backtrack::BacktrackEngine;
pub use expression::{Expression, ExpressionError, Modifiers};

use crate::error::{DiagnosticTable, ErrorCode};
use crate::flags::MatchFlags;
use crate::result::{MatchAllResult, MatchResult};

/// Outcome of one engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec<T> {
    pub data: T,
    pub code: ErrorCode,
    /// Engine's explanation of a failure
    pub detail: Option<String>,
}

impl<T> Exec<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            code: ErrorCode::NO_ERROR,
            detail: None,
        }
    }
}

impl<T: Default> Exec<T> {
    pub fn failed(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            data: T::default(),
            code,
            detail: Some(detail.into()),
        }
    }
}

/// Matching engine collaborator
pub trait RegexEngine: Send + Sync {
    /// First occurrence of `expression` in `subject` at or after `offset`
    fn exec_match(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Exec<MatchResult>;

    /// Every non-overlapping occurrence at or after `offset`
    fn exec_match_all(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Exec<MatchAllResult>;

    /// Names of the codes this engine reports
    fn diagnostics(&self) -> &DiagnosticTable;
}
