//! Pattern matcher
//!
//! Composes a [`Pattern`] with a modifier string, runs it through a
//! [`RegexEngine`] and turns any failure code the engine reports into a
//! [`MatchError`]. Matchers hold no per-call state and can be shared freely.

use std::fmt;
use std::sync::Arc;

use crate::engine::{BacktrackEngine, Exec, RegexEngine};
use crate::error::{MatchError, MatchOutcome, classify};
use crate::flags::MatchFlags;
use crate::pattern::Pattern;
use crate::result::{MatchAllResult, MatchResult};

/// Runs one pattern, with one modifier, against many subjects
///
/// With the default [`BacktrackEngine`], `$` only matches at the end of the
/// subject unless `m` is set; a trailing newline is never skipped, so `D` is
/// accepted but changes nothing.
pub struct Matcher<E: RegexEngine = BacktrackEngine> {
    pattern: Arc<Pattern>,
    modifier: String,
    expression: String,
    engine: Arc<E>,
}

impl Matcher<BacktrackEngine> {
    /// Matcher on the default engine with default budgets
    pub fn new(pattern: impl Into<Arc<Pattern>>, modifier: impl Into<String>) -> Self {
        Self::with_engine(pattern, modifier, Arc::new(BacktrackEngine::default()))
    }
}

impl<E: RegexEngine> Matcher<E> {
    pub fn with_engine(
        pattern: impl Into<Arc<Pattern>>,
        modifier: impl Into<String>,
        engine: Arc<E>,
    ) -> Self {
        let pattern = pattern.into();
        let modifier = modifier.into();
        let expression = pattern.compose(&modifier);
        Self {
            pattern,
            modifier,
            expression,
            engine,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn modifier(&self) -> &str {
        &self.modifier
    }

    /// Pattern text followed by the modifier, as handed to the engine
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// First match in `subject`, with default flags from offset 0
    ///
    /// # Errors
    ///
    /// Returns the [`MatchError`] kind matching the engine's failure code.
    pub fn match_one(&self, subject: impl AsRef<[u8]>) -> MatchOutcome<MatchResult> {
        self.match_one_with(subject, MatchFlags::empty(), 0)
    }

    /// First match in `subject` at or after byte `offset`
    ///
    /// An empty result means no match; a match always carries group 0.
    ///
    /// # Errors
    ///
    /// Returns the [`MatchError`] kind matching the engine's failure code.
    pub fn match_one_with(
        &self,
        subject: impl AsRef<[u8]>,
        flags: MatchFlags,
        offset: usize,
    ) -> MatchOutcome<MatchResult> {
        let subject = subject.as_ref();
        let exec = self
            .engine
            .exec_match(&self.expression, subject, flags, offset);
        let groups = self.settle("match", exec)?;
        tracing::debug!(
            expression = %self.expression,
            subject_len = subject.len(),
            offset,
            matched = groups.is_match(),
            "match completed"
        );
        Ok(groups)
    }

    /// Every match in `subject`, with default flags from offset 0
    ///
    /// # Errors
    ///
    /// Returns the [`MatchError`] kind matching the engine's failure code.
    pub fn match_all(&self, subject: impl AsRef<[u8]>) -> MatchOutcome<MatchAllResult> {
        self.match_all_with(subject, MatchFlags::PATTERN_ORDER, 0)
    }

    /// Every non-overlapping match in `subject` at or after byte `offset`
    ///
    /// A failure on any occurrence fails the whole call; occurrences found
    /// before it are discarded.
    ///
    /// # Errors
    ///
    /// Returns the [`MatchError`] kind matching the engine's failure code.
    pub fn match_all_with(
        &self,
        subject: impl AsRef<[u8]>,
        flags: MatchFlags,
        offset: usize,
    ) -> MatchOutcome<MatchAllResult> {
        let subject = subject.as_ref();
        let exec = self
            .engine
            .exec_match_all(&self.expression, subject, flags, offset);
        let groups = self.settle("match_all", exec)?;
        tracing::debug!(
            expression = %self.expression,
            subject_len = subject.len(),
            offset,
            occurrences = groups.occurrences(),
            "match_all completed"
        );
        Ok(groups)
    }

    fn settle<T>(&self, operation: &'static str, exec: Exec<T>) -> MatchOutcome<T> {
        let Exec { data, code, detail } = exec;
        match classify(code, self.engine.diagnostics(), &self.expression, detail) {
            None => Ok(data),
            Some(error) => {
                log_failure(operation, &error);
                Err(error)
            }
        }
    }
}

fn log_failure(operation: &'static str, error: &MatchError) {
    tracing::warn!(
        operation,
        kind = error.kind_name(),
        code = error.code().raw(),
        detail = error.detail().unwrap_or_default(),
        "{error}"
    );
}

impl<E: RegexEngine> Clone for Matcher<E> {
    fn clone(&self) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
            modifier: self.modifier.clone(),
            expression: self.expression.clone(),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E: RegexEngine> fmt::Debug for Matcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.pattern.as_str())
            .field("modifier", &self.modifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DiagnosticTable, EngineConstant, ErrorCode};
    use once_cell::sync::Lazy;

    /// Engine that fails every call with a fixed code
    struct FailingEngine(ErrorCode);

    static TABLE: Lazy<DiagnosticTable> = Lazy::new(|| {
        DiagnosticTable::from_constants(7, &[EngineConstant::new("JIT_STACKLIMIT_ERROR", 6, "")])
    });

    impl RegexEngine for FailingEngine {
        fn exec_match(&self, _: &str, _: &[u8], _: MatchFlags, _: usize) -> Exec<MatchResult> {
            Exec::failed(self.0, "forced")
        }

        fn exec_match_all(
            &self,
            _: &str,
            _: &[u8],
            _: MatchFlags,
            _: usize,
        ) -> Exec<MatchAllResult> {
            Exec::failed(self.0, "forced")
        }

        fn diagnostics(&self) -> &DiagnosticTable {
            &TABLE
        }
    }

    #[test]
    fn expression_appends_the_modifier() {
        let matcher = Matcher::new(Pattern::new("/a/"), "iu");
        assert_eq!(matcher.expression(), "/a/iu");
        assert_eq!(matcher.modifier(), "iu");
        assert_eq!(matcher.pattern().as_str(), "/a/");
    }

    #[test]
    fn engine_failures_become_typed_errors() {
        let matcher = Matcher::with_engine(
            Pattern::new("/a/"),
            "u",
            Arc::new(FailingEngine(ErrorCode::JIT_STACKLIMIT_ERROR)),
        );
        let err = matcher.match_one("a").unwrap_err();
        assert!(err.is_jit_stack_limit());
        assert_eq!(err.to_string(), "JIT_STACKLIMIT_ERROR using pattern: /a/u");

        let err = matcher.match_all("a").unwrap_err();
        assert!(err.is_jit_stack_limit());
        assert_eq!(err.detail(), Some("forced"));
    }

    #[test]
    fn codes_the_engine_never_published_still_fail() {
        let matcher = Matcher::with_engine(
            Pattern::new("/a/"),
            "",
            Arc::new(FailingEngine(ErrorCode::new(17))),
        );
        let err = matcher.match_one("a").unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "UnknownEngineError(17) using pattern: /a/");
    }

    #[test]
    fn matchers_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
        assert_send_sync::<Matcher<FailingEngine>>();
    }
}
