use super::codes::ErrorCode;
use super::diagnostics::DiagnosticTable;
use super::types::{EngineFailure, MatchError};

/// Turn an engine code into a typed failure
///
/// Returns `None` for [`ErrorCode::NO_ERROR`]. Codes without a dedicated kind
/// become [`MatchError::Internal`] but keep their published (or fallback) name.
#[must_use]
pub fn classify(
    code: ErrorCode,
    diagnostics: &DiagnosticTable,
    expression: &str,
    detail: Option<String>,
) -> Option<MatchError> {
    if code.is_ok() {
        return None;
    }

    let mut failure = EngineFailure::new(code, diagnostics.name(code), expression);
    if let Some(detail) = detail {
        failure = failure.with_detail(detail);
    }

    let error = match code {
        ErrorCode::BACKTRACK_LIMIT_ERROR => MatchError::BacktrackLimit(failure),
        ErrorCode::RECURSION_LIMIT_ERROR => MatchError::RecursionLimit(failure),
        ErrorCode::BAD_UTF8_ERROR => MatchError::BadUtf8(failure),
        ErrorCode::BAD_UTF8_OFFSET_ERROR => MatchError::BadUtf8Offset(failure),
        ErrorCode::JIT_STACKLIMIT_ERROR => MatchError::JitStackLimit(failure),
        ErrorCode::INTERNAL_ERROR => MatchError::Internal(failure),
        _ => {
            log::warn!(
                "engine reported unmapped error code {} ({}), treating as internal",
                code,
                failure.diagnostic()
            );
            MatchError::Internal(failure)
        }
    };
    Some(error)
}

impl MatchError {
    /// Returns true for engine-internal failures, including compile errors.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, MatchError::Internal(_))
    }

    #[must_use]
    pub fn is_backtrack_limit(&self) -> bool {
        matches!(self, MatchError::BacktrackLimit(_))
    }

    #[must_use]
    pub fn is_recursion_limit(&self) -> bool {
        matches!(self, MatchError::RecursionLimit(_))
    }

    #[must_use]
    pub fn is_bad_utf8(&self) -> bool {
        matches!(self, MatchError::BadUtf8(_))
    }

    #[must_use]
    pub fn is_bad_utf8_offset(&self) -> bool {
        matches!(self, MatchError::BadUtf8Offset(_))
    }

    #[must_use]
    pub fn is_jit_stack_limit(&self) -> bool {
        matches!(self, MatchError::JitStackLimit(_))
    }

    /// Returns true when the pattern/subject pair exhausted an engine budget.
    ///
    /// Retrying the same call cannot succeed; the pattern or input has to change.
    #[must_use]
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            MatchError::BacktrackLimit(_)
                | MatchError::RecursionLimit(_)
                | MatchError::JitStackLimit(_)
        )
    }

    /// Returns true when the subject or offset was malformed.
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, MatchError::BadUtf8(_) | MatchError::BadUtf8Offset(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::diagnostics::EngineConstant;

    fn table() -> DiagnosticTable {
        DiagnosticTable::from_constants(
            1,
            &[
                EngineConstant::new("NO_ERROR", 0, "No error"),
                EngineConstant::new("INTERNAL_ERROR", 1, "Internal error"),
                EngineConstant::new("BACKTRACK_LIMIT_ERROR", 2, "Backtrack limit exhausted"),
                EngineConstant::new("RECURSION_LIMIT_ERROR", 3, "Recursion limit exhausted"),
                EngineConstant::new("BAD_UTF8_ERROR", 4, "Malformed UTF-8"),
                EngineConstant::new("BAD_UTF8_OFFSET_ERROR", 5, "Bad offset"),
                EngineConstant::new("JIT_STACKLIMIT_ERROR", 6, "JIT stack limit exhausted"),
            ],
        )
    }

    #[test]
    fn no_error_is_not_a_failure() {
        assert!(classify(ErrorCode::NO_ERROR, &table(), "/a/", None).is_none());
    }

    #[test]
    fn every_published_code_maps_to_its_kind() {
        let table = table();
        let cases: [(ErrorCode, fn(&MatchError) -> bool); 6] = [
            (ErrorCode::INTERNAL_ERROR, MatchError::is_internal),
            (ErrorCode::BACKTRACK_LIMIT_ERROR, MatchError::is_backtrack_limit),
            (ErrorCode::RECURSION_LIMIT_ERROR, MatchError::is_recursion_limit),
            (ErrorCode::BAD_UTF8_ERROR, MatchError::is_bad_utf8),
            (ErrorCode::BAD_UTF8_OFFSET_ERROR, MatchError::is_bad_utf8_offset),
            (ErrorCode::JIT_STACKLIMIT_ERROR, MatchError::is_jit_stack_limit),
        ];

        for (code, predicate) in cases {
            let error = classify(code, &table, "/x/u", None).expect("non-zero code must fail");
            assert!(predicate(&error), "code {code} classified as {}", error.kind_name());
            assert_eq!(error.code(), code);
            assert_eq!(error.expression(), "/x/u");
        }
    }

    #[test]
    fn message_names_the_diagnostic_and_the_pattern() {
        let error = classify(ErrorCode::BACKTRACK_LIMIT_ERROR, &table(), "/(a+)+$/i", None)
            .expect("should fail");
        assert_eq!(
            error.to_string(),
            "BACKTRACK_LIMIT_ERROR using pattern: /(a+)+$/i"
        );
    }

    #[test]
    fn unmapped_codes_are_internal_with_a_readable_name() {
        let error = classify(ErrorCode::new(99), &table(), "/a/", Some("new failure".into()))
            .expect("should fail");
        assert!(error.is_internal());
        assert_eq!(error.diagnostic(), "UnknownEngineError(99)");
        assert_eq!(error.detail(), Some("new failure"));
        assert_eq!(error.code().raw(), 99);
    }

    #[test]
    fn grouping_predicates() {
        let table = table();
        let backtrack = classify(ErrorCode::BACKTRACK_LIMIT_ERROR, &table, "/a/", None)
            .expect("should fail");
        let offset = classify(ErrorCode::BAD_UTF8_OFFSET_ERROR, &table, "/a/", None)
            .expect("should fail");
        assert!(backtrack.is_resource_limit());
        assert!(!backtrack.is_encoding());
        assert!(offset.is_encoding());
        assert!(!offset.is_resource_limit());
    }
}
