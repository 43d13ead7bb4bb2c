//! Code-to-name diagnostic table
//!
//! Built once from the constants an engine publishes, so an error message can
//! always name the failure even when a newer engine reports a code this crate
//! has no dedicated error kind for.

use std::borrow::Cow;
use std::collections::HashMap;

use super::codes::ErrorCode;

/// One published engine constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConstant {
    /// Symbolic name, e.g. `BACKTRACK_LIMIT_ERROR`
    pub name: &'static str,
    pub code: ErrorCode,
    /// Human-readable last-error message
    pub description: &'static str,
}

impl EngineConstant {
    #[must_use]
    pub const fn new(name: &'static str, code: i32, description: &'static str) -> Self {
        Self {
            name,
            code: ErrorCode::new(code),
            description,
        }
    }
}

/// Versioned lookup from error code to symbolic diagnostic name
#[derive(Debug, Clone)]
pub struct DiagnosticTable {
    revision: u32,
    entries: HashMap<ErrorCode, EngineConstant>,
}

impl DiagnosticTable {
    /// Build a table from an engine's published constants
    ///
    /// When two constants share a code the first one wins.
    #[must_use]
    pub fn from_constants(revision: u32, constants: &[EngineConstant]) -> Self {
        let mut entries = HashMap::with_capacity(constants.len());
        for constant in constants {
            entries.entry(constant.code).or_insert(*constant);
        }
        log::debug!(
            "built diagnostic table revision {} with {} entries",
            revision,
            entries.len()
        );
        Self { revision, entries }
    }

    #[must_use]
    pub fn revision(&self) -> u32 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, code: ErrorCode) -> Option<&EngineConstant> {
        self.entries.get(&code)
    }

    /// Symbolic name for `code`, `UnknownEngineError(code)` when unpublished
    #[must_use]
    pub fn name(&self, code: ErrorCode) -> Cow<'static, str> {
        match self.entries.get(&code) {
            Some(constant) => Cow::Borrowed(constant.name),
            None => Cow::Owned(format!("UnknownEngineError({code})")),
        }
    }

    /// Human-readable message for `code`
    #[must_use]
    pub fn describe(&self, code: ErrorCode) -> &'static str {
        self.entries
            .get(&code)
            .map_or("Unknown error", |constant| constant.description)
    }
}
