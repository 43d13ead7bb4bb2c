//! Engine configuration
//!
//! Budgets the default engine enforces while compiling and running an
//! expression. Exceeding one is reported through the matching error kind
//! rather than by hanging or growing without bound.

pub mod validation;

use serde::{Deserialize, Serialize};

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Deepest nesting the parser may be configured to accept
pub const MAX_RECURSION_LIMIT: u32 = 10_000;

/// Largest backtracking step budget accepted
pub const MAX_BACKTRACK_LIMIT: usize = 1 << 30;

/// Budgets for the backtracking engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backtracking steps a failing search may take. Only expressions with
    /// a repetition nested inside an unbounded repetition can approach it:
    /// a failing search over a run of `n` bytes such a repetition can
    /// consume costs about `2^n` steps.
    pub backtrack_limit: usize,
    /// Maximum nesting depth of groups, repetitions and alternations
    pub recursion_limit: u32,
    /// Heap bytes the compiled program may occupy
    pub jit_stack_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backtrack_limit: 1_000_000,
            recursion_limit: 250,
            jit_stack_limit: 10 * 1024 * 1024,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_backtrack_limit(mut self, steps: usize) -> Self {
        self.backtrack_limit = steps;
        self
    }

    #[must_use]
    pub fn with_recursion_limit(mut self, depth: u32) -> Self {
        self.recursion_limit = depth;
        self
    }

    #[must_use]
    pub fn with_jit_stack_limit(mut self, bytes: usize) -> Self {
        self.jit_stack_limit = bytes;
        self
    }
}

impl Validator for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_range(
            self.backtrack_limit,
            1,
            MAX_BACKTRACK_LIMIT,
            "backtrack_limit",
        )?;
        ConfigValidator::validate_byte_limit(self.jit_stack_limit, "jit_stack_limit")?;
        ConfigValidator::validate_range(
            self.recursion_limit,
            1,
            MAX_RECURSION_LIMIT,
            "recursion_limit",
        )?;
        Ok(())
    }
}
