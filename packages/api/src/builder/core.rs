//! Core `MatcherBuilder` structure
//!
//! Collects the pattern, the modifier characters and optional engine budgets,
//! then hands out a ready [`Matcher`].

use std::sync::Arc;

use rematch_core::{BacktrackEngine, ConfigurationError, EngineConfig, Matcher, Pattern};

/// Fluent builder for [`Matcher`]
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    pattern: Pattern,
    modifier: String,
    config: Option<EngineConfig>,
}

impl MatcherBuilder {
    /// Start building a matcher for `pattern`
    #[must_use]
    pub fn new(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
            modifier: String::new(),
            config: None,
        }
    }

    /// Replace the modifier string
    #[must_use]
    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = modifier.into();
        self
    }

    /// Append one modifier character unless it is already set
    #[must_use]
    pub fn flag(mut self, modifier: char) -> Self {
        if !self.modifier.contains(modifier) {
            self.modifier.push(modifier);
        }
        self
    }

    /// `i`
    #[must_use]
    pub fn case_insensitive(self) -> Self {
        self.flag('i')
    }

    /// `m`
    #[must_use]
    pub fn multi_line(self) -> Self {
        self.flag('m')
    }

    /// `s`
    #[must_use]
    pub fn dot_all(self) -> Self {
        self.flag('s')
    }

    /// `x`
    #[must_use]
    pub fn extended(self) -> Self {
        self.flag('x')
    }

    /// `u`: UTF-8 subjects, Unicode-aware classes and character offsets
    #[must_use]
    pub fn unicode(self) -> Self {
        self.flag('u')
    }

    /// `U`
    #[must_use]
    pub fn ungreedy(self) -> Self {
        self.flag('U')
    }

    /// `A`
    #[must_use]
    pub fn anchored(self) -> Self {
        self.flag('A')
    }

    /// Run on a dedicated engine with these budgets
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the matcher
    ///
    /// Without a custom config the matcher runs on the shared default engine.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the configured budgets are invalid.
    pub fn build(self) -> Result<Matcher, ConfigurationError> {
        let engine = match self.config {
            Some(config) => Arc::new(BacktrackEngine::new(config)?),
            None => crate::global_engine(),
        };
        let matcher = Matcher::with_engine(self.pattern, self.modifier, engine);
        tracing::debug!(
            expression = matcher.expression(),
            config = ?matcher.engine().config(),
            "built matcher"
        );
        Ok(matcher)
    }
}
