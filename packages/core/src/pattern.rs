//! Regular-expression source text

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Immutable regex source, delimiters included (e.g. `/(\d+)-(\d+)/`)
///
/// Nothing is validated here; the engine reports malformed patterns when a
/// matcher first runs them.
///
/// Outside multi-line mode (`m`) the default engine treats `$` as the very
/// end of the subject, as if `D` were always set: `/abc$/` does not match
/// `"abc\n"`. Use `/abc\n?$/` or the `m` modifier to accept a trailing
/// newline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Raw pattern text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Pattern text with `modifier` appended verbatim
    #[must_use]
    pub fn compose(&self, modifier: &str) -> String {
        let mut expression = String::with_capacity(self.source.len() + modifier.len());
        expression.push_str(&self.source);
        expression.push_str(modifier);
        expression
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Pattern::new(s))
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::new(source)
    }
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_appends_modifier_verbatim() {
        let pattern = Pattern::new(r"/(\d+)-(\d+)/");
        assert_eq!(pattern.compose(""), r"/(\d+)-(\d+)/");
        assert_eq!(pattern.compose("iu"), r"/(\d+)-(\d+)/iu");
        assert_eq!(pattern.as_str(), r"/(\d+)-(\d+)/");
    }

    #[test]
    fn empty_source_is_accepted() {
        let pattern: Pattern = "".parse().expect("parsing a pattern cannot fail");
        assert_eq!(pattern.to_string(), "");
    }
}
