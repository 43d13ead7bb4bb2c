//! Delimited expression parsing
//!
//! Splits `<delim>body<delim>modifiers` into the regex body and the option
//! set the modifiers select.

/// Options selected by modifier characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`
    pub dot_all: bool,
    /// `x`
    pub extended: bool,
    /// `u`: UTF-8 subjects and Unicode-aware classes
    pub unicode: bool,
    /// `U`
    pub ungreedy: bool,
    /// `A`: match only at the search start
    pub anchored: bool,
}

impl Modifiers {
    fn apply(&mut self, modifier: char) -> Result<(), ExpressionError> {
        match modifier {
            'i' => self.case_insensitive = true,
            'm' => self.multi_line = true,
            's' => self.dot_all = true,
            'x' => self.extended = true,
            'u' => self.unicode = true,
            'U' => self.ungreedy = true,
            'A' => self.anchored = true,
            // `$` never matches before a trailing newline here, so `D` is already in effect.
            'D' | 'S' | 'X' => {}
            ' ' | '\n' | '\r' => {}
            '\0' => return Err(ExpressionError::NulModifier),
            other => return Err(ExpressionError::UnknownModifier(other)),
        }
        Ok(())
    }
}

/// Why a composed expression could not be split
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("Empty regular expression")]
    Empty,
    #[error("Delimiter must not be alphanumeric, backslash, or NUL")]
    InvalidDelimiter,
    #[error("No ending delimiter '{0}' found")]
    MissingDelimiter(char),
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(char),
    #[error("NUL is not a valid modifier")]
    NulModifier,
}

/// A split expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub body: String,
    pub modifiers: Modifiers,
}

impl Expression {
    pub fn parse(expression: &str) -> Result<Self, ExpressionError> {
        let trimmed = expression.trim_start();
        let mut chars = trimmed.char_indices();
        let Some((_, start)) = chars.next() else {
            return Err(ExpressionError::Empty);
        };
        if start.is_alphanumeric() || start == '\\' || start == '\0' {
            return Err(ExpressionError::InvalidDelimiter);
        }
        let end = closing_delimiter(start);

        let mut depth = 1usize;
        let mut body = String::new();
        let mut close_at = None;
        while let Some((index, c)) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    // An escaped delimiter that is not a regex metacharacter loses its escape.
                    Some((_, escaped))
                        if (escaped == start || escaped == end)
                            && !regex_syntax::is_meta_character(escaped) =>
                    {
                        body.push(escaped);
                    }
                    Some((_, escaped)) => {
                        body.push('\\');
                        body.push(escaped);
                    }
                    None => body.push('\\'),
                }
                continue;
            }
            if c == end {
                depth -= 1;
                if depth == 0 {
                    close_at = Some(index + c.len_utf8());
                    break;
                }
            } else if c == start {
                depth += 1;
            }
            body.push(c);
        }

        let Some(close_at) = close_at else {
            return Err(ExpressionError::MissingDelimiter(end));
        };

        let mut modifiers = Modifiers::default();
        for modifier in trimmed[close_at..].chars() {
            modifiers.apply(modifier)?;
        }

        Ok(Self { body, modifiers })
    }
}

fn closing_delimiter(start: char) -> char {
    match start {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}
