//! Contains the `ParseError` type for the library.
use crate::token::{TokenKind, TokenSet};
use std::fmt;
use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Every way a parse can fail.
///
/// All offsets are 0-based character offsets into the input. Use
/// [`ParseError::locate`] to turn one into a line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} at offset {offset}")]
    IllegalCharacter {
        /// Where the character is.
        offset: usize,
        /// The offending character.
        ch: char,
    },
    /// A `true`, `false` or `null` keyword that is misspelled or cut short.
    #[error("invalid literal at offset {offset}, expected '{expected}'")]
    InvalidLiteral {
        /// Start of the literal.
        offset: usize,
        /// The keyword the first character promised.
        expected: &'static str,
    },
    /// A malformed string literal.
    #[error("invalid string at offset {offset}: {reason}")]
    InvalidString {
        /// Where the problem was detected.
        offset: usize,
        /// What was wrong.
        reason: StringError,
    },
    /// A number that does not match the JSON number grammar.
    #[error("invalid number at offset {offset}")]
    InvalidNumber {
        /// Start of the number.
        offset: usize,
    },
    /// A well-formed token in a place the grammar does not allow it.
    #[error("unexpected {actual} at offset {offset}, expected {expected}")]
    UnexpectedToken {
        /// Start of the token.
        offset: usize,
        /// What the grammar allows here.
        expected: TokenSet,
        /// What was found.
        actual: TokenKind,
    },
    /// The input ended in the middle of a document.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput {
        /// The length of the input in characters.
        offset: usize,
    },
    /// Non-whitespace content after a complete document.
    #[error("trailing content at offset {offset}")]
    TrailingContent {
        /// Start of the trailing content.
        offset: usize,
    },
    /// An object or array opened beyond the configured depth.
    #[error("maximum nesting depth of {limit} exceeded at offset {offset}")]
    NestingTooDeep {
        /// The offending `{` or `[`.
        offset: usize,
        /// The configured limit.
        limit: usize,
    },
    /// The input is larger than the configured size limit.
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes.
        size: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// Why a string literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StringError {
    /// The input ended before the closing quote.
    #[error("unterminated string")]
    Unterminated,
    /// A raw U+0000..U+001F character inside the quotes.
    #[error("unescaped control character {0:?}")]
    ControlCharacter(char),
    /// A backslash followed by a character that is not a valid escape.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// `\u` not followed by four hex digits.
    #[error("invalid unicode escape, expected four hex digits")]
    InvalidUnicodeEscape,
    /// A UTF-16 surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u16),
}

impl ParseError {
    /// The character offset the error points at.
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::IllegalCharacter { offset, .. }
            | ParseError::InvalidLiteral { offset, .. }
            | ParseError::InvalidString { offset, .. }
            | ParseError::InvalidNumber { offset }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedEndOfInput { offset }
            | ParseError::TrailingContent { offset }
            | ParseError::NestingTooDeep { offset, .. } => offset,
            ParseError::InputTooLarge { .. } => 0,
        }
    }

    /// Converts the error offset into a line and column within `input`.
    ///
    /// `input` must be the text that produced the error.
    pub fn locate(&self, input: &str) -> Location {
        Location::of(input, self.offset())
    }
}

/// A 1-indexed line and column, for human-readable diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// The line number (1-indexed).
    pub line: usize,
    /// The column number (1-indexed), counted in characters.
    pub column: usize,
}

impl Location {
    /// Finds the line and column of a character offset.
    ///
    /// Offsets past the end land just after the last character.
    pub fn of(input: &str, offset: usize) -> Self {
        let mut location = Location { line: 1, column: 1 };
        for c in input.chars().take(offset) {
            if c == '\n' {
                location.line += 1;
                location.column = 1;
            } else {
                location.column += 1;
            }
        }
        location
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::UnexpectedToken {
            offset: 7,
            expected: TokenSet::new(&[TokenKind::Comma, TokenKind::EndArray]),
            actual: TokenKind::Boolean,
        };
        assert_eq!(
            error.to_string(),
            "unexpected boolean at offset 7, expected ',' or ']'"
        );

        let error = ParseError::InvalidString {
            offset: 3,
            reason: StringError::InvalidEscape('z'),
        };
        assert_eq!(
            error.to_string(),
            "invalid string at offset 3: invalid escape sequence '\\z'"
        );

        let error = ParseError::IllegalCharacter { offset: 0, ch: '?' };
        assert_eq!(error.to_string(), "unexpected character '?' at offset 0");
    }

    #[test]
    fn test_error_offset() {
        assert_eq!(ParseError::TrailingContent { offset: 8 }.offset(), 8);
        assert_eq!(
            ParseError::InputTooLarge {
                size: 20,
                limit: 10
            }
            .offset(),
            0
        );
    }

    #[test]
    fn test_locate() {
        let input = "{\n  \"a\": ?\n}";
        let error = ParseError::IllegalCharacter { offset: 9, ch: '?' };
        let location = error.locate(input);
        assert_eq!(location, Location { line: 2, column: 8 });
        assert_eq!(location.to_string(), "line 2, column 8");
    }

    #[test]
    fn test_locate_counts_characters() {
        // "é" is two bytes but one column.
        let location = Location::of("\"é\" x", 4);
        assert_eq!(location, Location { line: 1, column: 5 });
    }
}
