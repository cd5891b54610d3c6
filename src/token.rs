//! Defines the `Token`, `TokenKind` and `TokenSet` types.
//!
//! These are the shared vocabulary between the `Tokenizer` (lexer) and the
//! `Parser`. A `TokenSet` is what the parser's transition table stores for
//! each state: the kinds that may legally come next.

use std::borrow::Cow;
use std::fmt;

/// The lexical category of a `Token`.
///
/// `BeginDoc` and `EndDoc` are sentinels. The tokenizer never emits
/// `BeginDoc`; it is the state the parser starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Start of the document.
    BeginDoc,
    /// A string literal, e.g. `"hello"`.
    String,
    /// A number literal, e.g. `-1.5e3`.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// End of the input buffer.
    EndDoc,
}

impl TokenKind {
    /// Returns `true` for the kinds that are complete values on their own.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null
        )
    }

    /// A short description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::BeginDoc => "start of document",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::BeginObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::BeginArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::EndDoc => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An immutable set of token kinds.
///
/// Membership is a plain linear scan: sets hold at most seven kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(&'static [TokenKind]);

impl TokenSet {
    /// Wraps a static slice of kinds.
    pub const fn new(kinds: &'static [TokenKind]) -> Self {
        TokenSet(kinds)
    }

    /// Returns `true` if `kind` is in the set.
    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }

    /// The kinds in the set, in table order.
    pub fn kinds(&self) -> &'static [TokenKind] {
        self.0
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.0.len().saturating_sub(1);
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(if i == last { " or " } else { ", " })?;
            }
            f.write_str(kind.describe())?;
        }
        Ok(())
    }
}

/// The literal payload carried by scalar tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    /// A decoded string. Borrowed from the input when it contained no escapes.
    Str(Cow<'a, str>),
    /// The raw text of a number literal, already checked against the grammar.
    Number(&'a str),
    /// A boolean literal.
    Bool(bool),
}

/// A single token produced by the `Tokenizer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The lexical category.
    pub kind: TokenKind,
    /// The literal value for `String`, `Number` and `Boolean` tokens.
    pub payload: Option<Literal<'a>>,
    /// The 0-based character offset where the token starts.
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub(crate) fn punct(kind: TokenKind, offset: usize) -> Self {
        Token {
            kind,
            payload: None,
            offset,
        }
    }

    pub(crate) fn literal(kind: TokenKind, payload: Literal<'a>, offset: usize) -> Self {
        Token {
            kind,
            payload: Some(payload),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_set_display() {
        const ONE: TokenSet = TokenSet::new(&[TokenKind::Colon]);
        const TWO: TokenSet = TokenSet::new(&[TokenKind::Comma, TokenKind::EndArray]);
        const THREE: TokenSet =
            TokenSet::new(&[TokenKind::String, TokenKind::Number, TokenKind::Null]);

        assert_eq!(ONE.to_string(), "':'");
        assert_eq!(TWO.to_string(), "',' or ']'");
        assert_eq!(THREE.to_string(), "string, number or null");
    }

    #[test]
    fn test_token_set_membership() {
        let set = TokenSet::new(&[TokenKind::EndObject, TokenKind::String]);
        assert!(set.contains(TokenKind::String));
        assert!(!set.contains(TokenKind::Number));
        assert_eq!(set.kinds().len(), 2);
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(TokenKind::Null.is_scalar());
        assert!(TokenKind::Boolean.is_scalar());
        assert!(!TokenKind::Comma.is_scalar());
        assert!(!TokenKind::EndDoc.is_scalar());
    }
}
