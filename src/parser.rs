//! Contains the `Parser` and its state machine.
//!
//! The parser pulls `Token`s from the `Tokenizer` one at a time. Grammar
//! legality is decided by a single constant table, [`State::legal_next`],
//! which maps the state (what was consumed last, and inside which kind of
//! container) to the set of token kinds allowed next. Nesting is tracked
//! with an explicit stack of `Frame`s instead of native recursion, so deep
//! documents cost heap, not call stack.

use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use crate::token::{Literal, Token, TokenKind, TokenSet};
use crate::tokenizer::Tokenizer;
use crate::value::{JsonNumber, JsonValue, Map};
use tracing::{debug, trace};

// --- Transition table sets ---
const VALUE: &[TokenKind] = &[
    TokenKind::BeginObject,
    TokenKind::BeginArray,
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::Null,
];
const OBJECT_FIRST: &[TokenKind] = &[TokenKind::EndObject, TokenKind::String];
const OBJECT_KEY: &[TokenKind] = &[TokenKind::String];
const COLON: &[TokenKind] = &[TokenKind::Colon];
const OBJECT_NEXT: &[TokenKind] = &[TokenKind::Comma, TokenKind::EndObject];
const ARRAY_FIRST: &[TokenKind] = &[
    TokenKind::EndArray,
    TokenKind::BeginObject,
    TokenKind::BeginArray,
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::Null,
];
const ARRAY_NEXT: &[TokenKind] = &[TokenKind::Comma, TokenKind::EndArray];
const END: &[TokenKind] = &[TokenKind::EndDoc];

/// Where the parser is in the grammar.
///
/// Each state names the last thing consumed, qualified by the kind of the
/// innermost open container where that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing consumed yet.
    BeginDoc,
    /// Just after `{`.
    BeginObject,
    /// Just after an object key.
    ObjectKey,
    /// Just after the `:` following a key.
    ObjectColon,
    /// Just after a value inside an object.
    ObjectValue,
    /// Just after a `,` inside an object.
    ObjectComma,
    /// Just after `[`.
    BeginArray,
    /// Just after a value inside an array.
    ArrayValue,
    /// Just after a `,` inside an array.
    ArrayComma,
    /// The root value is complete.
    RootComplete,
}

impl State {
    /// The transition table: token kinds that may follow this state.
    ///
    /// A `,` may never be followed by a closing delimiter, which is what
    /// rejects trailing commas.
    pub const fn legal_next(self) -> TokenSet {
        match self {
            State::BeginDoc | State::ObjectColon | State::ArrayComma => TokenSet::new(VALUE),
            State::BeginObject => TokenSet::new(OBJECT_FIRST),
            State::ObjectKey => TokenSet::new(COLON),
            State::ObjectValue => TokenSet::new(OBJECT_NEXT),
            State::ObjectComma => TokenSet::new(OBJECT_KEY),
            State::BeginArray => TokenSet::new(ARRAY_FIRST),
            State::ArrayValue => TokenSet::new(ARRAY_NEXT),
            State::RootComplete => TokenSet::new(END),
        }
    }
}

/// One open, not yet closed container.
#[derive(Debug)]
enum Frame {
    /// An object and the key waiting for its value.
    Object { map: Map, key: String },
    Array(Vec<JsonValue>),
}

impl Frame {
    fn into_value(self) -> JsonValue {
        match self {
            Frame::Object { map, .. } => JsonValue::Object(map),
            Frame::Array(items) => JsonValue::Array(items),
        }
    }
}

/// Builds the value for a scalar token.
fn scalar(payload: Option<Literal<'_>>) -> JsonValue {
    match payload {
        Some(Literal::Str(s)) => JsonValue::String(s.into_owned()),
        Some(Literal::Number(n)) => JsonValue::Number(JsonNumber::from_literal(n)),
        Some(Literal::Bool(b)) => JsonValue::Bool(b),
        None => JsonValue::Null,
    }
}

/// The JSON parser.
///
/// A `Parser` handles exactly one document: create it with [`Parser::new`]
/// and consume it with [`Parser::parse`].
pub struct Parser<'a> {
    /// The input text, kept for the size check.
    input: &'a str,
    /// The tokenizer (lexer) that breaks the input string into `Token`s.
    tokenizer: Tokenizer<'a>,
    /// Open containers, innermost last.
    stack: Vec<Frame>,
    /// The current grammar state.
    state: State,
    /// Depth and size limits.
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `input` with the given limits.
    pub fn new(input: &'a str, config: ParserConfig) -> Self {
        Parser {
            input,
            tokenizer: Tokenizer::new(input),
            stack: Vec::new(),
            state: State::BeginDoc,
            config,
        }
    }

    /// Parses the whole document.
    ///
    /// # Errors
    /// Returns the first lexical, grammar or limit violation. No partial
    /// tree is ever returned.
    pub fn parse(mut self) -> Result<JsonValue> {
        debug!(bytes = self.input.len(), "parsing JSON document");
        match self.run() {
            Ok(root) => Ok(root),
            Err(e) => {
                debug!(error = %e, "JSON parse failed");
                Err(e)
            }
        }
    }

    fn run(&mut self) -> Result<JsonValue> {
        if self.input.len() > self.config.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size: self.input.len(),
                limit: self.config.max_input_bytes,
            });
        }

        let root = loop {
            let token = self.tokenizer.next_token()?;
            if let Some(root) = self.advance(token)? {
                break root;
            }
        };

        // Trailing text is reported as such even when it would not lex.
        let end = self.tokenizer.finish()?;
        self.check(&end)?;
        Ok(root)
    }

    /// Rejects `token` unless the table allows it in the current state.
    fn check(&self, token: &Token<'_>) -> Result<()> {
        let expected = self.state.legal_next();
        if expected.contains(token.kind) {
            Ok(())
        } else {
            Err(self.reject(token, expected))
        }
    }

    fn reject(&self, token: &Token<'_>, expected: TokenSet) -> ParseError {
        if token.kind == TokenKind::EndDoc {
            ParseError::UnexpectedEndOfInput {
                offset: token.offset,
            }
        } else {
            ParseError::UnexpectedToken {
                offset: token.offset,
                expected,
                actual: token.kind,
            }
        }
    }

    /// Consumes one token. Returns the root value once it is complete.
    fn advance(&mut self, token: Token<'a>) -> Result<Option<JsonValue>> {
        self.check(&token)?;

        let value = match token.kind {
            TokenKind::BeginObject => {
                let frame = Frame::Object {
                    map: Map::new(),
                    key: String::new(),
                };
                self.push(frame, token.offset)?;
                self.state = State::BeginObject;
                return Ok(None);
            }
            TokenKind::BeginArray => {
                self.push(Frame::Array(Vec::new()), token.offset)?;
                self.state = State::BeginArray;
                return Ok(None);
            }
            TokenKind::Colon => {
                self.state = State::ObjectColon;
                return Ok(None);
            }
            TokenKind::Comma => {
                self.state = match self.stack.last() {
                    Some(Frame::Array(_)) => State::ArrayComma,
                    _ => State::ObjectComma,
                };
                return Ok(None);
            }
            TokenKind::String if matches!(self.state, State::BeginObject | State::ObjectComma) => {
                if let (Some(Frame::Object { key, .. }), Some(Literal::Str(name))) =
                    (self.stack.last_mut(), token.payload)
                {
                    *key = name.into_owned();
                }
                self.state = State::ObjectKey;
                return Ok(None);
            }
            TokenKind::EndObject | TokenKind::EndArray => match self.stack.pop() {
                Some(frame) => {
                    trace!(depth = self.stack.len(), "closed container");
                    frame.into_value()
                }
                None => return Err(self.reject(&token, self.state.legal_next())),
            },
            kind if kind.is_scalar() => scalar(token.payload),
            _ => return Err(self.reject(&token, self.state.legal_next())),
        };

        Ok(self.attach(value))
    }

    fn push(&mut self, frame: Frame, offset: usize) -> Result<()> {
        if self.stack.len() >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset,
                limit: self.config.max_depth,
            });
        }
        self.stack.push(frame);
        trace!(depth = self.stack.len(), "opened container");
        Ok(())
    }

    /// Hands a finished value to the innermost frame, or completes the root.
    fn attach(&mut self, value: JsonValue) -> Option<JsonValue> {
        match self.stack.last_mut() {
            None => {
                self.state = State::RootComplete;
                Some(value)
            }
            Some(Frame::Object { map, key }) => {
                // Last occurrence of a duplicate key wins.
                map.insert(std::mem::take(key), value);
                self.state = State::ObjectValue;
                None
            }
            Some(Frame::Array(items)) => {
                items.push(value);
                self.state = State::ArrayValue;
                None
            }
        }
    }
}
