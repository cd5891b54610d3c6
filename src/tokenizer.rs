//! The byte-based tokenizer (lexer).
//!
//! It consumes the input `&str` (as `&[u8]`) and produces `Token`s on
//! demand. String scanning jumps between quotes and backslashes with
//! `memchr2`; every other decision goes through the `BYTE_PROPERTIES` table.

use crate::error::{ParseError, Result, StringError};
use crate::token::{Literal, Token, TokenKind};
use memchr::memchr2;
use std::borrow::Cow;

// --- The Lookup Table (LUT) ---
// A 256-entry array classifying every byte with a single lookup.
pub(crate) const W: u8 = 1; // Whitespace
pub(crate) const S: u8 = 2; // Structural
pub(crate) const L: u8 = 3; // Literal
pub(crate) const D: u8 = 4; // Digit
pub(crate) const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: every other byte starts no token
    table
};

/// UTF-8 continuation bytes do not start a new character.
#[inline]
fn starts_char(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

/// Matches the longest JSON number at the start of `bytes`.
///
/// Returns the length of the literal, or `None` if `bytes` does not start
/// with a well-formed number. A leading zero followed by another digit is
/// rejected rather than split into two numbers.
pub(crate) fn scan_number(bytes: &[u8]) -> Option<usize> {
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = usize::from(bytes.first() == Some(&b'-'));
    match bytes.get(i) {
        Some(b'0') => {
            i += 1;
            if bytes.get(i).is_some_and(u8::is_ascii_digit) {
                return None;
            }
        }
        Some(b'1'..=b'9') => i += digits(i),
        _ => return None,
    }

    if bytes.get(i) == Some(&b'.') {
        let n = digits(i + 1);
        if n == 0 {
            return None;
        }
        i += 1 + n;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits(i);
        if n == 0 {
            return None;
        }
        i += n;
    }

    Some(i)
}

fn hex_value(digit: u8) -> u16 {
    (digit as char).to_digit(16).unwrap_or(0) as u16
}

/// The tokenizer (lexer).
///
/// Call [`Tokenizer::next_token`] until it returns a token of kind
/// `EndDoc`, or iterate: the `Iterator` impl yields the `EndDoc` token and
/// then stops, and also stops after the first error.
pub struct Tokenizer<'a> {
    /// The input text, used to borrow string and number slices.
    src: &'a str,
    /// The same input as raw bytes.
    bytes: &'a [u8],
    /// Byte index of the next unread byte.
    cursor: usize,
    /// Character offset of `cursor`.
    offset: usize,
    /// Set once the iterator has yielded `EndDoc` or an error.
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` over an input string.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            src: input,
            bytes: input.as_bytes(),
            cursor: 0,
            offset: 0,
            done: false,
        }
    }

    /// The character offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.cursor += 1;
            self.offset += 1;
        }
    }

    /// Advances over one byte of any kind. Assumes the cursor is not at the end.
    #[inline]
    fn advance_byte(&mut self) {
        if starts_char(self.bytes[self.cursor]) {
            self.offset += 1;
        }
        self.cursor += 1;
    }

    /// Advances over `n` bytes known to be ASCII.
    #[inline]
    fn advance_ascii(&mut self, n: usize) {
        self.cursor += n;
        self.offset += n;
    }

    /// The character under the cursor, for error reporting.
    fn current_char(&self) -> char {
        self.src[self.cursor..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn string_error(&self, offset: usize, reason: StringError) -> ParseError {
        ParseError::InvalidString { offset, reason }
    }

    /// Reads the next token.
    ///
    /// Once the input is exhausted every call returns an `EndDoc` token.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();

        let start = self.offset;
        let byte = match self.bytes.get(self.cursor) {
            Some(&b) => b,
            None => return Ok(Token::punct(TokenKind::EndDoc, start)),
        };

        match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.advance_ascii(1);
                let kind = match byte {
                    b'{' => TokenKind::BeginObject,
                    b'}' => TokenKind::EndObject,
                    b'[' => TokenKind::BeginArray,
                    b']' => TokenKind::EndArray,
                    b':' => TokenKind::Colon,
                    b',' => TokenKind::Comma,
                    _ => unreachable!(), // LUT guarantees this
                };
                Ok(Token::punct(kind, start))
            }
            L => match byte {
                b't' => self.lex_literal("true", TokenKind::Boolean, Some(Literal::Bool(true))),
                b'f' => self.lex_literal("false", TokenKind::Boolean, Some(Literal::Bool(false))),
                b'n' => self.lex_literal("null", TokenKind::Null, None),
                _ => unreachable!(), // LUT guarantees this
            },
            D => self.lex_number(),
            Q => self.lex_string(),
            _ => Err(ParseError::IllegalCharacter {
                offset: start,
                ch: self.current_char(),
            }),
        }
    }

    /// Skips trailing whitespace and checks that nothing else remains.
    ///
    /// Returns the `EndDoc` token, or `TrailingContent` pointing at the first
    /// leftover character. The leftover text is not lexed.
    pub fn finish(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();
        if self.cursor < self.bytes.len() {
            Err(ParseError::TrailingContent {
                offset: self.offset,
            })
        } else {
            Ok(Token::punct(TokenKind::EndDoc, self.offset))
        }
    }

    /// Lexes `true`, `false` or `null`.
    fn lex_literal(
        &mut self,
        expected: &'static str,
        kind: TokenKind,
        payload: Option<Literal<'a>>,
    ) -> Result<Token<'a>> {
        let start = self.offset;
        if !self.bytes[self.cursor..].starts_with(expected.as_bytes()) {
            return Err(ParseError::InvalidLiteral {
                offset: start,
                expected,
            });
        }
        self.advance_ascii(expected.len());
        Ok(Token {
            kind,
            payload,
            offset: start,
        })
    }

    /// Lexes a number, keeping its raw text.
    fn lex_number(&mut self) -> Result<Token<'a>> {
        let start = self.offset;
        let from = self.cursor;
        let len = scan_number(&self.bytes[from..])
            .ok_or(ParseError::InvalidNumber { offset: start })?;
        self.advance_ascii(len);

        let src = self.src;
        Ok(Token::literal(
            TokenKind::Number,
            Literal::Number(&src[from..from + len]),
            start,
        ))
    }

    /// Lexes a string literal, decoding escapes.
    ///
    /// Strings without escapes are borrowed from the input.
    fn lex_string(&mut self) -> Result<Token<'a>> {
        let start = self.offset;
        self.advance_ascii(1); // Consume opening '"'

        let src = self.src;
        let bytes = self.bytes;
        let content_start = self.cursor;
        let mut decoded: Option<String> = None;

        loop {
            let run_start = self.cursor;
            let found = memchr2(b'"', b'\\', &bytes[run_start..]);
            self.advance_run(found.unwrap_or(bytes.len() - run_start))?;
            if let Some(s) = decoded.as_mut() {
                s.push_str(&src[run_start..self.cursor]);
            }

            if found.is_none() {
                return Err(self.string_error(start, StringError::Unterminated));
            }

            if bytes[self.cursor] == b'"' {
                let text = match decoded {
                    Some(s) => Cow::Owned(s),
                    None => Cow::Borrowed(&src[content_start..self.cursor]),
                };
                self.advance_ascii(1); // Consume closing '"'
                return Ok(Token::literal(TokenKind::String, Literal::Str(text), start));
            }

            let out = decoded.get_or_insert_with(|| src[content_start..self.cursor].to_string());
            self.lex_escape(out, start)?;
        }
    }

    /// Advances over a run of plain string content, rejecting control characters.
    fn advance_run(&mut self, len: usize) -> Result<()> {
        let end = self.cursor + len;
        while self.cursor < end {
            let byte = self.bytes[self.cursor];
            if byte < 0x20 {
                return Err(
                    self.string_error(self.offset, StringError::ControlCharacter(byte as char))
                );
            }
            self.advance_byte();
        }
        Ok(())
    }

    /// Decodes one escape sequence. The cursor is on the backslash.
    fn lex_escape(&mut self, out: &mut String, string_start: usize) -> Result<()> {
        let escape_offset = self.offset;
        self.advance_ascii(1); // Consume '\'

        let byte = match self.bytes.get(self.cursor) {
            Some(&b) => b,
            None => return Err(self.string_error(string_start, StringError::Unterminated)),
        };
        let decoded = match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.advance_ascii(1);
                out.push(self.lex_unicode_escape(escape_offset)?);
                return Ok(());
            }
            _ => {
                return Err(self.string_error(
                    escape_offset,
                    StringError::InvalidEscape(self.current_char()),
                ))
            }
        };
        self.advance_ascii(1);
        out.push(decoded);
        Ok(())
    }

    /// Decodes the digits of a `\u` escape, pairing UTF-16 surrogates.
    fn lex_unicode_escape(&mut self, escape_offset: usize) -> Result<char> {
        let unit = self.read_hex4(escape_offset)?;
        match unit {
            0xD800..=0xDBFF => {
                let lone = self.string_error(escape_offset, StringError::LoneSurrogate(unit));
                if !self.bytes[self.cursor..].starts_with(b"\\u") {
                    return Err(lone);
                }
                let low_offset = self.offset;
                self.advance_ascii(2);
                let low = self.read_hex4(low_offset)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(lone);
                }
                let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                char::from_u32(code).ok_or(lone)
            }
            0xDC00..=0xDFFF => {
                Err(self.string_error(escape_offset, StringError::LoneSurrogate(unit)))
            }
            _ => char::from_u32(u32::from(unit))
                .ok_or_else(|| self.string_error(escape_offset, StringError::InvalidUnicodeEscape)),
        }
    }

    /// Reads exactly four hex digits.
    fn read_hex4(&mut self, escape_offset: usize) -> Result<u16> {
        let digits = self
            .bytes
            .get(self.cursor..self.cursor + 4)
            .filter(|d| d.iter().all(u8::is_ascii_hexdigit))
            .ok_or_else(|| self.string_error(escape_offset, StringError::InvalidUnicodeEscape))?;
        let unit = digits.iter().fold(0u16, |acc, &d| (acc << 4) | hex_value(d));
        self.advance_ascii(4);
        Ok(unit)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    /// Yields tokens up to and including `EndDoc`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        self.done = !matches!(&result, Ok(token) if token.kind != TokenKind::EndDoc);
        Some(result)
    }
}
