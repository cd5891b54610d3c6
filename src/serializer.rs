//! Renders a `JsonValue` tree back into JSON text.
//!
//! Compact output has no insignificant whitespace. Pretty output puts one
//! entry per line, indents two spaces per nesting level and writes `": "`
//! between keys and values. Empty containers are always `[]` and `{}`.
//!
//! `JsonValue` implements `Display` through this module: `{}` is compact and
//! `{:#}` is pretty.

use crate::value::{JsonValue, Map};
use std::fmt::{self, Write};

/// The indentation string to use for pretty-printing (two spaces).
const INDENT: &str = "  ";

/// Serializes `value` into a new `String`.
pub(crate) fn to_string(value: &JsonValue, pretty: bool) -> String {
    if pretty {
        format!("{value:#}")
    } else {
        value.to_string()
    }
}

/// Writes JSON text into any `fmt::Write` sink.
pub struct Serializer<W> {
    out: W,
    pretty: bool,
    depth: usize,
}

impl<W: Write> Serializer<W> {
    /// A serializer producing minified output.
    pub fn compact(out: W) -> Self {
        Serializer {
            out,
            pretty: false,
            depth: 0,
        }
    }

    /// A serializer producing indented output.
    pub fn pretty(out: W) -> Self {
        Serializer {
            out,
            pretty: true,
            depth: 0,
        }
    }

    /// Gives back the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one value and everything below it.
    pub fn write_value(&mut self, value: &JsonValue) -> fmt::Result {
        match value {
            JsonValue::Null => self.out.write_str("null"),
            JsonValue::Bool(b) => self.out.write_str(if *b { "true" } else { "false" }),
            JsonValue::Number(n) => self.out.write_str(n.as_str()),
            JsonValue::String(s) => write_string(&mut self.out, s),
            JsonValue::Array(a) => self.write_array(a),
            JsonValue::Object(o) => self.write_object(o),
        }
    }

    fn write_array(&mut self, arr: &[JsonValue]) -> fmt::Result {
        if arr.is_empty() {
            return self.out.write_str("[]");
        }
        self.out.write_char('[')?;
        self.depth += 1;
        for (i, val) in arr.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline()?;
            self.write_value(val)?;
        }
        self.depth -= 1;
        self.newline()?;
        self.out.write_char(']')
    }

    fn write_object(&mut self, obj: &Map) -> fmt::Result {
        if obj.is_empty() {
            return self.out.write_str("{}");
        }
        self.out.write_char('{')?;
        self.depth += 1;
        for (i, (key, val)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.newline()?;
            write_string(&mut self.out, key)?;
            self.out.write_str(if self.pretty { ": " } else { ":" })?;
            self.write_value(val)?;
        }
        self.depth -= 1;
        self.newline()?;
        self.out.write_char('}')
    }

    /// In pretty mode, starts a new line at the current depth.
    fn newline(&mut self) -> fmt::Result {
        if self.pretty {
            self.out.write_char('\n')?;
            for _ in 0..self.depth {
                self.out.write_str(INDENT)?;
            }
        }
        Ok(())
    }
}

/// Writes `s` as a quoted JSON string.
///
/// Uses the short escapes the tokenizer understands and `\u00XX` for the
/// remaining control characters. Everything else is written as is.
pub fn write_string<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    w.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\""),
            '\\' => w.write_str("\\\\"),
            '\u{0008}' => w.write_str("\\b"),
            '\u{000C}' => w.write_str("\\f"),
            '\n' => w.write_str("\\n"),
            '\r' => w.write_str("\\r"),
            '\t' => w.write_str("\\t"),
            '\u{0000}'..='\u{001F}' => write!(w, "\\u{:04x}", c as u32),
            _ => w.write_char(c),
        }?;
    }
    w.write_char('"')
}

impl fmt::Display for JsonValue {
    /// `{}` writes compact JSON, `{:#}` writes pretty JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = if f.alternate() {
            Serializer::pretty(f)
        } else {
            Serializer::compact(f)
        };
        serializer.write_value(self)
    }
}
