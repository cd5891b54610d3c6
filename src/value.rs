//! Contains the `JsonValue` enum, a native Rust representation of any
//! valid JSON value, and `JsonNumber`, which keeps numbers as their
//! literal text so nothing is lost between parsing and serializing.
use crate::error::ParseError;
use crate::serializer;
use crate::tokenizer::scan_number;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// The map type behind `JsonValue::Object`. Keys keep insertion order.
pub type Map = IndexMap<String, JsonValue>;

/// A JSON number, stored as validated literal text.
///
/// Numeric views are parsed on demand, so integers wider than 64 bits and
/// decimals with more precision than `f64` survive a round trip untouched.
/// NaN and the infinities cannot be represented.
#[derive(Debug, Clone)]
pub struct JsonNumber {
    literal: String,
}

impl JsonNumber {
    /// Wraps text the tokenizer has already matched against the grammar.
    pub(crate) fn from_literal(literal: &str) -> Self {
        JsonNumber {
            literal: literal.to_string(),
        }
    }

    /// Converts a finite `f64`. Returns `None` for NaN and ±Infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| JsonNumber {
            literal: value.to_string(),
        })
    }

    /// The literal text.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Returns `true` if the literal has no fraction or exponent.
    pub fn is_integer(&self) -> bool {
        !self.literal.contains(['.', 'e', 'E'])
    }

    /// The value as an `f64`, or `None` if it overflows to infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.literal.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    /// The value as an `i64`, if it is an integer literal in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.literal.parse().ok()
    }

    /// The value as a `u64`, if it is a non-negative integer literal in range.
    pub fn as_u64(&self) -> Option<u64> {
        self.literal.parse().ok()
    }

    /// The exact value as `(negative, significant digits, exponent)`.
    ///
    /// Digits carry no leading or trailing zeros, so two literals denote the
    /// same number exactly when their canonical forms are equal. Zero is
    /// `(false, "", 0)` whatever its sign or spelling.
    fn canonical(&self) -> (bool, String, i64) {
        let text = self.literal.as_str();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], parse_exponent(&text[at + 1..])),
            None => (text, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let joined = [int_part, frac_part].concat();
        let significant = joined.trim_start_matches('0');
        let digits = significant.trim_end_matches('0');
        if digits.is_empty() {
            return (false, String::new(), 0);
        }
        let exponent = exponent
            .saturating_sub(frac_part.len() as i64)
            .saturating_add((significant.len() - digits.len()) as i64);
        (negative, digits.to_string(), exponent)
    }
}

/// Reads an exponent such as `+12` or `-3`, saturating on absurd lengths.
fn parse_exponent(text: &str) -> i64 {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits.bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Numbers compare by exact decimal value, not spelling: `1e2 == 100`,
/// `1.50 == 1.5` and `-0 == 0`. No conversion to `f64` is involved, so
/// `9007199254740993 != 9007199254740992.0`.
impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal || self.canonical() == other.canonical()
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl FromStr for JsonNumber {
    type Err = ParseError;

    /// Parses a complete JSON number literal, e.g. `"-1.5e3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match scan_number(s.as_bytes()) {
            Some(len) if len == s.len() => Ok(JsonNumber::from_literal(s)),
            _ => Err(ParseError::InvalidNumber { offset: 0 }),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonNumber {
                fn from(n: $ty) -> Self {
                    JsonNumber { literal: n.to_string() }
                }
            }

            impl From<$ty> for JsonValue {
                fn from(n: $ty) -> Self {
                    JsonValue::Number(n.into())
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

/// A native Rust representation of any valid JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// Represents a JSON `null`.
    #[default]
    Null,
    /// Represents a JSON `true` or `false`.
    Bool(bool),
    /// Represents a JSON number.
    Number(JsonNumber),
    /// Represents a JSON string.
    String(String),
    /// Represents a JSON array (list).
    Array(Vec<JsonValue>),
    /// Represents a JSON object. Duplicate keys keep the last value.
    Object(Map),
}

impl JsonValue {
    /// Parses a JSON document into a `JsonValue` with the default limits.
    ///
    /// # Errors
    /// Returns a `ParseError` if the JSON is invalid, empty, or has trailing content.
    pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
        crate::parse(input)
    }

    /// Converts a finite `f64`. Returns `None` for NaN and ±Infinity.
    pub fn from_f64(value: f64) -> Option<JsonValue> {
        JsonNumber::from_f64(value).map(JsonValue::Number)
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(JsonNumber::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(JsonNumber::as_u64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Serializes the `JsonValue` into a compact, minified JSON string.
    pub fn stringify(&self) -> String {
        serializer::to_string(self, false)
    }

    /// Serializes the `JsonValue` into an indented JSON string (two spaces
    /// per level).
    pub fn stringify_pretty(&self) -> String {
        serializer::to_string(self, true)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(n: JsonNumber) -> Self {
        JsonValue::Number(n)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<Map> for JsonValue {
    fn from(map: Map) -> Self {
        JsonValue::Object(map)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JsonValue::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
