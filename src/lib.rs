//! # stackjson
//!
//! `stackjson` is a small, 100% safe JSON parser and serializer built from
//! scratch in Rust.
//!
//! ## Key Features
//!
//! * **Table-driven grammar:** every token is checked against a constant
//!   transition table of legal successors, so error messages can always say
//!   what was expected.
//! * **No recursion while parsing:** nesting is tracked with an explicit
//!   stack of frames.
//! * **Lossless numbers:** numbers keep their literal text, so
//!   `9007199254740993` comes back out exactly as it went in.
//! * **Precise errors:** every `ParseError` carries a character offset that
//!   [`ParseError::locate`] turns into a line and column.
//! * **Serializer included:** compact and pretty (two-space) output that
//!   always parses back to an equal value.
//!
//! ## Quick Start: Parsing
//!
//! ```
//! use stackjson::{parse, JsonValue};
//!
//! let value = parse(r#"{ "name": "Babbage", "id": 1815 }"#).unwrap();
//! assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("Babbage"));
//! assert_eq!(value.get("id").and_then(JsonValue::as_i64), Some(1815));
//! ```
//!
//! ## Quick Start: Serializing
//!
//! ```
//! use stackjson::{serialize, JsonValue};
//!
//! let user: JsonValue = [
//!     ("username", JsonValue::from("ada_l")),
//!     ("id", JsonValue::from(1815)),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(serialize(&user, false), r#"{"username":"ada_l","id":1815}"#);
//! assert_eq!(
//!     serialize(&user, true),
//!     "{\n  \"username\": \"ada_l\",\n  \"id\": 1815\n}"
//! );
//! ```
//!
//! ## Errors
//!
//! ```
//! use stackjson::{parse, ParseError};
//!
//! let input = "{\"a\": 1,}";
//! let err = parse(input).unwrap_err();
//! assert!(matches!(err, ParseError::UnexpectedToken { offset: 8, .. }));
//! assert_eq!(err.to_string(), "unexpected '}' at offset 8, expected string");
//! assert_eq!(err.locate(input).to_string(), "line 1, column 9");
//! ```

/// Resource limits for parsing.
pub mod config;
/// Contains the `ParseError` type for the library.
pub mod error;
/// Contains the `Parser` and its transition table.
pub mod parser;
/// Compact and pretty JSON output.
pub mod serializer;
/// Contains the `Token`, `TokenKind` and `TokenSet` types.
pub mod token;
/// The tokenizer (lexer).
pub mod tokenizer;
/// Contains `JsonValue`, `JsonNumber` and `Map`.
pub mod value;

pub use config::ParserConfig;
pub use error::{Location, ParseError, StringError};
pub use parser::Parser;
pub use token::{Token, TokenKind, TokenSet};
pub use tokenizer::Tokenizer;
pub use value::{JsonNumber, JsonValue, Map};

/// Parses a JSON document with the default [`ParserConfig`].
///
/// # Errors
/// Returns a `ParseError` if the input is not exactly one valid JSON value
/// (surrounded by optional whitespace), or if it exceeds the default limits.
///
/// # Examples
/// ```
/// use stackjson::{parse, JsonValue};
///
/// assert_eq!(parse("[]").unwrap(), JsonValue::Array(vec![]));
/// assert_eq!(parse(" true ").unwrap(), JsonValue::Bool(true));
/// assert!(parse("[1, 2,]").is_err());
/// ```
pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
    parse_with_config(input, &ParserConfig::default())
}

/// Parses a JSON document with explicit limits.
///
/// # Errors
/// As [`parse`], with `config` deciding the depth and size limits.
pub fn parse_with_config(input: &str, config: &ParserConfig) -> Result<JsonValue, ParseError> {
    Parser::new(input, *config).parse()
}

/// Renders `value` as JSON text, indented with two spaces when `pretty`.
///
/// For any `v` nested no deeper than [`config::DEFAULT_MAX_DEPTH`],
/// `parse(&serialize(&v, pretty))` yields a value equal to `v`. Deeper values
/// read back with [`parse_with_config`] and a large enough `max_depth`.
pub fn serialize(value: &JsonValue, pretty: bool) -> String {
    serializer::to_string(value, pretty)
}

/// Checks that `input` is a valid JSON document, discarding the value.
///
/// # Errors
/// The same errors as [`parse`].
pub fn validate(input: &str) -> Result<(), ParseError> {
    parse(input).map(drop)
}

/// Returns `true` if `input` is a valid JSON document.
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Returns a tokenizer over `input`.
///
/// # Examples
/// ```
/// use stackjson::{tokenize, TokenKind};
///
/// let kinds: Vec<TokenKind> = tokenize("[1, null]")
///     .map(|token| token.unwrap().kind)
///     .collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::BeginArray,
///         TokenKind::Number,
///         TokenKind::Comma,
///         TokenKind::Null,
///         TokenKind::EndArray,
///         TokenKind::EndDoc,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

// --- Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;
    use tracing_subscriber::EnvFilter;

    const DOCUMENTS: &[&str] = &[
        "null",
        "true",
        "-0",
        "42",
        "1.5e-7",
        r#""hello""#,
        "[]",
        "{}",
        r#"{"key": [1, null, true, "hello"]}"#,
        r#"[{"a": 1, "b": [null, {"c": {}}]}, [], [[]]]"#,
        r#"{"name": "Babbage", "age": 30, "admin": true,
            "friends": ["Ada", "Charles", "Grace"],
            "tasks": [
                { "id": 1, "title": "Parse JSON", "done": false },
                { "id": 2, "title": "Write docs", "done": true }
            ],
            "nested": {"key": [null, 1, 1.23e4]}}"#,
        r#"{"escapes": "\" \\ \/ \b \f \n \r \t \u0001 é 😀"}"#,
        r#"{"unicode": "héllo wörld ✓", "empty": ""}"#,
        r#"[1E+2, -0.0, 0.25, 1e-2, 123456789012345678901234567890]"#,
    ];

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Converts into serde_json's model, numbers via `f64`.
    fn to_serde(value: &JsonValue) -> SerdeValue {
        match value {
            JsonValue::Null => SerdeValue::Null,
            JsonValue::Bool(b) => SerdeValue::Bool(*b),
            JsonValue::Number(n) => n
                .as_f64()
                .and_then(serde_json::Number::from_f64)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
            JsonValue::String(s) => SerdeValue::String(s.clone()),
            JsonValue::Array(a) => SerdeValue::Array(a.iter().map(to_serde).collect()),
            JsonValue::Object(o) => SerdeValue::Object(
                o.iter().map(|(k, v)| (k.clone(), to_serde(v))).collect(),
            ),
        }
    }

    /// Normalizes serde_json numbers to `f64` so both sides compare alike.
    fn normalize(value: SerdeValue) -> SerdeValue {
        match value {
            SerdeValue::Number(n) => n
                .as_f64()
                .and_then(serde_json::Number::from_f64)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
            SerdeValue::Array(a) => SerdeValue::Array(a.into_iter().map(normalize).collect()),
            SerdeValue::Object(o) => {
                SerdeValue::Object(o.into_iter().map(|(k, v)| (k, normalize(v))).collect())
            }
            other => other,
        }
    }

    /// Re-spaces a document by inserting whitespace before every token.
    fn respace(input: &str) -> String {
        let starts: Vec<usize> = tokenize(input).map(|t| t.unwrap().offset).collect();
        let mut out = String::new();
        for (i, c) in input.chars().enumerate() {
            if starts.contains(&i) {
                out.push_str(" \t\r\n ");
            }
            out.push(c);
        }
        out.push_str("\n\n");
        out
    }

    #[test]
    fn test_agrees_with_serde_json() {
        init_tracing();
        for doc in DOCUMENTS {
            let ours = parse(doc).unwrap_or_else(|e| panic!("{doc}: {e}"));
            let theirs: SerdeValue = serde_json::from_str(doc).unwrap();
            assert_eq!(to_serde(&ours), normalize(theirs), "document {doc}");
        }
    }

    #[test]
    fn test_round_trip() {
        for doc in DOCUMENTS {
            let value = parse(doc).unwrap();
            for pretty in [false, true] {
                let text = serialize(&value, pretty);
                assert_eq!(parse(&text).unwrap(), value, "document {doc}, pretty {pretty}");

                let theirs: SerdeValue = serde_json::from_str(&text)
                    .unwrap_or_else(|e| panic!("serde_json rejected {text}: {e}"));
                assert_eq!(normalize(theirs), to_serde(&value));
            }
        }
    }

    #[test]
    fn test_idempotence_for_constructed_values() {
        let mut inner = Map::new();
        inner.insert("ctrl\u{0007}".to_string(), JsonValue::from("line\nbreak"));
        inner.insert("pi".to_string(), JsonValue::from_f64(2.5).unwrap());
        let value = JsonValue::Array(vec![
            JsonValue::Object(inner),
            JsonValue::from(u64::MAX),
            JsonValue::from(i64::MIN),
            JsonValue::from_f64(-1e-300).unwrap(),
            JsonValue::from(""),
            JsonValue::Null,
        ]);
        for pretty in [false, true] {
            let once = serialize(&value, pretty);
            let reparsed = parse(&once).unwrap();
            assert_eq!(reparsed, value);
            assert_eq!(serialize(&reparsed, pretty), once);
        }
    }

    #[test]
    fn test_whitespace_insensitivity() {
        for doc in DOCUMENTS {
            let spaced = respace(doc);
            assert_eq!(parse(&spaced).unwrap(), parse(doc).unwrap(), "{spaced:?}");
        }
    }

    #[test]
    fn test_duplicate_key_policy() {
        let value = parse(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(value.as_object().map(Map::len), Some(1));
        assert_eq!(value.get("a").and_then(JsonValue::as_i64), Some(2));
    }

    #[test]
    fn test_trailing_comma_rejection() {
        for input in ["[1,2,]", r#"{"a":1,}"#] {
            assert!(
                matches!(parse(input), Err(ParseError::UnexpectedToken { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}").unwrap(), JsonValue::Object(Map::new()));
        assert_eq!(parse("[]").unwrap(), JsonValue::Array(vec![]));
        assert_eq!(parse(" [ { } ] ").unwrap(), JsonValue::Array(vec![JsonValue::Object(Map::new())]));
    }

    #[test]
    fn test_scalar_documents() {
        assert_eq!(parse(r#""42""#).unwrap(), JsonValue::from("42"));
        assert_eq!(parse("42").unwrap(), JsonValue::from(42));
        assert_eq!(parse("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
        assert_eq!(parse("123.5").unwrap().as_f64(), Some(123.5));
    }

    #[test]
    fn test_escape_fidelity() {
        let value = parse(r#""a\nb""#).unwrap();
        let s = value.as_str().unwrap();
        assert_eq!(s.chars().count(), 3);
        assert_eq!(s, "a\nb");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(
            parse(r#"{"a":"#).unwrap_err(),
            ParseError::UnexpectedEndOfInput { offset: 5 }
        );
        assert!(matches!(
            parse(""),
            Err(ParseError::UnexpectedEndOfInput { offset: 0 })
        ));
        assert!(matches!(
            parse(" \n\t "),
            Err(ParseError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(
            parse(r#"{"a":1} garbage"#).unwrap_err(),
            ParseError::TrailingContent { offset: 8 }
        );
    }

    #[test]
    fn test_large_integers_are_exact() {
        let doc = r#"{"user_id": 9007199254740993, "big": 123456789012345678901234567890}"#;
        let value = parse(doc).unwrap();
        assert_eq!(
            value.get("user_id").and_then(JsonValue::as_u64),
            Some(9_007_199_254_740_993)
        );
        assert_eq!(
            serialize(&value, false),
            r#"{"user_id":9007199254740993,"big":123456789012345678901234567890}"#
        );
    }

    #[test]
    fn test_rfc_8259_compliance() {
        for input in [
            "// a comment\n[1, 2]",
            "[1, 2] // trailing comment",
            "0123",
            "1.",
            ".5",
            "+1",
            "NaN",
            "Infinity",
            "'single'",
            "{a: 1}",
            "\"\n\"",
            "[1,,2]",
            "True",
        ] {
            assert!(!is_valid(input), "accepted {input:?}");
        }
    }

    #[test]
    fn test_error_locations() {
        let input = "{\n  \"a\": [1, 2,]\n}";
        let err = parse(input).unwrap_err();
        let location = err.locate(input);
        assert_eq!((location.line, location.column), (2, 14));

        let input = "\"\n\"";
        let err = parse(input).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidString {
                offset: 1,
                reason: StringError::ControlCharacter('\n')
            }
        );
        assert_eq!(err.locate(input), Location { line: 1, column: 2 });
    }

    #[test]
    fn test_validate() {
        assert!(validate(r#"{"ok": [true]}"#).is_ok());
        assert_eq!(
            validate("[1] x").unwrap_err(),
            ParseError::TrailingContent { offset: 4 }
        );
        assert!(is_valid("  null  "));
        assert!(!is_valid("nul"));
    }

    #[test]
    fn test_default_limits() {
        let deep = "[".repeat(101) + &"]".repeat(101);
        assert!(matches!(
            parse(&deep),
            Err(ParseError::NestingTooDeep { limit: 100, .. })
        ));
        assert!(parse_with_config(&deep, &ParserConfig::unlimited()).is_ok());
    }

    #[test]
    fn test_round_trip_within_depth_limit() {
        let nested = |depth: usize| {
            (0..depth).fold(JsonValue::Null, |inner, _| JsonValue::Array(vec![inner]))
        };

        let at_limit = nested(config::DEFAULT_MAX_DEPTH);
        assert_eq!(parse(&serialize(&at_limit, false)).unwrap(), at_limit);

        let too_deep = nested(config::DEFAULT_MAX_DEPTH + 1);
        let text = serialize(&too_deep, false);
        assert_eq!(
            parse(&text),
            Err(ParseError::NestingTooDeep {
                offset: 100,
                limit: 100
            })
        );
        let deeper = ParserConfig::default().with_max_depth(config::DEFAULT_MAX_DEPTH + 1);
        assert_eq!(parse_with_config(&text, &deeper).unwrap(), too_deep);
    }

    #[test]
    fn test_parse_is_thread_safe() {
        let handles: Vec<_> = DOCUMENTS
            .iter()
            .map(|doc| std::thread::spawn(move || parse(doc).map(|v| serialize(&v, false))))
            .collect();
        for (handle, doc) in handles.into_iter().zip(DOCUMENTS) {
            let text = handle.join().unwrap().unwrap();
            assert_eq!(parse(&text).unwrap(), parse(doc).unwrap());
        }
    }
}
