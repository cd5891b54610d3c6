//! Resource limits for parsing.

/// The default maximum nesting depth (e.g., `[[[]]]`).
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum input size (10MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Limits applied by [`crate::parse_with_config`].
///
/// The parser itself never recurses, but dropping or serializing a very deep
/// tree does, so the depth limit is what keeps those bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of simultaneously open objects and arrays.
    pub max_depth: usize,
    /// Maximum input length in bytes, checked before scanning.
    pub max_input_bytes: usize,
}

impl ParserConfig {
    /// No limits at all.
    pub const fn unlimited() -> Self {
        ParserConfig {
            max_depth: usize::MAX,
            max_input_bytes: usize::MAX,
        }
    }

    /// Sets the maximum nesting depth.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum input size in bytes.
    pub const fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ParserConfig::default()
            .with_max_depth(4)
            .with_max_input_bytes(64);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_input_bytes, 64);
        assert_eq!(ParserConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParserConfig::unlimited().max_input_bytes, usize::MAX);
    }
}
