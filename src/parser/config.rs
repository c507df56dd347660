use crate::error::ErrorKind;

/// No nesting limit unless one is asked for
pub const DEFAULT_MAX_DEPTH: usize = usize::MAX;
/// No input size limit unless one is asked for
pub const DEFAULT_MAX_SIZE: usize = usize::MAX;

/// Configuration for parser limits and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of simultaneously open tags
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Reject tag names outside `[A-Za-z0-9_]+`
    pub strict_names: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            strict_names: false,
        }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_strict_names(mut self, strict_names: bool) -> Self {
        self.strict_names = strict_names;
        self
    }

    pub fn validate_size(&self, size: usize) -> Result<(), ErrorKind> {
        if size > self.max_size {
            return Err(ErrorKind::MaxSizeExceeded { max: self.max_size });
        }
        Ok(())
    }

    pub fn validate_tag_name(&self, name: &str) -> Result<(), ErrorKind> {
        if self.strict_names && !is_valid_name(name) {
            return Err(ErrorKind::InvalidTagName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// A byte that may appear in a key or strict tag name
pub const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_byte)
}

/// Tracks nesting depth and a few counters while parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    current_depth: usize,
    tags_opened: usize,
    attributes_set: usize,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<(), ErrorKind> {
        if self.current_depth >= config.max_depth {
            return Err(ErrorKind::MaxDepthExceeded {
                max: config.max_depth,
            });
        }
        self.current_depth += 1;
        self.tags_opened += 1;
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    pub fn record_attribute(&mut self) {
        self.attributes_set += 1;
    }

    pub const fn depth(&self) -> usize {
        self.current_depth
    }

    pub const fn tags_opened(&self) -> usize {
        self.tags_opened
    }

    pub const fn attributes_set(&self) -> usize {
        self.attributes_set
    }
}
