//! cml: parser for CML, a small line-oriented configuration language
//!
//! A CML document is a sequence of lines. `[name]` opens a tag and
//! `[/name]` closes it, `key=value` sets an attribute on the innermost open
//! tag, `#` starts a comment line. Tags with the same name under one parent
//! form an ordered group.
//!
//! ```text
//! [foo]
//!   key=value
//!   [sub]
//!     desc="trailing whitespace kept   "
//!   [/sub]
//!   [sub]
//!     desc=second entry of the same group
//!   [/sub]
//! [/foo]
//! ```
//!
//! All values stay strings. Parsing is fail-fast: the first violation
//! rejects the whole document.
//!
//! # Examples
//! ```
//! use cml::{parse, Result};
//!
//! fn example() -> Result<()> {
//!     let tree = parse("[server]\nport = 8080\n[/server]\n")?;
//!     let server = tree.root().find_child("server");
//!     assert_eq!(server.and_then(|s| s.attribute("port")), Some("8080"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, instrument};

pub mod cli;
pub mod error;
pub mod loader;
pub mod parser;
pub mod tree;

// Re-exports
pub use error::{Error, ErrorKind, Pos, Result};
pub use loader::{load, load_with_config, LoadError};
pub use parser::{Parser, ParserConfig};
pub use tree::{NodeId, NodeMut, NodeRef, Tree, ROOT_NAME};

/// Parse a CML document with default limits
pub fn parse(input: &str) -> Result<Tree> {
    parse_with_config(input, ParserConfig::default())
}

#[instrument(skip_all, fields(bytes = input.len()))]
pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Tree> {
    debug!("Starting to parse document");
    Parser::with_config(input, config).parse()
}
