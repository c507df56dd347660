//! Command-line front end used by the `cml` binary

use std::{fmt::Write as _, path::PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::{
    loader::{load_with_config, LoadError},
    parser::ParserConfig,
    tree::NodeRef,
};

/// Nesting limit for the binary; `outline` recurses once per level
pub const CLI_MAX_DEPTH: usize = 128;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check a CML document and print its tree", long_about = None)]
pub struct Args {
    /// CML file to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only print the node at this slash-separated path, e.g. `foo/sub`
    #[arg(short, long)]
    pub query: Option<String>,

    /// Reject tag names outside [A-Za-z0-9_]
    #[arg(long)]
    pub strict: bool,

    /// Maximum tag nesting depth
    #[arg(long, default_value_t = CLI_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no node matches {query:?}")]
    NoMatch { query: String },
}

impl Args {
    pub fn config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_strict_names(self.strict)
            .with_max_depth(self.max_depth)
    }
}

/// Load the requested file and render the selected part of it
pub fn run(args: &Args) -> Result<String, CliError> {
    info!("Reading file: {}", args.file.display());
    let tree = load_with_config(&args.file, args.config())?;

    let node = match &args.query {
        Some(query) => tree
            .root()
            .lookup(query)
            .ok_or_else(|| CliError::NoMatch {
                query: query.clone(),
            })?,
        None => tree.root(),
    };

    Ok(outline(node))
}

/// Indented listing of a node: attributes first, then children in document
/// order. This is a debugging view, not CML.
pub fn outline(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_outline(&mut out, node, 0);
    out
}

fn write_outline(out: &mut String, node: NodeRef<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{}", node.name());
    for (key, value) in node.attributes() {
        let _ = writeln!(out, "{indent}  {key} = {value:?}");
    }
    for child in node.children() {
        write_outline(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_outline() -> crate::Result<()> {
        let tree = parse("top=1\n[a]\nk=\"v \"\n[b]\n[/b]\n[/a]\n")?;
        assert_eq!(
            outline(tree.root()),
            "root\n  top = \"1\"\n  a\n    k = \"v \"\n    b\n"
        );
        Ok(())
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["cml", "doc.cml", "--strict", "-q", "foo/sub"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(args.config().strict_names);
            assert_eq!(args.config().max_depth, CLI_MAX_DEPTH);
            assert_eq!(args.query.as_deref(), Some("foo/sub"));
        }
    }
}
