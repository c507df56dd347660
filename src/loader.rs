//! Reading CML documents from disk

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{error::Error, parser::ParserConfig, parse_with_config, tree::Tree};

/// Failure to load a document: either the file could not be read or its
/// contents were rejected by the parser.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }

    /// The parse error, if the file was readable
    pub fn parse_error(&self) -> Option<&Error> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Io { .. } => None,
        }
    }
}

/// Read a whole file, guaranteeing the last line is terminated
pub fn read_document(path: &Path) -> Result<String, LoadError> {
    let mut buffer = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !buffer.is_empty() && !buffer.ends_with('\n') {
        buffer.push('\n');
    }
    Ok(buffer)
}

/// Load and parse the file at `path` with default limits
pub fn load(path: impl AsRef<Path>) -> Result<Tree, LoadError> {
    load_with_config(path, ParserConfig::default())
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_with_config(path: impl AsRef<Path>, config: ParserConfig) -> Result<Tree, LoadError> {
    let path = path.as_ref();
    let buffer = read_document(path).inspect_err(|e| warn!("{e}"))?;
    debug!(bytes = buffer.len(), "file read");

    parse_with_config(&buffer, config).map_err(|source| {
        warn!(line = source.line(), "document rejected: {}", source.kind());
        LoadError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}
