use std::path::PathBuf;

use thiserror::Error;

use crate::diagram::Collection;

/// A rejected edit. The store is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{0} name must not be empty")]
    EmptyName(Collection),

    #[error("{collection} '{name}' already exists")]
    DuplicateName { collection: Collection, name: String },

    #[error("{collection} '{name}' would print the same as an existing entry in {other}")]
    NameClash {
        collection: Collection,
        other: Collection,
        name: String,
    },

    #[error("an identical {0} already exists between these endpoints")]
    DuplicateEdge(Collection),

    #[error("you need at least {needed} {collection} (found {found})")]
    NotEnoughNodes {
        collection: Collection,
        needed: usize,
        found: usize,
    },

    #[error("no {collection} named '{name}'")]
    UnknownEndpoint { collection: Collection, name: String },

    #[error("no {collection} with id {id}")]
    UnknownRecord { collection: Collection, id: String },

    #[error("index {index} is out of range for {len} {collection}")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    #[error("'{0}' is not a color (expected #RGB, #RRGGBB or a color name)")]
    InvalidColor(String),
}

/// Failure reported by a [`RenderGateway`](crate::gateway::RenderGateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("renderer answered with status {0}")]
    Status(u16),

    #[error("renderer returned an empty response")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("renderer process failed: {0}")]
    Process(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("nothing to generate for the current diagram")]
    EmptySource,

    #[error("failed to generate diagram: {0}")]
    Gateway(#[from] GatewayError),

    #[error("generation #{seq} was superseded before it completed")]
    Stale { seq: u64 },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("{context}: {source}")]
    Edit {
        context: String,
        #[source]
        source: EditError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
