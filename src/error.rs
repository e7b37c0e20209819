//! Errors found throughout this crate

use std::io;
use thiserror::Error;

/// Errors that occur while fetching, pruning, or rendering the tree
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// Communicating with the window manager failed
    #[error("failed to fetch the tree: {0}")]
    Fetch(#[source] io::Error),

    /// The window manager sent something that is not an IPC reply
    #[error("invalid IPC reply: {0}")]
    Ipc(String),

    /// The tree could not be deserialized
    #[error("failed to parse the tree: {0}")]
    Parse(#[from] serde_json::Error),

    /// A strategy name given on the command line is not known
    #[error("unknown {kind} strategy '{name}', available: {available}")]
    UnknownStrategy {
        /// What the strategy selects (`fetch`, `render`)
        kind:      &'static str,
        /// Name that was asked for
        name:      String,
        /// Comma separated list of valid names
        available: String,
    },

    /// The rendered tree could not be written
    #[error("failed to write the tree: {0}")]
    Output(#[from] io::Error),

    /// No workspace contains the focused node
    #[error("no focused workspace was found")]
    NoFocusedWorkspace,

    /// No workspace matches the requested name
    #[error("workspace '{0}' was not found")]
    WorkspaceNotFound(String),
}
