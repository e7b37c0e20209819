//! Getting the layout tree from i3 (or from a mock)

use crate::{error::Error, tree::Node};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    env,
    io::{self, Read, Write},
    os::unix::net::UnixStream,
    path::PathBuf,
    process::Command,
};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use which::which;

/// Every IPC message starts with this
const MAGIC: [u8; 6] = *b"i3-ipc";

/// Size of the header in front of every payload
const HEADER_LEN: usize = 14;

/// Largest reply payload accepted from the socket
const MAX_REPLY_LEN: u32 = 64 * 1024 * 1024;

/// Message (and reply) type requesting the layout tree
const GET_TREE: u32 = 4;

/// Environment variables that may hold the IPC socket path, in order
const SOCKET_ENVS: [&str; 2] = ["I3SOCK", "SWAYSOCK"];

/// Tree returned by [`FromFake`]
const MOCK_TREE: &str = include_str!("../data/mock_tree.json");

/// Something that can produce a tree
pub(crate) trait Fetcher {
    /// Get a snapshot of the current tree
    fn fetch(&self) -> Result<Node, Error>;
}

// ============================== Header ============================== [[[

/// Header of an IPC message
///
/// Encoded with [`bincode`], which writes the integers little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Header {
    /// Always [`MAGIC`]
    magic:  [u8; 6],
    /// Length of the payload
    length: u32,
    /// Type of the message
    kind:   u32,
}

/// Frame `payload` as an IPC message of type `kind`
fn encode_message(kind: u32, payload: &[u8]) -> Result<Vec<u8>, Error> {
    let length = u32::try_from(payload.len())
        .map_err(|_| Error::Ipc(format!("payload of {} bytes is too long", payload.len())))?;
    let header = Header {
        magic: MAGIC,
        length,
        kind,
    };

    let mut message =
        bincode::serialize(&header).map_err(|e| Error::Ipc(format!("bad header: {}", e)))?;
    message.extend_from_slice(payload);

    Ok(message)
}

/// Read a framed reply, returning its type and payload
fn read_reply<R: Read>(reader: &mut R) -> Result<(u32, Vec<u8>), Error> {
    let mut raw = [0_u8; HEADER_LEN];
    reader.read_exact(&mut raw).map_err(Error::Fetch)?;

    let header: Header =
        bincode::deserialize(&raw).map_err(|e| Error::Ipc(format!("bad header: {}", e)))?;
    if header.magic != MAGIC {
        return Err(Error::Ipc(format!(
            "unexpected magic string '{}'",
            String::from_utf8_lossy(&header.magic)
        )));
    }

    if header.length > MAX_REPLY_LEN {
        return Err(Error::Ipc(format!(
            "reply of {} bytes exceeds the limit of {} bytes",
            header.length, MAX_REPLY_LEN
        )));
    }

    let mut payload = vec![0_u8; header.length as usize];
    reader.read_exact(&mut payload).map_err(Error::Fetch)?;

    Ok((header.kind, payload))
}

// ]]] === Header ===

// ============================== FromI3 ============================== [[[

/// Fetches the tree from a running i3 over its IPC socket
#[derive(Debug, Default, Clone)]
pub(crate) struct FromI3 {
    /// Socket to use instead of discovering one
    socket: Option<PathBuf>,
}

impl FromI3 {
    /// Create a new [`FromI3`] that discovers the socket itself
    pub(crate) const fn new() -> Self {
        Self { socket: None }
    }

    /// Find the socket of the running window manager
    fn socket_path(&self) -> Result<PathBuf, Error> {
        if let Some(socket) = &self.socket {
            return Ok(socket.clone());
        }

        if let Some(path) = SOCKET_ENVS
            .iter()
            .find_map(|var| env::var_os(var).filter(|v| !v.is_empty()))
        {
            return Ok(PathBuf::from(path));
        }

        let i3 = which("i3").map_err(|e| {
            Error::Fetch(io::Error::new(
                io::ErrorKind::NotFound,
                format!("I3SOCK is not set and i3 was not found: {}", e),
            ))
        })?;
        let output = Command::new(i3)
            .arg("--get-socketpath")
            .output()
            .map_err(Error::Fetch)?;
        let path = String::from_utf8_lossy(&output.stdout).trim().to_owned();

        if !output.status.success() || path.is_empty() {
            return Err(Error::Fetch(io::Error::new(
                io::ErrorKind::NotFound,
                "unable to get the i3 socket path, is i3 running?",
            )));
        }

        Ok(PathBuf::from(path))
    }

    /// Send a message and wait for the reply of the same type
    fn request<S: Read + Write>(stream: &mut S, kind: u32, payload: &[u8]) -> Result<Vec<u8>, Error> {
        stream
            .write_all(&encode_message(kind, payload)?)
            .and_then(|_| stream.flush())
            .map_err(Error::Fetch)?;

        let (reply_kind, reply) = read_reply(stream)?;
        if reply_kind != kind {
            return Err(Error::Ipc(format!(
                "expected a reply of type {}, got {}",
                kind, reply_kind
            )));
        }

        Ok(reply)
    }
}

impl Fetcher for FromI3 {
    fn fetch(&self) -> Result<Node, Error> {
        let path = self.socket_path()?;
        log::debug!("connecting to {}", path.display());

        let mut stream = UnixStream::connect(&path).map_err(Error::Fetch)?;
        let reply = Self::request(&mut stream, GET_TREE, &[])?;
        log::trace!("received {} bytes", reply.len());

        Ok(serde_json::from_slice(&reply)?)
    }
} // ]]] === FromI3 ===

/// Returns a built-in example tree, useful when i3 is not running
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FromFake;

impl Fetcher for FromFake {
    fn fetch(&self) -> Result<Node, Error> {
        Ok(serde_json::from_str(MOCK_TREE)?)
    }
}

// =========================== FetchStrategy ========================== [[[

/// Where the tree is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub(crate) enum FetchStrategy {
    /// A running i3
    #[strum(serialize = "i3")]
    I3,
    /// The built-in example tree
    #[strum(serialize = "mock")]
    Mock,
}

impl FetchStrategy {
    /// Parse a strategy name
    pub(crate) fn from_name(name: &str) -> Result<Self, Error> {
        name.parse().map_err(|_| Error::UnknownStrategy {
            kind:      "fetch",
            name:      name.to_owned(),
            available: Self::iter().join(", "),
        })
    }

    /// Create the [`Fetcher`] of this strategy
    pub(crate) fn fetcher(self) -> Box<dyn Fetcher> {
        match self {
            Self::I3 => Box::new(FromI3::new()),
            Self::Mock => Box::new(FromFake),
        }
    }
} // ]]] === FetchStrategy ===


// vim: ft=rust:et:sw=4:ts=2:sts=4:tw=99:fdm=marker:fmr=[[[,]]]:
