//! Turning a [`NodeFormat`] into ANSI escape sequences

use crate::config::NodeFormat;
use itertools::Itertools;
use std::fmt;

/// Reset every attribute
const RESET: &str = "\x1b[0m";

/// A color understood by the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// One of the 8 standard colors (`0..8`) or their bright variants (`8..16`)
    Standard(u8),
    /// An entry of the 256 color palette
    Indexed(u8),
}

impl Color {
    /// Resolve a configured color index
    ///
    /// `1..=16` are the standard colors, `17..=256` map to palette entry
    /// `index - 1`. Anything else means "leave the color alone".
    pub(crate) fn from_index(index: i32) -> Option<Self> {
        match index {
            1..=16 => u8::try_from(index - 1).ok().map(Self::Standard),
            17..=256 => u8::try_from(index - 1).ok().map(Self::Indexed),
            _ => None,
        }
    }

    /// SGR parameter selecting this color as the foreground
    fn foreground(self) -> String {
        match self {
            Self::Standard(c @ 0..=7) => (30 + c).to_string(),
            Self::Standard(c) => (90 + c - 8).to_string(),
            Self::Indexed(c) => format!("38;5;{}", c),
        }
    }

    /// SGR parameter selecting this color as the background
    fn background(self) -> String {
        match self {
            Self::Standard(c @ 0..=7) => (40 + c).to_string(),
            Self::Standard(c) => (100 + c - 8).to_string(),
            Self::Indexed(c) => format!("48;5;{}", c),
        }
    }
}

/// Escape sequence parameters for a [`NodeFormat`], in emission order
pub(crate) fn sgr_codes(format: &NodeFormat) -> Vec<String> {
    let mut codes = Vec::new();

    if let Some(fg) = Color::from_index(format.foreground) {
        codes.push(fg.foreground());
    }
    if let Some(bg) = Color::from_index(format.background) {
        codes.push(bg.background());
    }

    let attrs = &format.attributes;
    for (set, code) in [
        (attrs.bold, "1"),
        (attrs.dim, "2"),
        (attrs.italic, "3"),
        (attrs.underline, "4"),
    ] {
        if set {
            codes.push(code.to_owned());
        }
    }

    codes
}

/// Text decorated with a [`NodeFormat`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Painted<'a> {
    /// The plain text
    text:  &'a str,
    /// Escape sequence parameters, empty for plain text
    codes: Vec<String>,
}

impl fmt::Display for Painted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codes.is_empty() || self.text.is_empty() {
            return f.write_str(self.text);
        }
        write!(f, "\x1b[{}m{}{}", self.codes.iter().join(";"), self.text, RESET)
    }
}

// ============================== Painter ============================= [[[

/// The capability of emitting colors
///
/// A disabled [`Painter`] passes text through untouched, so no escape sequence
/// is ever written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Painter {
    /// Are colors and attributes emitted?
    enabled: bool,
}

impl Painter {
    /// Create a new [`Painter`]
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Are colors emitted?
    pub(crate) const fn enabled(self) -> bool {
        self.enabled
    }

    /// Decorate `text` with `format`
    pub(crate) fn paint<'a>(self, text: &'a str, format: &NodeFormat) -> Painted<'a> {
        Painted {
            text,
            codes: if self.enabled {
                sgr_codes(format)
            } else {
                vec![]
            },
        }
    }
} // ]]] === Painter ===


// vim: ft=rust:et:sw=4:ts=2:sts=4:tw=99:fdm=marker:fmr=[[[,]]]:
