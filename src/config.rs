//! Configuration options

use anyhow::{Context, Result};
use colored::Colorize;
use directories::BaseDirs;
use format_serde_error::SerdeError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Configuration file name
const CONFIG_FILE: &str = "i3-tree.json";

/// Alternative configuration file name
const CONFIG_FILE_YAML: &str = "i3-tree.yml";

/// Directory created inside of the configuration directory
const CONFIG_SUBDIR: &str = "i3-tree";

/// Environment variable that overrides the configuration directory
const CONFIG_DIR_ENV: &str = "I3_TREE_CONFIG_DIR";

/// Base configuration directory (`$XDG_CONFIG_HOME` on Linux)
pub(crate) static CONFIG_DIR: Lazy<Option<PathBuf>> = Lazy::new(|| {
    env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| BaseDirs::new().map(|d| d.config_dir().to_path_buf()))
});

// ============================ NodeFormat ============================ [[[

/// Text attributes applied on top of the colors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Attributes {
    /// Bold or increased intensity
    pub(crate) bold:      bool,
    /// Italic
    pub(crate) italic:    bool,
    /// Underlined
    pub(crate) underline: bool,
    /// Faint or decreased intensity
    pub(crate) dim:       bool,
}

/// How a piece of text is decorated
///
/// A color of `0` leaves the terminal default untouched. `1..=16` select the
/// standard and bright colors, `17..=256` select the extended palette entry
/// one below the stored value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NodeFormat {
    /// Foreground color index
    pub(crate) foreground: i32,
    /// Background color index
    pub(crate) background: i32,
    /// Text attributes
    pub(crate) attributes: Attributes,
}

impl NodeFormat {
    /// Create a [`NodeFormat`] with only a foreground color
    pub(crate) const fn fg(foreground: i32) -> Self {
        Self {
            foreground,
            background: 0,
            attributes: Attributes {
                bold:      false,
                italic:    false,
                underline: false,
                dim:       false,
            },
        }
    }

    /// Return a copy of this [`NodeFormat`] that is also bold
    #[must_use]
    pub(crate) const fn bold(mut self) -> Self {
        self.attributes.bold = true;
        self
    }

    /// Layer `other` on top of this [`NodeFormat`]
    ///
    /// Colors of `other` win when they are set, attributes are combined
    #[must_use]
    pub(crate) const fn merge(mut self, other: &Self) -> Self {
        if other.foreground != 0 {
            self.foreground = other.foreground;
        }
        if other.background != 0 {
            self.background = other.background;
        }
        self.attributes.bold |= other.attributes.bold;
        self.attributes.italic |= other.attributes.italic;
        self.attributes.underline |= other.attributes.underline;
        self.attributes.dim |= other.attributes.dim;
        self
    }
}

/// A status icon and its formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct IconConfig {
    /// Is the icon displayed at all?
    pub(crate) enabled:    bool,
    /// The glyph itself
    pub(crate) icon:       String,
    /// Foreground color index
    pub(crate) foreground: i32,
    /// Background color index
    pub(crate) background: i32,
    /// Text attributes
    pub(crate) attributes: Attributes,
}

impl IconConfig {
    /// Create an enabled, bright white and bold icon
    fn new(icon: &str) -> Self {
        Self {
            enabled:    true,
            icon:       icon.to_owned(),
            foreground: 16,
            background: 0,
            attributes: Attributes {
                bold: true,
                ..Attributes::default()
            },
        }
    }

    /// The color part of the icon as a [`NodeFormat`]
    pub(crate) const fn format(&self) -> NodeFormat {
        NodeFormat {
            foreground: self.foreground,
            background: self.background,
            attributes: self.attributes,
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self::new("")
    }
}

// ]]] === NodeFormat ===

// ========================== DisplayOptions ========================== [[[

/// Characters used to draw the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Branches {
    /// Run following a connector
    pub(crate) horizontal: String,
    /// Trunk drawn below a node that has more siblings
    pub(crate) vertical:   String,
    /// Connector of a node that has more siblings
    pub(crate) connect_h:  String,
    /// Connector of the last sibling
    pub(crate) connect_v:  String,
}

impl Default for Branches {
    fn default() -> Self {
        Self {
            horizontal: String::from("──"),
            vertical:   String::from("│"),
            connect_h:  String::from("├"),
            connect_v:  String::from("└"),
        }
    }
}

/// Which optional pieces of information are shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DisplayOptions {
    /// Show window titles and workspace names
    pub(crate) show_window_titles: bool,
    /// Show window marks
    pub(crate) show_marks:         bool,
    /// Show the window class
    pub(crate) show_window_class:  bool,
    /// Show status icons
    pub(crate) show_icons:         bool,
    /// Tree drawing characters
    pub(crate) branches:           Branches,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_window_titles: true,
            show_marks:         true,
            show_window_class:  true,
            show_icons:         true,
            branches:           Branches::default(),
        }
    }
}

// ]]] === DisplayOptions ===

// ======================== FormattingOptions ========================= [[[

/// Formatting of node types, layouts and window details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FormattingOptions {
    /// `root` type label
    pub(crate) root:           NodeFormat,
    /// `output` type label
    pub(crate) output:         NodeFormat,
    /// `workspace` type label
    pub(crate) workspace:      NodeFormat,
    /// `con` type label
    pub(crate) con:            NodeFormat,
    /// `fcon` type label of floating containers
    pub(crate) float_con:      NodeFormat,
    /// Layout label, shared by every layout
    pub(crate) window_layout:  NodeFormat,
    /// Window marks
    pub(crate) window_marks:   NodeFormat,
    /// Window class
    pub(crate) window_class:   NodeFormat,
    /// Window title
    pub(crate) window_title:   NodeFormat,
    /// Branches leading to the focused node
    pub(crate) focus_branches: NodeFormat,
    /// Window class of the focused window
    pub(crate) focus_class:    NodeFormat,
    /// Added to the type label of the focused node
    pub(crate) focus_type:     NodeFormat,
    /// Brackets around the labels of the focused node
    pub(crate) focus_brackets: NodeFormat,
    /// Brackets around every other label
    pub(crate) brackets:       NodeFormat,
    /// Branches that do not lead to the focused node
    pub(crate) tree_branches:  NodeFormat,
    /// Type label of kinds without an entry of their own
    pub(crate) default:        NodeFormat,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            root:           NodeFormat::default(),
            output:         NodeFormat::fg(6),
            workspace:      NodeFormat::fg(7),
            con:            NodeFormat::fg(5),
            float_con:      NodeFormat::fg(5),
            window_layout:  NodeFormat::fg(4),
            window_marks:   NodeFormat::fg(2),
            window_class:   NodeFormat::default(),
            window_title:   NodeFormat::default(),
            focus_branches: NodeFormat::fg(81).bold(),
            focus_class:    NodeFormat::fg(255).bold(),
            focus_type:     NodeFormat::default().bold(),
            focus_brackets: NodeFormat::default().bold(),
            brackets:       NodeFormat::default(),
            tree_branches:  NodeFormat::default(),
            default:        NodeFormat::default(),
        }
    }
}

/// Status icons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct IconOptions {
    /// Window is fullscreen
    pub(crate) fullscreen: IconConfig,
    /// Window is floating
    pub(crate) floating:   IconConfig,
    /// Window is sticky
    pub(crate) sticky:     IconConfig,
    /// Window is urgent
    pub(crate) urgent:     IconConfig,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            fullscreen: IconConfig::new("󰊓"),
            floating:   IconConfig::new("󰭽"),
            sticky:     IconConfig::new("󱍭"),
            urgent:     IconConfig::new(""),
        }
    }
}

// ]]] === FormattingOptions ===

// =================== Config ===================== [[[

/// Configuration file to parse
///
/// Every section falls back to its default, so a partial file only overrides
/// what it mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Pruning used when none is given on the command line
    pub(crate) default_output_type: String,
    /// What is displayed
    pub(crate) display:             DisplayOptions,
    /// How it is colored
    pub(crate) formatting:          FormattingOptions,
    /// Status icons
    pub(crate) icons:               IconOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output_type: String::from("focused"),
            display:             DisplayOptions::default(),
            formatting:          FormattingOptions::default(),
            icons:               IconOptions::default(),
        }
    }
}

impl Config {
    // NOTE: SerdeError doesn't always point out correct error

    /// Load the configuration file from a given path
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: '{}'", path.display()))?;

        // YAML is a superset of JSON, so this reads both kinds of files
        let res = serde_yaml::from_str(&file).map_err(|e| SerdeError::new(file, e))?;

        Ok(res)
    }

    /// Load a configuration file given on the command line, expanding `~` and
    /// environment variables
    pub(crate) fn load_explicit(path: &Path) -> Result<Self> {
        let expanded = shellexpand::full(&path.to_string_lossy())
            .map(|p| PathBuf::from(p.as_ref()))
            .with_context(|| format!("failed to expand path: '{}'", path.display()))?;
        log::debug!("{}: {}", "Configuration path".bright_blue(), expanded.display());

        Self::load(&expanded)
            .with_context(|| format!("failed to load config: '{}'", expanded.display()))
    }

    /// Save the configuration as pretty printed JSON, creating parent directories
    pub(crate) fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(dir) = path.parent() {
            if !dir.exists() {
                log::debug!("Creating configuration path: {}", dir.display());
                fs::create_dir_all(dir).context("unable to create configuration directory")?;
            }
        }

        let data = serde_json::to_string_pretty(self).context("failed to serialize config")?;

        let mut config_file: fs::File = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("could not create config: '{}'", path.display()))?;

        config_file
            .write_all(data.as_bytes())
            .with_context(|| format!("could not write config: '{}'", path.display()))?;
        config_file.flush()?;

        Ok(())
    }

    /// Files searched for a configuration, in order
    pub(crate) fn candidates(dir: &Path) -> [PathBuf; 3] {
        [
            dir.join(CONFIG_FILE),
            dir.join(CONFIG_SUBDIR).join(CONFIG_FILE),
            dir.join(CONFIG_SUBDIR).join(CONFIG_FILE_YAML),
        ]
    }

    /// Load the first configuration found in `dir`
    ///
    /// When no file exists the defaults are written to
    /// `dir/i3-tree/i3-tree.json`. A file that fails to parse is reported and
    /// left alone, and the defaults are used.
    pub(crate) fn load_from_dir(dir: &Path) -> Self {
        let mut found = false;

        for path in &Self::candidates(dir) {
            if !path.is_file() {
                continue;
            }
            found = true;

            match Self::load(path) {
                Ok(config) => {
                    log::debug!("{}: {}", "Configuration path".bright_blue(), path.display());
                    return config;
                },
                Err(e) => log::warn!("ignoring config '{}': {:#}", path.display(), e),
            }
        }

        let config = Self::default();
        if !found {
            let path = dir.join(CONFIG_SUBDIR).join(CONFIG_FILE);
            if let Err(e) = config.save_to(&path) {
                log::debug!("unable to write default config '{}': {:#}", path.display(), e);
            }
        }

        config
    }

    /// Load the configuration from the default directory
    pub(crate) fn load_default() -> Self {
        CONFIG_DIR.as_ref().map_or_else(
            || {
                log::warn!("no configuration directory could be determined");
                Self::default()
            },
            |dir| {
                log::debug!("loading default config: {}", dir.display());
                Self::load_from_dir(dir)
            },
        )
    }
} // ]]] === Config ===


// vim: ft=rust:et:sw=4:ts=2:sts=4:tw=99:fdm=marker:fmr=[[[,]]]:
