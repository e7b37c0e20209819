//! The command line arguments

use crate::utils::wants_color;
use clap::{crate_description, crate_version, AppSettings, Parser, ValueHint};
use once_cell::sync::Lazy;
use std::{env, fs, path::PathBuf, time::Duration};

/// Interval used when `--watch` is given `0`
const DEFAULT_WATCH_SECS: u64 = 5;

/// Options for the [`i3-tree`] program
#[derive(Parser, Default, Clone, Debug, PartialEq)]
#[clap(
    version = crate_version!(),
    about = <String as AsRef<str>>::as_ref(&APP_ABOUT),
    after_help =  <String as AsRef<str>>::as_ref(&AFTER_HELP),
    override_usage =  <String as AsRef<str>>::as_ref(&OVERRIDE_HELP),
    max_term_width = 100,
    color = clap::ColorChoice::Auto,
    global_setting = AppSettings::DeriveDisplayOrder,
)]
pub(crate) struct Opts {
    /// Display debugging messages on various levels
    #[clap(
        long,
        short,
        parse(from_occurrences),
        long_help = "
        Set the verbosity level of the program. Only warnings are shown by default. If `-v` is \
                     used, DEBUG messages are displayed, and if `-vv` is used TRACE messages are \
                     displayed. The verbosity can also be set with the `I3_TREE_LOG` environment \
                     variable"
    )]
    pub(crate) verbose: u8,

    /// Location of configuration file
    #[clap(
        long,
        short,
        takes_value = true,
        number_of_values = 1,
        value_name = "file",
        value_hint = ValueHint::FilePath,
        validator = |t| {
            fs::metadata(
                PathBuf::from(t).components()
                    .count()
                    .gt(&1_usize)
                    .then(|| PathBuf::from(t))
                    .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(t)),
            )
            .map(|_| ())
            .map_err(|_| String::from("must be a valid path"))
        },
        long_help = "\
        Specify the location of the configuration file. By default `i3-tree.json` is searched \
                for in `$XDG_CONFIG_HOME` and `$XDG_CONFIG_HOME/i3-tree`"
    )]
    pub(crate) config: Option<PathBuf>,

    /// Where the tree is fetched from
    #[clap(
        long,
        short,
        value_name = "source",
        default_value = "i3",
        long_help = "\
        Where to get the tree from. `i3` asks the running window manager over its IPC socket, \
                `mock` uses a built-in example tree"
    )]
    pub(crate) from: String,

    /// How the tree is displayed
    #[clap(
        long,
        short,
        value_name = "style",
        default_value = "console",
        long_help = "\
        How to display the tree. `console` colors it (unless `NO_COLOR` is set), `no-color` \
                never emits escape sequences"
    )]
    pub(crate) render: String,

    /// Redraw the tree every N seconds
    #[clap(
        long,
        short,
        value_name = "seconds",
        long_help = "\
        Clear the screen and redraw the tree every N seconds until interrupted. A value of 0 \
                uses the default interval of 5 seconds"
    )]
    pub(crate) watch: Option<u64>,

    /// Workspace to display (name or number), or one of `focused`, `all`, `raw`
    #[clap(
        value_name = "workspace",
        long_help = "\
        Which part of the tree to display. `focused` shows the focused workspace, `all` every \
                workspace holding a window, `raw` the whole tree, and anything else is the name \
                or number of a workspace. Defaults to `default_output_type` from the \
                configuration"
    )]
    pub(crate) workspace: Option<String>,
}

impl Opts {
    /// Interval between redraws, if watching
    pub(crate) fn watch_interval(&self) -> Option<Duration> {
        self.watch.map(|secs| {
            Duration::from_secs(if secs == 0 { DEFAULT_WATCH_SECS } else { secs })
        })
    }
}

// =============== Prettify Help ==================

/// Yellow ansi code
const YELLOW: &str = "\x1b[0;33m";
/// Green ansi code
const GREEN: &str = "\x1b[0;32m";
/// Bold-red ansi code
const BRED: &str = "\x1b[01;38;5;1m";
/// Reset colors
const RES: &str = "\x1b[0m";

/// Colored options used in the output of `--help`
pub(crate) static APP_ABOUT: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "{}DESCRIPTION: {}{}{}",
                YELLOW,
                GREEN,
                crate_description!(),
                RES
            )
        })
        .unwrap_or_else(|| crate_description!().to_owned())
});

/// Colorized message to override the generated help message
pub(crate) static OVERRIDE_HELP: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "{}i3-tree{} [{}FLAGS{}/{}OPTIONS{}] [workspace]",
                BRED, RES, GREEN, RES, GREEN, RES
            )
        })
        .unwrap_or_else(|| String::from("i3-tree [FLAGS/OPTIONS] [workspace]"))
});

/// Colorized message displayed after the help message
pub(crate) static AFTER_HELP: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "See {}i3-tree{} {}--help{} for longer explanations of some options.",
                BRED, RES, GREEN, RES
            )
        })
        .unwrap_or_else(|| {
            String::from("See i3-tree --help for longer explanations of some options.")
        })
});
