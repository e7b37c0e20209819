//! Various helper-utilities

use crate::cli::Opts;
use anyhow::{Context, Result};
use colored::Colorize;
use flexi_logger::{AdaptiveFormat, DeferredNow, Level, Logger, LoggerHandle, Record};
use serde::{de, Deserialize};
use std::{
    env,
    io::{self, Write},
    panic,
    process::Command,
};
use which::which;

/// Environment variable overriding the log level
pub(crate) const LOG_ENV: &str = "I3_TREE_LOG";

/// ANSI sequence clearing the screen and homing the cursor
const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[1;1H";

/// Shorter way of testing if the user wants color in the output
pub(crate) fn wants_color() -> bool {
    env::var_os("NO_COLOR").is_none()
}

/// Initializes logging for this crate
pub(crate) fn initialize_logging(args: &Opts) -> Result<LoggerHandle> {
    /// Customize the format of the log (colored)
    fn colored_format(
        w: &mut dyn Write,
        _now: &mut DeferredNow,
        record: &Record,
    ) -> Result<(), io::Error> {
        let level = record.level();
        let styled = match level {
            Level::Error => level.to_string().red().bold(),
            Level::Warn => level.to_string().yellow().bold(),
            Level::Info => level.to_string().green(),
            Level::Debug => level.to_string().bright_blue(),
            Level::Trace => level.to_string().purple(),
        };
        write!(
            w,
            "{:<5} [{}:{}]: {}",
            styled,
            record.file().unwrap_or("<unnamed>").bright_black(),
            record.line().unwrap_or(0),
            &record.args()
        )
    }

    /// Customize the format of the log (uncolored)
    fn uncolored_format(
        w: &mut dyn Write,
        now: &mut DeferredNow,
        record: &Record,
    ) -> Result<(), io::Error> {
        // Strip the ansi sequences put in log messages using the `colored` crate
        write!(
            w,
            "[{:>}] {:<5} [{}:{}]: {}",
            now.now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.file().unwrap_or("<unnamed>"),
            record.line().unwrap_or(0),
            strip_ansi(&record.args().to_string())?
        )
    }

    if cfg!(debug_assertions) {
        better_panic::install();
        panic::set_hook(Box::new(|panic_info| {
            better_panic::Settings::auto().create_panic_handler()(panic_info);
        }));
    }

    // stdout carries the tree, so stay quiet unless asked otherwise
    let spec = env::var(LOG_ENV).unwrap_or_else(|_| match args.verbose {
        0 => String::from("warn"),
        1 => String::from("debug"),
        _ => String::from("trace"),
    });

    Logger::try_with_str(spec)
        .context("invalid log specification")?
        .adaptive_format_for_stderr(AdaptiveFormat::Custom(uncolored_format, colored_format))
        .start()
        .context("failed to start the logger")
}

/// Remove every ANSI escape sequence from `s`
pub(crate) fn strip_ansi(s: &str) -> Result<String, io::Error> {
    String::from_utf8(strip_ansi_escapes::strip(s.as_bytes())?)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Clear the terminal, preferring the `clear` binary when it is installed
pub(crate) fn clear_screen() -> Result<()> {
    if let Ok(clear) = which("clear") {
        let status = Command::new(&clear)
            .status()
            .with_context(|| format!("failed to run '{}'", clear.display()))?;
        if status.success() {
            return Ok(());
        }
        log::debug!("'{}' exited with {}", clear.display(), status);
    }

    let mut stdout = io::stdout();
    stdout.write_all(CLEAR_SEQUENCE.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// [`Deserialize`] a value that i3 may report as `null` into its default
#[allow(single_use_lifetimes)]
pub(crate) fn deserialize_null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: de::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::strip_ansi;

    #[test]
    fn strips_sgr_sequences() {
        let s = "\x1b[34;1mcon\x1b[0m plain";
        assert_eq!(strip_ansi(s).unwrap(), "con plain");
    }
}
