//! Macros for error/info printing

/// Expand to an error message
#[macro_export]
macro_rules! i3tree_error {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[i3-tree error]".red().bold(), format!($($err)*));
    })
}

/// Expand to an info message
#[macro_export]
macro_rules! i3tree_info {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[i3-tree info]".purple().bold(), format!($($err)*));
    })
}
