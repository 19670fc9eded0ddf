/// Prints a line to stdout.
///
/// Returns an [`std::io::Result`], so it can be used with `?`.
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::io::shell::println(::core::format_args!(""))
    };
    ($($args:tt)*) => {
        $crate::io::shell::println(::core::format_args!($($args)*))
    };
}

/// Prints a styled `Warning:` line to stderr.
#[macro_export]
macro_rules! sh_warn {
    ($($args:tt)*) => {
        $crate::io::shell::warn(::core::format_args!($($args)*))
    };
}

/// Prints a styled `Error:` line to stderr.
#[macro_export]
macro_rules! sh_err {
    ($($args:tt)*) => {
        $crate::io::shell::error(::core::format_args!($($args)*))
    };
}
