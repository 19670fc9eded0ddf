//! Plain writers backing the `sh_*` macros.
//!
//! Output goes through [`anstream`], which strips the styles when the stream is not a terminal or
//! when `NO_COLOR` is set.

use super::style::{ERROR, WARN};
use anstyle::Style;
use std::{
    fmt,
    io::{self, Write},
};

/// Writes `args` followed by a newline to stdout.
pub fn println(args: fmt::Arguments<'_>) -> io::Result<()> {
    let mut out = anstream::stdout().lock();
    out.write_fmt(args)?;
    writeln!(out)
}

/// Writes a `Warning:` prefixed line to stderr.
pub fn warn(args: fmt::Arguments<'_>) -> io::Result<()> {
    labeled(WARN, "Warning", args)
}

/// Writes an `Error:` prefixed line to stderr.
pub fn error(args: fmt::Arguments<'_>) -> io::Result<()> {
    labeled(ERROR, "Error", args)
}

fn labeled(style: Style, label: &str, args: fmt::Arguments<'_>) -> io::Result<()> {
    let mut err = anstream::stderr().lock();
    write!(err, "{style}{label}{style:#}: ")?;
    err.write_fmt(args)?;
    writeln!(err)
}
