//! Output of check results
//!
//! Successful lookups are written as `<image>\t<tag>` lines, failures as
//! `<image>\t<error>` lines on the error stream.

use std::io::{self, Write};

use crate::check::ImageCheck;

/// Writes the report for `checks`.
///
/// In `differences_only` mode, images already on their newest tag are not
/// printed. Returns whether any image failed.
pub fn write_report<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    checks: &[ImageCheck],
    differences_only: bool,
) -> io::Result<bool> {
    let mut has_error = false;

    for check in checks {
        match &check.result {
            Ok(_) if differences_only && check.is_unchanged() => {}
            Ok(tag) => writeln!(out, "{}\t{}", check.image, tag)?,
            Err(e) => {
                writeln!(err, "{}\t{}", check.image, e)?;
                has_error = true;
            }
        }
    }

    out.flush()?;
    Ok(has_error)
}
