//! Image references and image lists

pub mod reference;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use reference::{ImageReference, ReferenceError};

#[derive(Debug, Error)]
pub enum ImageListError {
    #[error("failed to read image list {}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },

    #[error("failed to read image list from stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Extracts image references from a newline-separated list.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_image_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Gathers the images to check.
///
/// Images given as arguments come first, followed by those listed in `file`
/// (`-` reads stdin). Without arguments or a file, a piped stdin is read.
/// `read_stdin` is only called when stdin is actually needed.
pub fn collect_images<F>(
    args: &[String],
    file: Option<&Path>,
    stdin_piped: bool,
    read_stdin: F,
) -> Result<Vec<String>, ImageListError>
where
    F: FnOnce() -> io::Result<String>,
{
    let mut images = args.to_vec();

    match file {
        Some(path) if path.as_os_str() == "-" => {
            images.extend(parse_image_list(&read_stdin().map_err(ImageListError::Stdin)?));
        }
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ImageListError::File {
                path: path.to_path_buf(),
                source,
            })?;
            images.extend(parse_image_list(&text));
        }
        None if images.is_empty() && stdin_piped => {
            images.extend(parse_image_list(&read_stdin().map_err(ImageListError::Stdin)?));
        }
        None => {}
    }

    Ok(images)
}
