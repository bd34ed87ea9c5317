//! Fatal errors. Every failure aborts the whole run, so each variant names
//! the path it happened on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input directory not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error(
        "output directory {} overlaps input directory {}",
        output.display(),
        input.display()
    )]
    OverlappingDirs { input: PathBuf, output: PathBuf },

    #[error("failed to reset output directory {}: {source}", path.display())]
    Reset { path: PathBuf, source: io::Error },

    #[error("failed to list {}: {source}", path.display())]
    List {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to minify {}: {reason}", path.display())]
    Transform { path: PathBuf, reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to compress {}: {source}", path.display())]
    Compress { path: PathBuf, source: io::Error },
}
