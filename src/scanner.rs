use crate::error::{Error, Result};
use crate::minifier::Minifier;
use crate::types::AssetKind;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Removes `path` with everything in it (if present) and creates it again.
pub fn reset_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(Error::Reset {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    fs::create_dir_all(path).map_err(|source| Error::Reset {
        path: path.to_path_buf(),
        source,
    })
}

/// Regular files directly inside `dir`, ordered by file name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| Error::List {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else {
            warn!("Skipping {} (not a regular file)", entry.path().display());
        }
    }

    Ok(files)
}

/// Produces the output bytes for one input file.
pub fn transform<M: Minifier>(minifier: &M, path: &Path, bytes: Vec<u8>) -> Result<Vec<u8>> {
    let fail = |reason: String| Error::Transform {
        path: path.to_path_buf(),
        reason,
    };

    let kind = AssetKind::from_path(path);
    if kind == AssetKind::Passthrough {
        return Ok(bytes);
    }
    let src =
        String::from_utf8(bytes).map_err(|_| fail("input is not valid UTF-8".to_string()))?;

    match kind {
        AssetKind::Html => minifier.html(&src),
        AssetKind::Css => minifier.css(&src).map(String::into_bytes),
        AssetKind::Js => minifier.js(&src).map(String::into_bytes),
        AssetKind::Passthrough => Ok(src.into_bytes()),
    }
    .map_err(fail)
}

/// Transform phase: resets `output`, then minifies every file of `input` into it.
///
/// Returns the processed file names in processing order.
pub fn minify_dir<M: Minifier>(minifier: &M, input: &Path, output: &Path) -> Result<Vec<OsString>> {
    if !input.is_dir() {
        return Err(Error::MissingInput {
            path: input.to_path_buf(),
        });
    }
    if dirs_overlap(input, output) {
        return Err(Error::OverlappingDirs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
    }

    reset_dir(output)?;

    let files = list_files(input)?;
    let total_files = files.len();
    let mut processed = Vec::with_capacity(total_files);

    for (i, path) in files.into_iter().enumerate() {
        let Some(name) = path.file_name().map(OsString::from) else {
            continue;
        };
        info!("[{}/{}] Minifying {}", i + 1, total_files, path.display());

        let origin = fs::read(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        let origin_len = origin.len();
        let minified = transform(minifier, &path, origin)?;

        let target = output.join(&name);
        fs::write(&target, &minified).map_err(|source| Error::Write {
            path: target.clone(),
            source,
        })?;
        debug!(
            "Wrote {} ({} -> {})",
            target.display(),
            human_bytes::human_bytes(origin_len as f64),
            human_bytes::human_bytes(minified.len() as f64)
        );

        processed.push(name);
    }

    Ok(processed)
}

/// Absolute form of `path` with symlinks resolved for the part that exists.
fn resolve(path: &Path) -> PathBuf {
    let mut base = path.to_path_buf();
    let mut tail = Vec::new();

    let mut resolved = loop {
        let candidate = if base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            base.as_path()
        };
        if let Ok(real) = fs::canonicalize(candidate) {
            break real;
        }
        let last = match base.components().next_back() {
            Some(c @ (Component::Normal(_) | Component::CurDir | Component::ParentDir)) => {
                Some(c.as_os_str().to_os_string())
            }
            _ => None,
        };
        match last {
            Some(part) => {
                tail.push(part);
                base.pop();
            }
            None => break base,
        }
    };

    for part in tail.iter().rev() {
        match Path::new(part).components().next() {
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::CurDir) | None => {}
            Some(_) => resolved.push(part),
        }
    }
    resolved
}

/// True when resetting `output` would touch `input`: same directory, an
/// ancestor of it, or a directory inside it.
fn dirs_overlap(input: &Path, output: &Path) -> bool {
    let input = resolve(input);
    let output = resolve(output);
    input.starts_with(&output) || output.starts_with(&input)
}
