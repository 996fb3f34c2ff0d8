//! Input discovery and output naming.
//!
//! Inputs may be files, directories or glob patterns:
//! - a file is taken as-is, whatever its extension
//! - a directory is scanned for files with a `pdf` extension (any case),
//!   one level deep unless recursion is requested
//! - anything containing glob metacharacters is expanded with `glob`
//!
//! Each discovered document is paired with its output path: the input's file
//! stem plus `.json`, placed in the output directory. Files found under a
//! directory input keep their sub-directory relative to it.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PdfOutlineError, Result};

/// One document to process and where its outline goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Source PDF.
    pub input: PathBuf,
    /// Destination JSON file.
    pub output: PathBuf,
}

/// Whether `path` has a `pdf` extension, ignoring case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Output file for `input`, relative to the directory it was found in.
///
/// `relative_dir` is the sub-directory between the scanned root and the file
/// (empty for top-level files and explicit inputs).
pub fn output_path_for(input: &Path, relative_dir: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(relative_dir).join(name)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand inputs into the ordered list of documents to process.
///
/// Inputs keep their command-line order; the documents found for one
/// directory or pattern are sorted by path. A document reached twice is kept
/// at its first position. Missing plain paths are kept, so the failure is
/// reported when the document is loaded. Every document gets its own output
/// file.
///
/// # Errors
///
/// Returns [`PdfOutlineError::InvalidPattern`] for a malformed glob pattern,
/// an I/O error when a directory cannot be walked,
/// [`PdfOutlineError::OutputCollision`] when two documents map to the same
/// output file, and [`PdfOutlineError::NoInputs`] when nothing was found.
pub fn discover(inputs: &[PathBuf], output_dir: &Path, recursive: bool) -> Result<Vec<PlannedFile>> {
    let mut planned = Vec::new();
    let mut seen = HashSet::new();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    let mut push = |input: PathBuf, relative_dir: &Path| -> Result<()> {
        if !seen.insert(input.clone()) {
            return Ok(());
        }

        let output = output_path_for(&input, relative_dir, output_dir);
        if let Some(first) = claimed.get(&output) {
            return Err(PdfOutlineError::output_collision(output, first.clone(), input));
        }
        claimed.insert(output.clone(), input.clone());

        planned.push(PlannedFile { input, output });
        Ok(())
    };

    for input in inputs {
        if input.is_dir() {
            for (path, relative_dir) in scan_directory(input, recursive)? {
                push(path, &relative_dir)?;
            }
            continue;
        }

        let pattern = input.to_string_lossy();
        if !input.exists() && has_glob_meta(&pattern) {
            for path in expand_pattern(&pattern)? {
                push(path, Path::new(""))?;
            }
            continue;
        }

        push(input.clone(), Path::new(""))?;
    }

    if planned.is_empty() {
        return Err(PdfOutlineError::NoInputs);
    }

    Ok(planned)
}

/// PDF files under `dir`, sorted, with their directory relative to `dir`.
fn scan_directory(dir: &Path, recursive: bool) -> Result<Vec<(PathBuf, PathBuf)>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut found = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PdfOutlineError::other(format!("{}: {e}", dir.display())))?;
        if !entry.file_type().is_file() || !is_pdf(entry.path()) {
            continue;
        }

        let relative_dir = entry
            .path()
            .strip_prefix(dir)
            .ok()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        found.push((entry.into_path(), relative_dir));
    }

    found.sort();
    Ok(found)
}

/// PDF files matching a glob pattern, sorted.
fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths =
        glob::glob(pattern).map_err(|err| PdfOutlineError::invalid_pattern(pattern, err.msg))?;

    let mut resolved = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfOutlineError::other(err.to_string()))?;
        if path.is_file() && is_pdf(&path) {
            resolved.push(path);
        }
    }

    resolved.sort();
    Ok(resolved)
}
