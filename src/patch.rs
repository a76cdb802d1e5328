use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The fundamental patch primitive: first-match literal substitution in one file.
///
/// Reads the target as UTF-8 text, replaces the first occurrence of `search`
/// (exact substring, no pattern syntax) with `replacement`, and writes the
/// result back atomically. Later occurrences are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Patch does nothing until apply() is called"]
pub struct Patch {
    /// Path to the file to patch, resolved against the working directory
    pub file: PathBuf,
    /// Exact text to locate (lowest byte offset wins)
    pub search: String,
    /// Text spliced into the matched span
    pub replacement: String,
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("target file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied for {path}: {source}")]
    AccessDenied { path: PathBuf, source: io::Error },

    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Result of applying a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchOutcome should be checked for applied/unchanged"]
pub enum PatchOutcome {
    /// The first occurrence of the search literal was replaced
    Applied { file: PathBuf, byte_offset: usize },
    /// The search literal does not occur; the file was left byte-identical
    Unchanged { file: PathBuf },
}

/// Read-only answer from [`Patch::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// The search literal is present; apply() would change the file
    Pending,
    /// The search literal is absent; apply() would be a no-op
    Clean,
}

impl Patch {
    pub fn new(
        file: impl Into<PathBuf>,
        search: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            search: search.into(),
            replacement: replacement.into(),
        }
    }

    /// Pure first-match transform: `Some(patched)` if the search literal
    /// occurs in `text`, `None` otherwise.
    pub fn rewrite(&self, text: &str) -> Option<String> {
        text.find(&self.search)
            .map(|start| self.splice(text, start))
    }

    /// Splice the replacement over the span starting at `start`.
    ///
    /// `start` must come from a successful `find` of the search literal, so
    /// the span boundaries always sit on char boundaries.
    fn splice(&self, text: &str, start: usize) -> String {
        let end = start + self.search.len();
        let mut patched =
            String::with_capacity(text.len() - self.search.len() + self.replacement.len());
        patched.push_str(&text[..start]);
        patched.push_str(&self.replacement);
        patched.push_str(&text[end..]);
        patched
    }

    /// Apply this patch to the file system atomically.
    ///
    /// The read completes (and the handle is released) before the transform;
    /// the write goes through tempfile + fsync + rename, so a failure mid-write
    /// leaves the original file untouched. If the search literal does not
    /// occur, the rewritten text equals the original and the redundant write
    /// is skipped.
    pub fn apply(&self) -> Result<PatchOutcome, PatchError> {
        let text = self.read_text()?;

        let Some(byte_offset) = text.find(&self.search) else {
            return Ok(PatchOutcome::Unchanged {
                file: self.file.clone(),
            });
        };

        let patched = self.splice(&text, byte_offset);

        atomic_write(&self.file, patched.as_bytes())?;

        // Bump mtime so downstream build steps observe the change
        let now = filetime::FileTime::now();
        filetime::set_file_mtime(&self.file, now)
            .map_err(|source| classify_io(&self.file, source))?;

        Ok(PatchOutcome::Applied {
            file: self.file.clone(),
            byte_offset,
        })
    }

    /// Read-only probe: would [`Patch::apply`] change the file?
    ///
    /// Performs no writes.
    pub fn check(&self) -> Result<PatchStatus, PatchError> {
        let text = self.read_text()?;
        if text.contains(&self.search) {
            Ok(PatchStatus::Pending)
        } else {
            Ok(PatchStatus::Clean)
        }
    }

    fn read_text(&self) -> Result<String, PatchError> {
        let bytes = fs::read(&self.file).map_err(|source| classify_io(&self.file, source))?;
        String::from_utf8(bytes).map_err(|source| PatchError::Decode {
            path: self.file.clone(),
            source,
        })
    }
}

/// Map an `io::Error` onto the patch error taxonomy.
fn classify_io(path: &Path, source: io::Error) -> PatchError {
    match source.kind() {
        io::ErrorKind::NotFound => PatchError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => PatchError::AccessDenied {
            path: path.to_path_buf(),
            source,
        },
        _ => PatchError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the original file is unchanged.
fn atomic_write(path: &Path, content: &[u8]) -> Result<(), PatchError> {
    // A bare relative target like "showcqt-element.mjs" has an empty parent;
    // the tempfile must still land in the same directory as the target so the
    // rename stays on one filesystem.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|source| classify_io(path, source))?;

    temp.write_all(content)
        .map_err(|source| classify_io(path, source))?;

    // Flush to disk (fsync)
    temp.as_file()
        .sync_all()
        .map_err(|source| classify_io(path, source))?;

    // Atomic rename
    temp.persist(path)
        .map_err(|e| classify_io(path, e.error))?;

    Ok(())
}
