use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Text of one document load.
///
/// The viewer is read-only: a reload produces a new [`SourceText`] instead of
/// mutating the existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// File path if loaded from disk
    pub path: Option<String>,
    /// Immutable contents
    pub text: Arc<str>,
    /// Fingerprint for file identification (computed from path)
    pub fingerprint: Option<u64>,
}

impl SourceText {
    pub fn new(path: Option<String>, text: impl Into<Arc<str>>) -> Self {
        let fingerprint = path.as_ref().map(|p| compute_fingerprint(p));
        Self {
            path,
            text: text.into(),
            fingerprint,
        }
    }

    /// In-memory text with no backing file.
    pub fn from_string(text: impl Into<Arc<str>>) -> Self {
        Self::new(None, text)
    }

    pub fn empty() -> Self {
        Self::from_string("")
    }

    /// Load a document from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let contents = fs::read(&path_buf)?;

        let contents = String::from_utf8(contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("File contains invalid UTF-8: {}", e),
            )
        })?;

        tracing::debug!(
            "Read {} bytes from {}",
            contents.len(),
            path_buf.display()
        );

        Ok(Self::new(
            Some(path_buf.to_string_lossy().to_string()),
            contents,
        ))
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `other` was loaded from the same file.
    ///
    /// Two in-memory texts never count as the same file.
    pub fn same_file(&self, other: &SourceText) -> bool {
        match (self.fingerprint, other.fingerprint) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    pub fn display_name(&self) -> &str {
        if let Some(path) = &self.path {
            Path::new(path)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(path)
        } else {
            "(untitled)"
        }
    }
}

impl Default for SourceText {
    fn default() -> Self {
        Self::empty()
    }
}

fn compute_fingerprint(path: &str) -> u64 {
    let resolved = canonicalize_lossy(path);
    let mut hasher = DefaultHasher::new();
    resolved.hash(&mut hasher);
    hasher.finish()
}

fn canonicalize_lossy(path: &str) -> String {
    let path_buf = PathBuf::from(path);
    fs::canonicalize(&path_buf)
        .unwrap_or(path_buf)
        .to_string_lossy()
        .into_owned()
}
