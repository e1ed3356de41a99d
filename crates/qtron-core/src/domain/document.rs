//! Document model: the bytes a host displays for one opened model file.

use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::ports::Diagnostics;

/// How the content of a [`Document`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentOrigin {
    /// Raw bytes of the source (or backup) file.
    Original,

    /// Output of the simplification tool.
    Simplified,
}

/// An opened model document.
///
/// `content` is fixed at construction; reacquiring the same file produces a
/// new `Document`.
#[derive(Debug, Clone)]
pub struct Document {
    source: PathBuf,
    content: Bytes,
    origin: DocumentOrigin,
}

impl Document {
    pub(crate) fn new(source: impl Into<PathBuf>, content: Bytes, origin: DocumentOrigin) -> Self {
        Self {
            source: source.into(),
            content,
            origin,
        }
    }

    /// Path of the file the host opened (never the backup or temp path).
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn origin(&self) -> DocumentOrigin {
        self.origin
    }

    /// Called by the host when the document is closed.
    ///
    /// Nothing is owned besides the buffer, so this only records the event.
    pub fn dispose(self, diagnostics: &dyn Diagnostics) {
        diagnostics.line(&format!("Document disposed: {}", self.source.display()));
    }
}
