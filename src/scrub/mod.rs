//! Backend strategies and the document service wrapping them.
//!
//! This module provides a strategy pattern over the four format backends,
//! allowing the dispatcher to hand every supported file to the same
//! interface regardless of how its metadata is stored.

pub mod backend;
pub mod office;
pub mod pdf;
pub mod remux;
pub mod tag;

pub use backend::{Metadata, ScrubBackend};
pub use office::OfficeBackend;
pub use pdf::PdfBackend;
pub use remux::RemuxBackend;
pub use tag::TagBackend;

use std::path::{Path, PathBuf};

use crate::dispatch::BackendKind;
use crate::error::{ScrubError, ScrubResult};

/// A file bound to the backend strategy selected for its format.
///
/// Created by [`dispatch`](crate::dispatch::dispatch); immutable identity,
/// no persistent state. Metadata reads and scrubs each re-derive their
/// result from the file on disk.
pub struct Document {
    path: PathBuf,
    kind: BackendKind,
    backend: Box<dyn ScrubBackend>,
}

impl Document {
    /// Binds a path to a backend. Used by the dispatcher.
    pub(crate) fn new(path: PathBuf, kind: BackendKind, backend: Box<dyn ScrubBackend>) -> Self {
        Self {
            path,
            kind,
            backend,
        }
    }

    /// The absolute path this document was created from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The backend kind selected for this document's extension.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Returns whether scrubbing is available for this document's format.
    ///
    /// Callers should check this before requesting a scrub; it is fixed per
    /// backend kind.
    pub fn supports_scrubbing(&self) -> bool {
        self.backend.supports_scrubbing()
    }

    /// Reads the document's metadata, fresh on every call.
    pub fn metadata(&self) -> ScrubResult<Metadata> {
        self.backend.metadata()
    }

    /// Produces the scrubbed file content in memory.
    ///
    /// Returns [`ScrubError::ScrubUnsupported`] without touching any files
    /// when the backend cannot rewrite its format.
    pub fn scrub(&self) -> ScrubResult<Vec<u8>> {
        if !self.backend.supports_scrubbing() {
            return Err(ScrubError::ScrubUnsupported {
                backend: self.backend.name(),
            });
        }
        self.backend.scrub()
    }
}
