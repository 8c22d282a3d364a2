//! Extension-based format dispatch.
//!
//! Maps a file extension to one of the four backend kinds and constructs a
//! [`Document`] bound to that backend. Unknown extensions are a first-class
//! "no match" outcome, not an error, and the file is not required to exist
//! at dispatch time.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::scrub::{Document, OfficeBackend, PdfBackend, RemuxBackend, ScrubBackend, TagBackend};

/// The four backend strategies a file can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// External tag tool (images and some video containers).
    Tag,
    /// External remux tool (video containers the tag tool cannot rewrite).
    Remux,
    /// PDF object-graph traversal and rewriting.
    PdfGraph,
    /// Office package core/extended XML properties (read-only).
    XmlProperty,
}

impl BackendKind {
    /// Returns a short human-readable name for this backend kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Remux => "remux",
            Self::PdfGraph => "pdf-graph",
            Self::XmlProperty => "xml-property",
        }
    }
}

/// Registry of supported extensions (lowercase, no leading dot).
static EXTENSIONS: Lazy<HashMap<&'static str, BackendKind>> = Lazy::new(|| {
    HashMap::from([
        ("flv", BackendKind::Tag),
        ("gif", BackendKind::Tag),
        ("jpg", BackendKind::Tag),
        ("jpeg", BackendKind::Tag),
        ("png", BackendKind::Tag),
        ("mp4", BackendKind::Tag),
        ("mov", BackendKind::Remux),
        ("mpg", BackendKind::Remux),
        ("wmv", BackendKind::Remux),
        ("pdf", BackendKind::PdfGraph),
        ("docx", BackendKind::XmlProperty),
        ("pptx", BackendKind::XmlProperty),
    ])
});

/// Looks up the backend kind registered for an extension.
///
/// The extension must already be lowercase without a leading dot.
pub fn backend_kind_for(extension: &str) -> Option<BackendKind> {
    EXTENSIONS.get(extension).copied()
}

/// Resolves a path to a [`Document`] driven by the backend registered for
/// its extension.
///
/// Returns `None` when the path has no extension or the extension is not in
/// the registry. The path is resolved to an absolute form but is not checked
/// for existence; a missing file surfaces as a backend error at first use.
pub fn dispatch(path: &Path) -> Option<Document> {
    let path = absolute(path);
    let kind = extension_of(&path).and_then(|ext| backend_kind_for(&ext))?;
    let backend: Box<dyn ScrubBackend> = match kind {
        BackendKind::Tag => Box::new(TagBackend::new(&path)),
        BackendKind::Remux => Box::new(RemuxBackend::new(&path)),
        BackendKind::PdfGraph => Box::new(PdfBackend::new(&path)),
        BackendKind::XmlProperty => Box::new(OfficeBackend::new(&path)),
    };
    Some(Document::new(path, kind, backend))
}

/// Extracts the lowercase extension, if any.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Makes a path absolute without touching the filesystem.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
