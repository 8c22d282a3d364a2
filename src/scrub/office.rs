//! XML-property backend for office document packages.
//!
//! Reads the core and extended property parts from the package's ZIP
//! structure. Scrubbing is unsupported for this backend: rewriting a
//! package without breaking relationships is out of scope, so `scrub`
//! always reports the typed unsupported outcome.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use xmltree::{Element, XMLNode};

use crate::error::{ScrubError, ScrubResult};
use crate::scrub::backend::{Metadata, ScrubBackend};

/// Core properties part (title, creator, dates).
const CORE_PART: &str = "docProps/core.xml";
/// Extended (application) properties part (application, company, counts).
const APP_PART: &str = "docProps/app.xml";

/// Backend reading core and extended properties from an office package.
pub struct OfficeBackend {
    path: PathBuf,
}

impl OfficeBackend {
    /// Creates a backend bound to an office package path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open_archive(&self) -> ScrubResult<zip::ZipArchive<File>> {
        let file = File::open(&self.path).map_err(|source| ScrubError::Io {
            path: self.path.clone(),
            source,
        })?;
        zip::ZipArchive::new(file).map_err(|source| ScrubError::OfficePackage {
            path: self.path.clone(),
            message: "not a readable office package".to_string(),
            source: Some(source),
        })
    }
}

impl ScrubBackend for OfficeBackend {
    fn metadata(&self) -> ScrubResult<Metadata> {
        let mut archive = self.open_archive()?;
        let mut tags = Metadata::new();
        // Extended properties are applied last, so they win on collision.
        collect_properties(&mut archive, CORE_PART, &mut tags);
        collect_properties(&mut archive, APP_PART, &mut tags);
        Ok(tags)
    }

    fn scrub(&self) -> ScrubResult<Vec<u8>> {
        Err(ScrubError::ScrubUnsupported {
            backend: self.name(),
        })
    }

    fn supports_scrubbing(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "xml-property"
    }
}

/// Reads one property part and merges its elements into the map.
///
/// A missing part or malformed XML contributes nothing; per-part trouble is
/// not an error for the document as a whole.
fn collect_properties(archive: &mut zip::ZipArchive<File>, part: &str, tags: &mut Metadata) {
    let mut contents = String::new();
    let Ok(mut entry) = archive.by_name(part) else {
        return;
    };
    if entry.read_to_string(&mut contents).is_err() {
        return;
    }
    let Ok(root) = Element::parse(contents.as_bytes()) else {
        return;
    };
    for node in &root.children {
        if let XMLNode::Element(property) = node {
            tags.insert(property.name.clone(), element_text(property));
        }
    }
}

/// Concatenated text content of an element, trimmed.
fn element_text(element: &Element) -> String {
    let mut content = String::new();
    for node in &element.children {
        if let XMLNode::Text(text) = node {
            content.push_str(text);
        }
    }
    content.trim().to_string()
}
