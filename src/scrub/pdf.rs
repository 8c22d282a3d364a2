//! PDF object-graph backend.
//!
//! Reads the document information dictionary, resolving indirect references
//! through a bounded depth-first search over the object table, and scrubs
//! by rewriting the document with a fresh info dictionary and all XMP
//! metadata streams removed.

use std::collections::HashSet;
use std::path::PathBuf;

use lopdf::{Dictionary, Document as PdfDocument, Object, ObjectId};

use crate::error::{ScrubError, ScrubResult};
use crate::scrub::backend::{Metadata, ScrubBackend};

/// Upper bound on reference-chain depth during info-value resolution.
///
/// A chain deeper than this, or one revisiting an object id, resolves to
/// "not found" instead of recursing forever on a cyclic graph.
const MAX_RESOLVE_DEPTH: usize = 32;

/// Backend parsing and rewriting PDF documents via their object graph.
pub struct PdfBackend {
    path: PathBuf,
}

impl PdfBackend {
    /// Creates a backend bound to a PDF path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> ScrubResult<PdfDocument> {
        PdfDocument::load(&self.path).map_err(|source| ScrubError::PdfProcessing {
            path: self.path.clone(),
            message: "failed to load document".to_string(),
            source: Some(source),
        })
    }
}

impl ScrubBackend for PdfBackend {
    fn metadata(&self) -> ScrubResult<Metadata> {
        let doc = self.load()?;
        let mut tags = Metadata::new();

        let info = match info_dictionary(&doc) {
            Some(info) => info,
            None => return Ok(tags),
        };

        for (key, value) in info.iter() {
            let key = String::from_utf8_lossy(key).into_owned();
            match value {
                Object::String(bytes, _) => {
                    tags.insert(key, decode_text(bytes));
                }
                Object::Reference(id) => {
                    // Some producers store info values behind indirection
                    // rather than inline. Resolve or skip, never hang.
                    let mut visited = HashSet::new();
                    if let Some(text) = resolve_text(&doc, *id, &mut visited, MAX_RESOLVE_DEPTH) {
                        tags.insert(key, text);
                    }
                }
                _ => {}
            }
        }

        Ok(tags)
    }

    fn scrub(&self) -> ScrubResult<Vec<u8>> {
        let mut doc = self.load()?;

        // Replace the info dictionary wholesale: the rewritten document
        // carries only an empty Producer entry.
        let old_info = doc.trailer.get(b"Info").ok().cloned();
        if let Some(Object::Reference(id)) = old_info {
            doc.objects.remove(&id);
        }
        doc.trailer.remove(b"Info");

        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal(""));
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));

        // XMP lives under /Metadata on the catalog and sometimes on
        // individual pages; PieceInfo carries application-private data.
        if let Ok(catalog_id) = doc.trailer.get(b"Root").and_then(|root| root.as_reference()) {
            strip_object_metadata(&mut doc, catalog_id);
        }
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for page_id in pages {
            strip_object_metadata(&mut doc, page_id);
        }

        // The trailer ID pair fingerprints the producing session.
        doc.trailer.remove(b"ID");

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|source| ScrubError::PdfProcessing {
                path: self.path.clone(),
                message: "failed to serialize scrubbed document".to_string(),
                source: Some(lopdf::Error::IO(source)),
            })?;
        Ok(buffer)
    }

    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "pdf-graph"
    }
}

/// Dereferences the trailer's Info entry to a dictionary, if present.
fn info_dictionary(doc: &PdfDocument) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Resolves an indirect reference to a text value.
///
/// Looks the target up in the object table, then searches the found object
/// depth-first: nested references are followed and dictionaries, arrays and
/// stream dictionaries are recursed into until a text value turns up. The
/// visited set and depth budget turn reference cycles into a `None` result.
fn resolve_text(
    doc: &PdfDocument,
    target: ObjectId,
    visited: &mut HashSet<ObjectId>,
    depth: usize,
) -> Option<String> {
    if depth == 0 || !visited.insert(target) {
        return None;
    }
    let object = doc.objects.get(&target)?;
    object_text(doc, object, visited, depth - 1)
}

/// Extracts the first text value reachable from an object.
fn object_text(
    doc: &PdfDocument,
    object: &Object,
    visited: &mut HashSet<ObjectId>,
    depth: usize,
) -> Option<String> {
    if depth == 0 {
        return None;
    }
    match object {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).trim().to_string()),
        Object::Reference(id) => resolve_text(doc, *id, visited, depth),
        Object::Dictionary(dict) => dict
            .iter()
            .find_map(|(_, value)| object_text(doc, value, visited, depth - 1)),
        Object::Array(items) => items
            .iter()
            .find_map(|value| object_text(doc, value, visited, depth - 1)),
        Object::Stream(stream) => stream
            .dict
            .iter()
            .find_map(|(_, value)| object_text(doc, value, visited, depth - 1)),
        _ => None,
    }
}

/// Decodes a PDF text string, honoring the UTF-16BE byte order mark many
/// producers emit for non-ASCII values.
fn decode_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units).trim().to_string()
    } else {
        String::from_utf8_lossy(bytes).trim().to_string()
    }
}

/// Removes metadata-bearing entries from a dictionary object and drops the
/// orphaned XMP stream it referenced, if any.
fn strip_object_metadata(doc: &mut PdfDocument, id: ObjectId) {
    let removed = match doc.get_object_mut(id) {
        Ok(Object::Dictionary(dict)) => {
            let metadata_ref = dict.remove(b"Metadata");
            dict.remove(b"PieceInfo");
            metadata_ref
        }
        _ => None,
    };
    if let Some(Object::Reference(stream_id)) = removed {
        doc.objects.remove(&stream_id);
    }
}
