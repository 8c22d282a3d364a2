//! Metadata extraction and scrubbing for documents and media files.
//!
//! This library reads embedded metadata from common document and media
//! formats and produces scrubbed copies with that metadata removed,
//! selecting a strategy per file extension and degrading gracefully when a
//! format cannot be rewritten.
//!
//! # Features
//!
//! - **Format dispatch**: one static registry maps extensions to backends
//! - **Tag backend**: images and some video via an external tag tool
//! - **Remux backend**: video containers rewritten without re-encoding
//! - **PDF backend**: info-dictionary traversal and full document rewrite
//! - **Office backend**: core/extended package properties (read-only)
//!
//! # Architecture
//!
//! - [`dispatch`]: extension registry and backend construction
//! - [`scrub`]: the backend trait, the four strategies, and the
//!   [`Document`] service wrapping them
//! - [`tools`]: ports for the external tag and remux tools, so core logic
//!   stays testable without the binaries installed
//! - [`error`]: typed errors, including the first-class "scrubbing
//!   unsupported" outcome
//!
//! # Quick Start
//!
//! ```no_run
//! use metascrub::dispatch;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = dispatch(Path::new("photo.jpg")).expect("supported format");
//!
//! for (key, value) in document.metadata()? {
//!     println!("{key}: {value}");
//! }
//!
//! if document.supports_scrubbing() {
//!     let scrubbed = document.scrub()?;
//!     std::fs::write("scrubbed_photo.jpg", scrubbed)?;
//! }
//! # Ok(())
//! # }
//! ```

// Public API
pub mod dispatch;
pub mod error;
pub mod scrub;
pub mod tools;

// Re-exports for convenient access
pub use dispatch::{backend_kind_for, dispatch, BackendKind};
pub use error::{ScrubError, ScrubResult};
pub use scrub::{
    Document, Metadata, OfficeBackend, PdfBackend, RemuxBackend, ScrubBackend, TagBackend,
};
pub use tools::{Remuxer, SystemExifTool, SystemFfmpeg, TagTool};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dispatch_round_trip() {
        let document = dispatch(Path::new("slides.pptx")).expect("pptx is registered");
        assert_eq!(document.kind(), BackendKind::XmlProperty);
        assert!(!document.supports_scrubbing());
    }
}
