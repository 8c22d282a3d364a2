//! Backend trait and supporting types.
//!
//! This module defines the core abstraction every format strategy
//! implements, giving heterogeneous backends one interface with consistent
//! semantics and a typed "unsupported" outcome for scrubbing.

use std::collections::BTreeMap;

use crate::error::ScrubResult;

/// Metadata extracted from a file: tag or property name mapped to its value.
///
/// Produced fresh on every read; duplicate keys resolve to the last write.
pub type Metadata = BTreeMap<String, String>;

/// Strategy for reading and removing embedded metadata from one file.
///
/// Implementations are stateless beyond their fixed file binding; both
/// operations may be called independently and repeatedly, each re-deriving
/// its result from the source file on disk.
pub trait ScrubBackend: Send + Sync {
    /// Reads all metadata the backend can see in the source file.
    ///
    /// An empty map is a valid result for a file carrying no metadata.
    fn metadata(&self) -> ScrubResult<Metadata>;

    /// Produces the full scrubbed file content in memory.
    ///
    /// Ownership of the bytes transfers to the caller, which is responsible
    /// for persisting them. Backends reporting `supports_scrubbing() ==
    /// false` must return [`ScrubError::ScrubUnsupported`] and never write
    /// output.
    ///
    /// [`ScrubError::ScrubUnsupported`]: crate::error::ScrubError::ScrubUnsupported
    fn scrub(&self) -> ScrubResult<Vec<u8>>;

    /// Returns whether this backend can rewrite its format, fixed per
    /// backend kind.
    fn supports_scrubbing(&self) -> bool;

    /// Returns a short human-readable name for this backend.
    fn name(&self) -> &'static str;
}
