//! Tag-based backend for images and some video containers.
//!
//! Delegates both reads and scrubs to an external tag tool. Reads parse the
//! tool's `Key: Value` stdout; scrubs stage the stripped copy in a per-call
//! unique temporary directory so concurrent scrubs never collide.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ScrubError, ScrubResult};
use crate::scrub::backend::{Metadata, ScrubBackend};
use crate::tools::{SystemExifTool, TagTool};

/// Backend reading and stripping metadata via an external tag tool.
pub struct TagBackend {
    path: PathBuf,
    tool: Box<dyn TagTool>,
}

impl TagBackend {
    /// Creates a backend using the system `exiftool` binary.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_tool(path, Box::new(SystemExifTool::default()))
    }

    /// Creates a backend with an injected tag tool.
    pub fn with_tool(path: impl Into<PathBuf>, tool: Box<dyn TagTool>) -> Self {
        Self {
            path: path.into(),
            tool,
        }
    }
}

impl ScrubBackend for TagBackend {
    fn metadata(&self) -> ScrubResult<Metadata> {
        let output = self.tool.read_tags(&self.path)?;
        Ok(parse_tag_lines(&output))
    }

    fn scrub(&self) -> ScrubResult<Vec<u8>> {
        let staging = scrub_staging_dir(&self.path)?;
        let staged = staging.path().join(staged_file_name(&self.path));
        self.tool.strip_tags(&self.path, &staged)?;
        fs::read(&staged).map_err(|source| ScrubError::Io {
            path: staged.clone(),
            source,
        })
    }

    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "tag"
    }
}

/// Parses `Key: Value` lines into a metadata map.
///
/// Each line splits on its first colon with both sides trimmed; lines
/// without a colon are silently dropped. Values keep any further colons.
pub(crate) fn parse_tag_lines(output: &str) -> Metadata {
    let mut tags = Metadata::new();
    for line in output.lines() {
        if let Some((key, value)) = line.split_once(':') {
            tags.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    tags
}

/// Creates a unique temporary directory for one scrub invocation.
///
/// The directory and its contents are removed when the guard drops, on
/// every exit path including tool failure.
pub(crate) fn scrub_staging_dir(source: &Path) -> ScrubResult<tempfile::TempDir> {
    tempfile::tempdir().map_err(|err| ScrubError::Io {
        path: source.to_path_buf(),
        source: err,
    })
}

/// Names the staged output after the source file, preserving its extension.
pub(crate) fn staged_file_name(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scrubbed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Tag tool double that replays fixed output and records strip calls.
    pub(crate) struct FakeTagTool {
        pub output: String,
        pub stripped_bytes: Vec<u8>,
        pub staged_paths: Mutex<Vec<PathBuf>>,
    }

    impl FakeTagTool {
        pub fn with_output(output: &str) -> Self {
            Self {
                output: output.to_string(),
                stripped_bytes: b"stripped".to_vec(),
                staged_paths: Mutex::new(Vec::new()),
            }
        }
    }

    impl TagTool for FakeTagTool {
        fn read_tags(&self, _path: &Path) -> ScrubResult<String> {
            Ok(self.output.clone())
        }

        fn strip_tags(&self, _path: &Path, staged: &Path) -> ScrubResult<()> {
            self.staged_paths
                .lock()
                .unwrap()
                .push(staged.to_path_buf());
            fs::write(staged, &self.stripped_bytes).map_err(|source| ScrubError::Io {
                path: staged.to_path_buf(),
                source,
            })
        }
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let tags = parse_tag_lines("Key1: Val1\nKey2: Val2\n");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["Key1"], "Val1");
        assert_eq!(tags["Key2"], "Val2");
    }

    #[test]
    fn test_parse_keeps_colons_in_value() {
        let tags = parse_tag_lines("Key3: a:b:c\n");
        assert_eq!(tags["Key3"], "a:b:c");
    }

    #[test]
    fn test_parse_drops_lines_without_colon() {
        let tags = parse_tag_lines("no colon here\nKey: Value\n");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags["Key"], "Value");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let tags = parse_tag_lines("  Image Width   :   1024  \n");
        assert_eq!(tags["Image Width"], "1024");
    }

    #[test]
    fn test_empty_output_yields_empty_map() {
        assert!(parse_tag_lines("").is_empty());
    }

    #[test]
    fn test_metadata_via_injected_tool() {
        let backend = TagBackend::with_tool(
            "photo.jpg",
            Box::new(FakeTagTool::with_output("Key1: Val1\nKey2: Val2\n")),
        );
        let tags = backend.metadata().unwrap();
        assert_eq!(tags["Key1"], "Val1");
        assert_eq!(tags["Key2"], "Val2");
    }

    #[test]
    fn test_scrub_reads_staged_bytes() {
        let backend = TagBackend::with_tool("photo.jpg", Box::new(FakeTagTool::with_output("")));
        let bytes = backend.scrub().unwrap();
        assert_eq!(bytes, b"stripped");
        assert!(backend.supports_scrubbing());
    }

    impl TagTool for std::sync::Arc<FakeTagTool> {
        fn read_tags(&self, path: &Path) -> ScrubResult<String> {
            self.as_ref().read_tags(path)
        }

        fn strip_tags(&self, path: &Path, staged: &Path) -> ScrubResult<()> {
            self.as_ref().strip_tags(path, staged)
        }
    }

    #[test]
    fn test_scrub_uses_unique_staged_paths() {
        let tool = std::sync::Arc::new(FakeTagTool::with_output(""));
        let backend = TagBackend::with_tool("photo.jpg", Box::new(tool.clone()));
        backend.scrub().unwrap();
        backend.scrub().unwrap();

        let staged = tool.staged_paths.lock().unwrap();
        assert_eq!(staged.len(), 2);
        assert_ne!(staged[0], staged[1]);
    }

    #[test]
    fn test_staged_name_preserves_extension() {
        assert_eq!(staged_file_name(Path::new("/data/clip.mov")), "clip.mov");
    }
}
