//! Container-remux backend for video formats the tag tool cannot rewrite.
//!
//! Reads share the tag backend's contract (same external tag tool, same
//! line parsing). Scrubs hand the file to an external remuxer that drops
//! all metadata streams while copying audio and video verbatim; the staged
//! output keeps the source extension so the remuxer can infer the container
//! format.

use std::fs;
use std::path::PathBuf;

use crate::error::{ScrubError, ScrubResult};
use crate::scrub::backend::{Metadata, ScrubBackend};
use crate::scrub::tag::{parse_tag_lines, scrub_staging_dir, staged_file_name};
use crate::tools::{Remuxer, SystemExifTool, SystemFfmpeg, TagTool};

/// Backend reading tags via the tag tool and scrubbing via a remuxer.
pub struct RemuxBackend {
    path: PathBuf,
    tags: Box<dyn TagTool>,
    remuxer: Box<dyn Remuxer>,
}

impl RemuxBackend {
    /// Creates a backend using the system `exiftool` and `ffmpeg` binaries.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_tools(
            path,
            Box::new(SystemExifTool::default()),
            Box::new(SystemFfmpeg::default()),
        )
    }

    /// Creates a backend with injected tools.
    pub fn with_tools(
        path: impl Into<PathBuf>,
        tags: Box<dyn TagTool>,
        remuxer: Box<dyn Remuxer>,
    ) -> Self {
        Self {
            path: path.into(),
            tags,
            remuxer,
        }
    }
}

impl ScrubBackend for RemuxBackend {
    fn metadata(&self) -> ScrubResult<Metadata> {
        let output = self.tags.read_tags(&self.path)?;
        Ok(parse_tag_lines(&output))
    }

    fn scrub(&self) -> ScrubResult<Vec<u8>> {
        let staging = scrub_staging_dir(&self.path)?;
        let staged = staging.path().join(staged_file_name(&self.path));
        self.remuxer.remux(&self.path, &staged)?;
        fs::read(&staged).map_err(|source| ScrubError::Io {
            path: staged.clone(),
            source,
        })
    }

    fn supports_scrubbing(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "remux"
    }
}
