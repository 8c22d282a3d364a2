//! Ports for the external tools the tag and remux backends drive.
//!
//! The core logic never shells out directly; it goes through the [`TagTool`]
//! and [`Remuxer`] traits so tests can substitute in-memory fakes and
//! correctness does not depend on the binaries being installed.

use std::path::Path;
use std::process::Command;

use crate::error::{ScrubError, ScrubResult};

/// A command-line metadata tag reader/writer (exiftool-compatible).
pub trait TagTool: Send + Sync {
    /// Reads all tags from `path`, returning the tool's raw stdout.
    ///
    /// The output contract is one `Key: Value` pair per line.
    fn read_tags(&self, path: &Path) -> ScrubResult<String>;

    /// Writes a copy of `path` with every tag stripped to `staged`.
    fn strip_tags(&self, path: &Path, staged: &Path) -> ScrubResult<()>;
}

/// A media remuxing tool (ffmpeg-compatible) that can rewrite a container
/// while copying its audio and video streams verbatim.
pub trait Remuxer: Send + Sync {
    /// Rewrites the container at `path` into `staged`, dropping all metadata
    /// streams without re-encoding.
    ///
    /// `staged` must carry the source file's extension; the tool infers the
    /// container format from it.
    fn remux(&self, path: &Path, staged: &Path) -> ScrubResult<()>;
}

/// [`TagTool`] implementation that spawns the `exiftool` binary.
#[derive(Debug, Clone)]
pub struct SystemExifTool {
    program: String,
}

impl SystemExifTool {
    /// Creates a tag tool backed by the given program name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemExifTool {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl TagTool for SystemExifTool {
    fn read_tags(&self, path: &Path) -> ScrubResult<String> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|source| spawn_failure(&self.program, source))?;
        if !output.status.success() {
            return Err(exit_failure(&self.program, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn strip_tags(&self, path: &Path, staged: &Path) -> ScrubResult<()> {
        let output = Command::new(&self.program)
            .arg("-all=")
            .arg("-o")
            .arg(staged)
            .arg(path)
            .output()
            .map_err(|source| spawn_failure(&self.program, source))?;
        if !output.status.success() {
            return Err(exit_failure(&self.program, &output));
        }
        Ok(())
    }
}

/// [`Remuxer`] implementation that spawns the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct SystemFfmpeg {
    program: String,
}

impl SystemFfmpeg {
    /// Creates a remuxer backed by the given program name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemFfmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Remuxer for SystemFfmpeg {
    fn remux(&self, path: &Path, staged: &Path) -> ScrubResult<()> {
        let output = Command::new(&self.program)
            .arg("-i")
            .arg(path)
            .arg("-map_metadata")
            .arg("-1")
            .arg("-c:v")
            .arg("copy")
            .arg("-c:a")
            .arg("copy")
            .arg(staged)
            .output()
            .map_err(|source| spawn_failure(&self.program, source))?;
        if !output.status.success() {
            return Err(exit_failure(&self.program, &output));
        }
        Ok(())
    }
}

fn spawn_failure(tool: &str, source: std::io::Error) -> ScrubError {
    ScrubError::ToolFailure {
        tool: tool.to_string(),
        message: "failed to spawn process".to_string(),
        source: Some(source),
    }
}

fn exit_failure(tool: &str, output: &std::process::Output) -> ScrubError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.lines().last().unwrap_or("").trim();
    let message = if detail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {}", output.status, detail)
    };
    ScrubError::ToolFailure {
        tool: tool.to_string(),
        message,
        source: None,
    }
}
