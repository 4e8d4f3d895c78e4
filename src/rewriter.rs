//! Orientation-tag rewriting.
//!
//! After the pipeline bakes an orientation correction into the pixels, the
//! tag embedded in the re-encoded bytes is stale and must be reset to
//! 1/normal. The pipeline never assumes how that happens: it talks to a
//! [`MetadataRewriter`], and the production implementation shells out to
//! `exiftool`, feeding the bytes on stdin and reading the corrected stream
//! from stdout.
//!
//! A rewrite failure is recoverable at the call site: the pipeline keeps the
//! already-rotated pixels and logs the stale-tag condition.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("failed to run metadata tool: {0}")]
    Io(#[from] std::io::Error),
    #[error("metadata tool exited with {0}")]
    NonZeroExit(ExitStatus),
}

/// Collaborator that rewrites the orientation tag of encoded image bytes
/// to 1/normal, returning the corrected bytes.
pub trait MetadataRewriter: Sync {
    fn rewrite(&self, image: &[u8]) -> Result<Vec<u8>, RewriteError>;
}

/// Production rewriter: `exiftool - -Orientation#=1 -o -`.
///
/// Blocks the calling thread until the child exits; no timeout is enforced,
/// so callers needing a deadline must impose one externally.
pub struct ExiftoolRewriter {
    program: String,
}

impl ExiftoolRewriter {
    pub fn new() -> Self {
        Self::with_program("exiftool")
    }

    /// Use a different executable (e.g. a pinned path instead of relying on
    /// `PATH` lookup).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ExiftoolRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRewriter for ExiftoolRewriter {
    fn rewrite(&self, image: &[u8]) -> Result<Vec<u8>, RewriteError> {
        let mut child = Command::new(&self.program)
            .args(["-", "-Orientation#=1", "-o", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // Feed stdin from a separate thread: writing the whole image while
        // the child is filling its stdout pipe would deadlock once either
        // pipe buffer runs full.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("child stdin unavailable"))?;
        let input = image.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output()?;
        let write_result = writer
            .join()
            .map_err(|_| std::io::Error::other("stdin writer panicked"))?;

        if !output.status.success() {
            return Err(RewriteError::NonZeroExit(output.status));
        }
        write_result?;
        Ok(output.stdout)
    }
}
