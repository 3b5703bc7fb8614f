use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

/// Largest passage accepted from a file or stdin (64 KiB).
///
/// Anything near this size is far beyond what a selection may hold; the cap
/// only keeps a mistaken path from pulling a large file into memory.
pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// Reads a passage the reader wants to ask about.
pub struct InputReader;

impl InputReader {
    /// Reads from `path`, or from stdin when `path` is `-`.
    pub fn read(path: &str) -> Result<String> {
        if path == "-" {
            Self::read_stdin()
        } else {
            Self::read_file(path)
        }
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Passage size ({:.1} KiB) exceeds maximum allowed size (64 KiB).\n\n\
                 Select a shorter passage.",
                size as f64 / 1024.0
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(
                "Passage exceeds maximum allowed size (64 KiB).\n\n\
                 Select a shorter passage."
            );
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
