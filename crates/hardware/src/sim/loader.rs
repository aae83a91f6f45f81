//! Program Image Loader.
//!
//! This module reads and writes the binary program format. It performs:
//! 1. **Parsing:** Splits an image into its header, text words, and data words.
//! 2. **Validation:** Rejects truncated images, trailing bytes, and a data end past the data segment.
//! 3. **Serialization:** Writes a [`Program`] back into the same layout.
//!
//! # Layout
//!
//! All fields are little-endian 32-bit values:
//!
//! ```text
//! [text_size][data_size][data_end]
//! [text_size instruction words]
//! [data_size signed data words]
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::constants::{HEADER_BYTES, WORD_BYTES};
use crate::common::{LoadError, Word};
use crate::isa::{Instruction, decode, encode};

/// A program ready to be installed into a machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instructions, addressed from 0.
    pub text: Vec<Instruction>,
    /// Initial data segment, addressed from 0. The stack lives in its tail.
    pub data: Vec<Word>,
    /// First address past the statically initialized data.
    pub data_end: u32,
}

impl Program {
    /// Creates a program from its parts.
    pub const fn new(text: Vec<Instruction>, data: Vec<Word>, data_end: u32) -> Self {
        Self {
            text,
            data,
            data_end,
        }
    }

    /// Parses a program image.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The complete image, header included.
    ///
    /// # Returns
    ///
    /// The decoded program, or a `LoadError` describing the first problem found.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let (header, rest) = split_section(bytes, HEADER_BYTES, "header")?;
        let mut fields = words(header);
        let text_size = fields.next().unwrap_or_default();
        let data_size = fields.next().unwrap_or_default();
        let data_end = fields.next().unwrap_or_default();

        if data_end > data_size {
            return Err(LoadError::DataEndOutOfRange {
                data_end,
                data_size,
            });
        }

        let (text_bytes, rest) = split_section(rest, section_bytes(text_size), "text")?;
        let (data_bytes, rest) = split_section(rest, section_bytes(data_size), "data")?;
        if !rest.is_empty() {
            return Err(LoadError::TrailingBytes(rest.len()));
        }

        let text = words(text_bytes).map(decode).collect();
        let data = words(data_bytes).map(|w| w as Word).collect();

        debug!(text_size, data_size, data_end, "parsed program image");
        Ok(Self::new(text, data, data_end))
    }

    /// Serializes the program into the image layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            HEADER_BYTES + (self.text.len() + self.data.len()) * WORD_BYTES,
        );
        for field in [self.text.len() as u32, self.data.len() as u32, self.data_end] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        for inst in &self.text {
            bytes.extend_from_slice(&encode(inst).to_le_bytes());
        }
        for word in &self.data {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

/// Reads a program image from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
pub fn read_program(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "read program file");
    Program::from_bytes(&bytes)
}

/// Writes a program image to disk, replacing any existing file.
pub fn write_program(path: impl AsRef<Path>, program: &Program) -> Result<(), LoadError> {
    let path = path.as_ref();
    fs::write(path, program.to_bytes()).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Number of bytes occupied by `count` words.
fn section_bytes(count: u32) -> usize {
    (count as usize).saturating_mul(WORD_BYTES)
}

/// Splits `len` bytes off the front of `bytes`.
fn split_section<'a>(
    bytes: &'a [u8],
    len: usize,
    section: &'static str,
) -> Result<(&'a [u8], &'a [u8]), LoadError> {
    bytes.split_at_checked(len).ok_or(LoadError::Truncated {
        section,
        expected: len,
        found: bytes.len(),
    })
}

/// Iterates over the little-endian words of a section whose length is a multiple of 4.
fn words(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bytes
        .chunks_exact(WORD_BYTES)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
}
