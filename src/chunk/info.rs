use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{error::Error, soundfont::Version};

use super::Chunk;

// -------------------------------------------------------------------------------------------------

/// A version INFO sub-chunk ("ifil" or "iver"): major and minor version as two 16-bit words.
pub struct VersionChunk {
    name: FourCC,
    version: Version,
}

impl VersionChunk {
    pub fn new(name: FourCC, version: Version) -> Self {
        Self { name, version }
    }
}

impl Chunk for VersionChunk {
    fn name(&self) -> FourCC {
        self.name
    }

    fn data_len(&self) -> u64 {
        4
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        data.write_u16::<LittleEndian>(self.version.major)?;
        data.write_u16::<LittleEndian>(self.version.minor)?;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// A text INFO sub-chunk: the string, NUL terminated and padded with an extra NUL to an even
/// length.
pub struct TextChunk<'a> {
    name: FourCC,
    text: &'a str,
}

impl<'a> TextChunk<'a> {
    pub fn new(name: FourCC, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Text length with its terminator, rounded up to an even length.
    fn padded_len(&self) -> usize {
        (self.text.len() + 2) & !1
    }
}

impl Chunk for TextChunk<'_> {
    fn name(&self) -> FourCC {
        self.name
    }

    fn data_len(&self) -> u64 {
        self.padded_len() as u64
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        data.write_all(self.text.as_bytes())?;
        data.resize(data.len() + self.padded_len() - self.text.len(), 0);
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
