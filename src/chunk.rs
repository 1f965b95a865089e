//! SoundFont RIFF sub-chunk encoders.
//!
//! Every encoder borrows a [`SoundFont`](crate::SoundFont) and implements the common [`Chunk`]
//! contract: a chunk name, its exact byte size and a writer. Sizes are derived from the same
//! zone traversal the writers use, so the declared size always matches the written bytes.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;
use riff::{ChunkContents, ChunkId};

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Size of a RIFF chunk header: the chunk id and the 32-bit little endian data length.
pub const CHUNK_HEADER_SIZE: u64 = 8;

// -------------------------------------------------------------------------------------------------

/// A single RIFF sub-chunk of a SoundFont file.
pub trait Chunk {
    /// The chunk id.
    fn name(&self) -> FourCC;

    /// Unchecked length of the chunk data in bytes, excluding the chunk header.
    fn data_len(&self) -> u64;

    /// Appends the chunk data to the given buffer. Must append exactly [`Self::data_len`] bytes.
    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error>;

    /// The whole length of this chunk including the chunk header, in bytes.
    ///
    /// Fails with [`Error::ChunkTooLarge`] when the data does not fit into the 32-bit chunk
    /// length field.
    fn size(&self) -> Result<u32, Error> {
        let size = self.data_len() + CHUNK_HEADER_SIZE;
        u32::try_from(size).map_err(|_| Error::ChunkTooLarge {
            chunk: self.name(),
            size,
        })
    }

    /// Encodes the chunk data. Nothing is encoded when the chunk is too large.
    fn encode_data(&self) -> Result<Vec<u8>, Error> {
        let size = self.size()?;
        let mut data = Vec::with_capacity(size as usize - CHUNK_HEADER_SIZE as usize);
        self.write_data(&mut data)?;
        debug_assert_eq!(
            data.len() as u64,
            self.data_len(),
            "Chunk '{}' wrote an unexpected amount of data",
            self.name()
        );
        log::trace!("Encoded '{}' chunk with {} bytes", self.name(), data.len());
        Ok(data)
    }

    /// Writes the chunk header and data to the given output.
    ///
    /// The data is encoded before anything is written, so on errors the output is left untouched.
    fn write(&self, out: &mut dyn Write) -> Result<(), Error> {
        let data = self.encode_data()?;
        out.write_all(&self.name().0)?;
        out.write_u32::<LittleEndian>(data.len() as u32)?;
        out.write_all(&data)?;
        Ok(())
    }

    /// Encodes the chunk as riff data chunk, for assembling the file.
    fn to_riff(&self) -> Result<ChunkContents, Error> {
        let data = self.encode_data()?;
        Ok(ChunkContents::Data(
            ChunkId {
                value: self.name().0,
            },
            data,
        ))
    }
}

// -------------------------------------------------------------------------------------------------

mod traversal;
pub use traversal::ZoneOwner;

mod header;
pub use header::{HeaderChunk, InstrumentHeaderChunk, PresetHeaderChunk};

mod bag;
pub use bag::{BagChunk, InstrumentBagChunk, PresetBagChunk};

mod generator;
pub use generator::{GeneratorChunk, InstrumentGeneratorChunk, PresetGeneratorChunk};

mod modulator;
pub use modulator::{InstrumentModulatorChunk, ModulatorChunk, PresetModulatorChunk};

mod sample;
pub use sample::{SampleDataChunk, SampleHeaderChunk};

mod info;
pub use info::{TextChunk, VersionChunk};

// -------------------------------------------------------------------------------------------------
