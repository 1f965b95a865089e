use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{
    error::Error,
    sample::Sample,
    soundfont::SoundFont,
    utils::{name_field, to_record_index},
};

use super::Chunk;

// -------------------------------------------------------------------------------------------------

/// Number of zero sample points which follow each sample in the "smpl" chunk.
const SAMPLE_PADDING: u64 = 46;

const HEADER_RECORD_SIZE: u64 = 46;

/// Size of a sample point in the "smpl" chunk.
const POINT_SIZE: u64 = 2;

// -------------------------------------------------------------------------------------------------

/// Sample point offsets of a sample within the "smpl" chunk: start and end of the sample data.
fn sample_offsets(file: &SoundFont) -> impl Iterator<Item = (&Sample, u64, u64)> {
    file.samples().iter().scan(0u64, |offset, sample| {
        let start = *offset;
        let end = start + sample.data().len() as u64;
        *offset = end + SAMPLE_PADDING;
        Some((sample, start, end))
    })
}

fn to_sample_offset(offset: u64, sample: &Sample) -> Result<u32, Error> {
    u32::try_from(offset).map_err(|_| {
        Error::ValueOutOfRange(format!(
            "Offset {offset} of sample '{}' exceeds the 32-bit sample offset range",
            sample.name()
        ))
    })
}

// -------------------------------------------------------------------------------------------------

/// The "shdr" chunk: one header record per sample with its absolute position in the "smpl"
/// chunk, closed by an "EOS" record.
pub struct SampleHeaderChunk<'a> {
    file: &'a SoundFont,
}

impl<'a> SampleHeaderChunk<'a> {
    pub fn new(file: &'a SoundFont) -> Self {
        Self { file }
    }

    fn write_record(
        &self,
        data: &mut Vec<u8>,
        sample: &Sample,
        start: u64,
        end: u64,
    ) -> Result<(), Error> {
        let link_index = match sample.link() {
            Some(link) => {
                let index = self.file.sample_index(link).ok_or_else(|| {
                    Error::InvalidReference(format!(
                        "Sample '{}' is linked to sample {:?}, which is not part of the written file",
                        sample.name(),
                        link
                    ))
                })?;
                to_record_index(index, "Sample")?
            }
            None => 0,
        };
        data.write_all(&name_field(sample.name()))?;
        for offset in [
            start,
            end,
            start + u64::from(sample.start_loop()),
            start + u64::from(sample.end_loop()),
        ] {
            data.write_u32::<LittleEndian>(to_sample_offset(offset, sample)?)?;
        }
        data.write_u32::<LittleEndian>(sample.sample_rate())?;
        data.write_u8(sample.original_key())?;
        data.write_i8(sample.correction())?;
        data.write_u16::<LittleEndian>(link_index)?;
        data.write_u16::<LittleEndian>(sample.sample_type().raw())?;
        Ok(())
    }
}

impl Chunk for SampleHeaderChunk<'_> {
    fn name(&self) -> FourCC {
        FourCC(*b"shdr")
    }

    fn data_len(&self) -> u64 {
        (self.file.samples().len() as u64 + 1) * HEADER_RECORD_SIZE
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        for (sample, start, end) in sample_offsets(self.file) {
            self.write_record(data, sample, start, end)?;
        }
        data.write_all(&name_field("EOS"))?;
        data.write_all(&[0; (HEADER_RECORD_SIZE - 20) as usize])?;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// The "smpl" chunk: 16-bit PCM data of all samples, each followed by [`SAMPLE_PADDING`] zero
/// sample points.
pub struct SampleDataChunk<'a> {
    file: &'a SoundFont,
}

impl<'a> SampleDataChunk<'a> {
    pub fn new(file: &'a SoundFont) -> Self {
        Self { file }
    }
}

impl Chunk for SampleDataChunk<'_> {
    fn name(&self) -> FourCC {
        FourCC(*b"smpl")
    }

    fn data_len(&self) -> u64 {
        let points = self
            .file
            .samples()
            .iter()
            .map(|sample| sample.data().len() as u64 + SAMPLE_PADDING)
            .sum::<u64>();
        points * POINT_SIZE
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        for sample in self.file.samples() {
            for point in sample.data() {
                data.write_i16::<LittleEndian>(*point)?;
            }
            data.write_all(&[0; (SAMPLE_PADDING * POINT_SIZE) as usize])?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
