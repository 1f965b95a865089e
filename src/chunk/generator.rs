use std::{io::Write, marker::PhantomData};

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{
    error::Error,
    instrument::Instrument,
    preset::Preset,
    soundfont::SoundFont,
    utils::to_record_index,
    zone::{GeneratorRecord, ZoneLink},
};

use super::{
    traversal::{generator_count, zones, ZoneOwner},
    Chunk,
};

// -------------------------------------------------------------------------------------------------

const RECORD_SIZE: usize = 4;

// -------------------------------------------------------------------------------------------------

/// A "pgen" or "igen" chunk: all generator records of all zones, closed by an all zero record.
///
/// A zone's link is written as its last record, holding the index of the linked instrument or
/// sample in the file.
pub struct GeneratorChunk<'a, O: ZoneOwner> {
    file: &'a SoundFont,
    owner: PhantomData<O>,
}

/// The "pgen" chunk.
pub type PresetGeneratorChunk<'a> = GeneratorChunk<'a, Preset>;

/// The "igen" chunk.
pub type InstrumentGeneratorChunk<'a> = GeneratorChunk<'a, Instrument>;

impl<'a, O: ZoneOwner> GeneratorChunk<'a, O> {
    pub fn new(file: &'a SoundFont) -> Self {
        Self {
            file,
            owner: PhantomData,
        }
    }

    fn write_record(
        &self,
        data: &mut Vec<u8>,
        record: GeneratorRecord<O::Link>,
    ) -> Result<(), Error> {
        match record {
            GeneratorRecord::Item(item) => {
                data.write_u16::<LittleEndian>(item.op().raw())?;
                data.write_all(&item.amount().to_le_bytes())?;
            }
            GeneratorRecord::Link(link) => {
                let index = link.resolve(self.file).ok_or_else(|| {
                    Error::InvalidReference(format!(
                        "{} {:?} is not part of the written file",
                        O::Link::ENTITY_NAME,
                        link
                    ))
                })?;
                data.write_u16::<LittleEndian>(O::Link::GENERATOR.raw())?;
                data.write_u16::<LittleEndian>(to_record_index(index, O::Link::ENTITY_NAME)?)?;
            }
        }
        Ok(())
    }
}

impl<O: ZoneOwner> Chunk for GeneratorChunk<'_, O> {
    fn name(&self) -> FourCC {
        O::GENERATOR_CHUNK
    }

    fn data_len(&self) -> u64 {
        let records = zones::<O>(self.file).map(generator_count).sum::<usize>();
        (records as u64 + 1) * RECORD_SIZE as u64
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        for zone in zones::<O>(self.file) {
            for record in zone.generator_records() {
                self.write_record(data, record)?;
            }
        }
        data.write_all(&[0; RECORD_SIZE])?;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
