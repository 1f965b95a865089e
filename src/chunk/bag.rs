use std::marker::PhantomData;

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{
    error::Error, instrument::Instrument, preset::Preset, soundfont::SoundFont,
    utils::to_record_index,
};

use super::{
    traversal::{generator_count, modulator_count, zones, ZoneOwner},
    Chunk,
};

// -------------------------------------------------------------------------------------------------

/// A "pbag" or "ibag" chunk: one record per zone with the zone's first generator and modulator
/// record index, closed by a terminal record holding the total generator and modulator counts.
pub struct BagChunk<'a, O: ZoneOwner> {
    file: &'a SoundFont,
    owner: PhantomData<O>,
}

/// The "pbag" chunk.
pub type PresetBagChunk<'a> = BagChunk<'a, Preset>;

/// The "ibag" chunk.
pub type InstrumentBagChunk<'a> = BagChunk<'a, Instrument>;

impl<'a, O: ZoneOwner> BagChunk<'a, O> {
    const RECORD_SIZE: u64 = 4;

    pub fn new(file: &'a SoundFont) -> Self {
        Self {
            file,
            owner: PhantomData,
        }
    }

    fn write_record(data: &mut Vec<u8>, gen_index: usize, mod_index: usize) -> Result<(), Error> {
        data.write_u16::<LittleEndian>(to_record_index(gen_index, "Generator")?)?;
        data.write_u16::<LittleEndian>(to_record_index(mod_index, "Modulator")?)?;
        Ok(())
    }
}

impl<O: ZoneOwner> Chunk for BagChunk<'_, O> {
    fn name(&self) -> FourCC {
        O::BAG_CHUNK
    }

    fn data_len(&self) -> u64 {
        (zones::<O>(self.file).count() as u64 + 1) * Self::RECORD_SIZE
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        let (mut gen_index, mut mod_index) = (0, 0);
        for zone in zones::<O>(self.file) {
            Self::write_record(data, gen_index, mod_index)?;
            gen_index += generator_count(zone);
            mod_index += modulator_count(zone);
        }
        Self::write_record(data, gen_index, mod_index)
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use byteorder::{ByteOrder, LittleEndian};

    use super::*;
    use crate::{
        modulator::{GeneralController, Modulator, ModulatorItem, Transform},
        Generator, GeneratorItem, InstrumentZone, PresetZone, Sample,
    };

    fn records(chunk: &impl Chunk) -> Vec<(u16, u16)> {
        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(data.len(), chunk.size().unwrap() as usize);
        data[8..]
            .chunks_exact(4)
            .map(|record| {
                (
                    LittleEndian::read_u16(&record[0..2]),
                    LittleEndian::read_u16(&record[2..4]),
                )
            })
            .collect()
    }

    #[test]
    fn bag_indices() {
        let mut file = SoundFont::new();
        let sample = file.add_sample(Sample::with_data("Sine", vec![0; 16], 44100).unwrap());

        let mut instrument = Instrument::new("Sine").unwrap();
        let mut global = InstrumentZone::new();
        global.set_generator(GeneratorItem::new(Generator::Pan, 10i16));
        global.set_modulator(ModulatorItem::new(
            Modulator::general(GeneralController::NoteOnVelocity),
            Generator::InitialAttenuation,
            960,
            Modulator::default(),
            Transform::Linear,
        ));
        instrument.set_global_zone(global);
        let mut zone = InstrumentZone::with_sample(sample);
        zone.set_generator(GeneratorItem::new(Generator::FineTune, 1i16));
        instrument.add_zone(zone);
        instrument.add_zone(InstrumentZone::new());
        let instrument = file.add_instrument(instrument);

        let mut preset = Preset::new("Sine").unwrap();
        preset.add_zone(PresetZone::with_instrument(instrument));
        file.add_preset(preset);

        // global: 1 generator, 1 modulator; first zone: generator + link; second zone: empty
        assert_eq!(
            records(&InstrumentBagChunk::new(&file)),
            vec![(0, 0), (1, 1), (3, 1), (3, 1)]
        );
        assert_eq!(records(&PresetBagChunk::new(&file)), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn empty_file() {
        let file = SoundFont::new();
        let chunk = PresetBagChunk::new(&file);
        assert_eq!(chunk.name(), FourCC(*b"pbag"));
        assert_eq!(chunk.size().unwrap(), 8 + 4);
        assert_eq!(records(&chunk), vec![(0, 0)]);
    }
}
