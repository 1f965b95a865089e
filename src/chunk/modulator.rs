use std::{io::Write, marker::PhantomData};

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{
    error::Error, instrument::Instrument, modulator::ModulatorItem, preset::Preset,
    soundfont::SoundFont,
};

use super::{
    traversal::{modulator_count, zones, ZoneOwner},
    Chunk,
};

// -------------------------------------------------------------------------------------------------

const RECORD_SIZE: usize = 10;

// -------------------------------------------------------------------------------------------------

/// A "pmod" or "imod" chunk: all modulator records of all zones, closed by an all zero record.
pub struct ModulatorChunk<'a, O: ZoneOwner> {
    file: &'a SoundFont,
    owner: PhantomData<O>,
}

/// The "pmod" chunk.
pub type PresetModulatorChunk<'a> = ModulatorChunk<'a, Preset>;

/// The "imod" chunk.
pub type InstrumentModulatorChunk<'a> = ModulatorChunk<'a, Instrument>;

impl<'a, O: ZoneOwner> ModulatorChunk<'a, O> {
    pub fn new(file: &'a SoundFont) -> Self {
        Self {
            file,
            owner: PhantomData,
        }
    }
}

/// source, destination, amount, amount source, transform
fn write_record(data: &mut Vec<u8>, modulator: &ModulatorItem) -> Result<(), Error> {
    data.write_u16::<LittleEndian>(modulator.source_op().raw())?;
    data.write_u16::<LittleEndian>(modulator.destination_op().raw())?;
    data.write_i16::<LittleEndian>(modulator.amount())?;
    data.write_u16::<LittleEndian>(modulator.amount_source_op().raw())?;
    data.write_u16::<LittleEndian>(modulator.transform_op().raw())?;
    Ok(())
}

impl<O: ZoneOwner> Chunk for ModulatorChunk<'_, O> {
    fn name(&self) -> FourCC {
        O::MODULATOR_CHUNK
    }

    fn data_len(&self) -> u64 {
        let records = zones::<O>(self.file).map(modulator_count).sum::<usize>();
        (records as u64 + 1) * RECORD_SIZE as u64
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        for modulator in zones::<O>(self.file).flat_map(|zone| zone.modulators()) {
            write_record(data, modulator)?;
        }
        data.write_all(&[0; RECORD_SIZE])?;
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use byteorder::{ByteOrder, LittleEndian};

    use super::*;
    use crate::{
        modulator::{
            ControllerDirection, ControllerPolarity, ControllerType, GeneralController, Modulator,
            ModulatorController, Transform,
        },
        Generator, InstrumentZone, PresetZone,
    };

    #[test]
    fn modulator_records() {
        let mut file = SoundFont::new();
        let mut instrument = Instrument::new("Lead").unwrap();
        let mut global = InstrumentZone::new();
        global.set_modulator(ModulatorItem::new(
            Modulator::general(GeneralController::NoteOnVelocity),
            Generator::InitialAttenuation,
            960,
            Modulator::default(),
            Transform::Linear,
        ));
        instrument.set_global_zone(global);
        let mut zone = InstrumentZone::new();
        zone.set_modulator(ModulatorItem::new(
            Modulator::new(
                ModulatorController::Midi(1),
                ControllerDirection::MinToMax,
                ControllerPolarity::Bipolar,
                ControllerType::Linear,
            )
            .unwrap(),
            Generator::VibLfoToPitch,
            -50,
            Modulator::default(),
            Transform::AbsoluteValue,
        ));
        instrument.add_zone(zone);
        file.add_instrument(instrument);

        let chunk = InstrumentModulatorChunk::new(&file);
        assert_eq!(chunk.name(), FourCC(*b"imod"));
        assert_eq!(chunk.size().unwrap(), 8 + 3 * 10);

        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(data.len(), 8 + 3 * 10);
        let words = data[8..]
            .chunks_exact(2)
            .map(LittleEndian::read_u16)
            .collect::<Vec<_>>();
        assert_eq!(
            words,
            vec![
                0x0002, 48, 960, 0, 0, //
                0x0281, 6, (-50i16) as u16, 0, 2, //
                0, 0, 0, 0, 0
            ]
        );
    }

    #[test]
    fn empty_zones() {
        let mut file = SoundFont::new();
        let mut preset = Preset::new("Empty").unwrap();
        preset.add_zone(PresetZone::new());
        file.add_preset(preset);

        let chunk = PresetModulatorChunk::new(&file);
        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(data.len(), chunk.size().unwrap() as usize);
        assert_eq!(&data[..8], b"pmod\x0a\0\0\0");
        assert!(data[8..].iter().all(|b| *b == 0));
    }
}
