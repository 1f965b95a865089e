use std::marker::PhantomData;

use four_cc::FourCC;

use crate::{
    error::Error, instrument::Instrument, preset::Preset, soundfont::SoundFont,
    utils::to_record_index,
};

use super::{traversal::ZoneOwner, Chunk};

// -------------------------------------------------------------------------------------------------

/// A "phdr" or "inst" chunk: one header record per preset or instrument, pointing at the
/// owner's first bag, closed by a terminal record which points past the last bag.
pub struct HeaderChunk<'a, O: ZoneOwner> {
    file: &'a SoundFont,
    owner: PhantomData<O>,
}

/// The "phdr" chunk.
pub type PresetHeaderChunk<'a> = HeaderChunk<'a, Preset>;

/// The "inst" chunk.
pub type InstrumentHeaderChunk<'a> = HeaderChunk<'a, Instrument>;

impl<'a, O: ZoneOwner> HeaderChunk<'a, O> {
    pub fn new(file: &'a SoundFont) -> Self {
        Self {
            file,
            owner: PhantomData,
        }
    }

    /// Number of header records, including the terminal record.
    fn record_count(&self) -> u64 {
        O::owners(self.file).len() as u64 + 1
    }
}

impl<O: ZoneOwner> Chunk for HeaderChunk<'_, O> {
    fn name(&self) -> FourCC {
        O::HEADER_CHUNK
    }

    fn data_len(&self) -> u64 {
        self.record_count() * O::HEADER_RECORD_SIZE
    }

    fn write_data(&self, data: &mut Vec<u8>) -> Result<(), Error> {
        let mut bag_index = 0;
        for owner in O::owners(self.file) {
            owner.write_header(data, to_record_index(bag_index, "Bag")?)?;
            bag_index += owner.zones_in_order().count();
        }
        O::write_header_terminator(data, to_record_index(bag_index, "Bag")?)
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use byteorder::{ByteOrder, LittleEndian};

    use super::*;
    use crate::{InstrumentZone, PresetZone};

    #[test]
    fn preset_headers() {
        let mut file = SoundFont::new();
        let instrument = file.add_instrument(Instrument::new("Piano").unwrap());

        let mut piano = Preset::with_numbers("Piano", 1, 0).unwrap();
        piano.set_global_zone(PresetZone::new());
        piano.add_zone(PresetZone::with_instrument(instrument));
        piano.set_library(7);
        file.add_preset(piano);
        let mut drums = Preset::with_numbers("Drums", 0, Preset::PERCUSSION_BANK).unwrap();
        drums.add_zone(PresetZone::with_instrument(instrument));
        file.add_preset(drums);

        let chunk = PresetHeaderChunk::new(&file);
        assert_eq!(chunk.name(), FourCC(*b"phdr"));
        assert_eq!(chunk.size().unwrap(), 8 + 3 * 38);

        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(data.len(), chunk.size().unwrap() as usize);
        assert_eq!(&data[0..4], b"phdr");
        assert_eq!(LittleEndian::read_u32(&data[4..8]), 3 * 38);

        let records = data[8..].chunks_exact(38).collect::<Vec<_>>();
        assert_eq!(&records[0][..6], b"Piano\0");
        assert_eq!(LittleEndian::read_u16(&records[0][20..22]), 1);
        assert_eq!(LittleEndian::read_u16(&records[0][22..24]), 0);
        assert_eq!(LittleEndian::read_u16(&records[0][24..26]), 0);
        assert_eq!(LittleEndian::read_u32(&records[0][26..30]), 7);

        assert_eq!(&records[1][..6], b"Drums\0");
        assert_eq!(LittleEndian::read_u16(&records[1][22..24]), 128);
        // piano has a global and a regular zone
        assert_eq!(LittleEndian::read_u16(&records[1][24..26]), 2);

        assert_eq!(&records[2][..4], b"EOP\0");
        assert_eq!(LittleEndian::read_u16(&records[2][24..26]), 3);
        assert!(records[2][26..].iter().all(|b| *b == 0));
    }

    #[test]
    fn instrument_headers() {
        let mut file = SoundFont::new();
        let mut instrument = Instrument::new("Bass").unwrap();
        instrument.add_zone(InstrumentZone::new());
        instrument.add_zone(InstrumentZone::new());
        file.add_instrument(instrument);

        let chunk = InstrumentHeaderChunk::new(&file);
        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(&data[0..4], b"inst");
        assert_eq!(data.len(), 8 + 2 * 22);
        assert_eq!(&data[8..13], b"Bass\0");
        assert_eq!(LittleEndian::read_u16(&data[28..30]), 0);
        assert_eq!(&data[30..34], b"EOI\0");
        assert_eq!(LittleEndian::read_u16(&data[50..52]), 2);
    }

    #[test]
    fn empty_file() {
        let file = SoundFont::new();
        let chunk = InstrumentHeaderChunk::new(&file);
        assert_eq!(chunk.size().unwrap(), 8 + 22);
        let mut data = Vec::new();
        chunk.write(&mut data).unwrap();
        assert_eq!(data.len(), 8 + 22);
    }
}
