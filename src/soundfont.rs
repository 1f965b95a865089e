//! The SoundFont file container, which owns all presets, instruments and samples and writes them
//! as a SoundFont 2.04 RIFF file.

use std::{
    io::{Cursor, Seek, Write},
    ops::RangeBounds,
    path::Path,
};

use four_cc::FourCC;
use riff::{ChunkContents, ChunkId};

use crate::{
    attach::AttachedMut,
    chunk::{
        Chunk, InstrumentBagChunk, InstrumentGeneratorChunk, InstrumentHeaderChunk,
        InstrumentModulatorChunk, PresetBagChunk, PresetGeneratorChunk, PresetHeaderChunk,
        PresetModulatorChunk, SampleDataChunk, SampleHeaderChunk, CHUNK_HEADER_SIZE,
    },
    error::Error,
    instrument::{Instrument, InstrumentId},
    preset::{Preset, PresetId},
    sample::{Sample, SampleId},
    utils::unique_usize_id,
};

mod info;
pub use info::{Info, Version, MAX_COMMENT_LENGTH, MAX_INFO_TEXT_LENGTH};

// -------------------------------------------------------------------------------------------------

/// A unique id of a [`SoundFont`]. Attached presets, instruments, samples and zones refer to
/// their file by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SoundFontId(usize);

impl SoundFontId {
    fn new() -> Self {
        Self(unique_usize_id())
    }
}

// -------------------------------------------------------------------------------------------------

const RIFF_ID: ChunkId = ChunkId { value: *b"RIFF" };
const LIST_ID: ChunkId = ChunkId { value: *b"LIST" };
const SFBK_ID: ChunkId = ChunkId { value: *b"sfbk" };

/// Size of the form or list type which precedes the sub-chunks of a RIFF or LIST chunk.
const LIST_TYPE_SIZE: u64 = 4;

/// Encodes the given sub-chunks into a LIST chunk. Returns the list and its whole size.
fn encode_list(list_type: [u8; 4], chunks: &[&dyn Chunk]) -> Result<(ChunkContents, u64), Error> {
    let mut size = CHUNK_HEADER_SIZE + LIST_TYPE_SIZE;
    for chunk in chunks {
        size += u64::from(chunk.size()?);
    }
    if size > u64::from(u32::MAX) {
        return Err(Error::ChunkTooLarge {
            chunk: FourCC(list_type),
            size,
        });
    }
    let contents = chunks
        .iter()
        .map(|chunk| chunk.to_riff())
        .collect::<Result<Vec<_>, _>>()?;
    Ok((
        ChunkContents::Children(LIST_ID, ChunkId { value: list_type }, contents),
        size,
    ))
}

/// Whole size of the RIFF form which wraps lists of the given sizes.
fn riff_size(list_sizes: impl IntoIterator<Item = u64>) -> Result<u64, Error> {
    let size = CHUNK_HEADER_SIZE + LIST_TYPE_SIZE + list_sizes.into_iter().sum::<u64>();
    if size > u64::from(u32::MAX) {
        return Err(Error::ChunkTooLarge {
            chunk: FourCC(RIFF_ID.value),
            size,
        });
    }
    Ok(size)
}

// -------------------------------------------------------------------------------------------------

/// A SoundFont bank: the owner of all presets, instruments and samples which get written into a
/// single SoundFont file.
///
/// Entities are owned by value. Adding an entity attaches it and all of its zones to this file,
/// removing it detaches it again, so an entity is part of at most one file at a time. Zones refer
/// to instruments and samples by id; such references are resolved when writing the file and must
/// point to entities of the same file.
#[derive(Debug)]
pub struct SoundFont {
    id: SoundFontId,
    info: Info,
    presets: Vec<Preset>,
    instruments: Vec<Instrument>,
    samples: Vec<Sample>,
}

impl SoundFont {
    /// Creates a new empty SoundFont with default [`Info`].
    pub fn new() -> Self {
        Self::with_info(Info::new())
    }

    pub fn with_info(info: Info) -> Self {
        Self {
            id: SoundFontId::new(),
            info,
            presets: Vec::new(),
            instruments: Vec::new(),
            samples: Vec::new(),
        }
    }

    pub fn id(&self) -> SoundFontId {
        self.id
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut Info {
        &mut self.info
    }

    // Presets

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn preset(&self, id: PresetId) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.id() == id)
    }

    /// Position of the preset with the given id in this file.
    pub fn preset_index(&self, id: PresetId) -> Option<usize> {
        self.presets.iter().position(|preset| preset.id() == id)
    }

    /// Mutable access to the preset with the given id.
    pub fn preset_mut(&mut self, id: PresetId) -> Option<AttachedMut<'_, Preset>> {
        let parent = Some(self.id);
        self.presets
            .iter_mut()
            .find(|preset| preset.id() == id)
            .map(|preset| AttachedMut::new(preset, parent, Preset::set_parent_file))
    }

    /// Attaches and appends the given preset. Returns the preset's id.
    pub fn add_preset(&mut self, mut preset: Preset) -> PresetId {
        preset.set_parent_file(Some(self.id));
        let id = preset.id();
        self.presets.push(preset);
        id
    }

    /// Detaches and removes the preset at the given position.
    pub fn remove_preset(&mut self, position: usize) -> Option<Preset> {
        detach_at(&mut self.presets, position, Preset::set_parent_file)
    }

    pub fn remove_presets<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<Preset> {
        detach_range(&mut self.presets, range, Preset::set_parent_file)
    }

    /// Removes all presets matching the predicate. Returns the number of removed presets.
    pub fn remove_preset_if<P: FnMut(&Preset) -> bool>(&mut self, predicate: P) -> usize {
        remove_if(&mut self.presets, predicate)
    }

    pub fn clear_presets(&mut self) {
        self.presets.clear();
    }

    // Instruments

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|instrument| instrument.id() == id)
    }

    /// Position of the instrument with the given id in this file. Preset zones refer to
    /// instruments by this position in the written file.
    pub fn instrument_index(&self, id: InstrumentId) -> Option<usize> {
        self.instruments
            .iter()
            .position(|instrument| instrument.id() == id)
    }

    /// Mutable access to the instrument with the given id.
    pub fn instrument_mut(&mut self, id: InstrumentId) -> Option<AttachedMut<'_, Instrument>> {
        let parent = Some(self.id);
        self.instruments
            .iter_mut()
            .find(|instrument| instrument.id() == id)
            .map(|instrument| AttachedMut::new(instrument, parent, Instrument::set_parent_file))
    }

    /// Attaches and appends the given instrument. Returns the instrument's id.
    pub fn add_instrument(&mut self, mut instrument: Instrument) -> InstrumentId {
        instrument.set_parent_file(Some(self.id));
        let id = instrument.id();
        self.instruments.push(instrument);
        id
    }

    /// Detaches and removes the instrument at the given position.
    ///
    /// Preset zones which still refer to the removed instrument fail to encode until they are
    /// relinked.
    pub fn remove_instrument(&mut self, position: usize) -> Option<Instrument> {
        detach_at(&mut self.instruments, position, Instrument::set_parent_file)
    }

    pub fn remove_instruments<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<Instrument> {
        detach_range(&mut self.instruments, range, Instrument::set_parent_file)
    }

    pub fn remove_instrument_if<P: FnMut(&Instrument) -> bool>(&mut self, predicate: P) -> usize {
        remove_if(&mut self.instruments, predicate)
    }

    pub fn clear_instruments(&mut self) {
        self.instruments.clear();
    }

    // Samples

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.id() == id)
    }

    /// Position of the sample with the given id in this file. Instrument zones and linked
    /// samples refer to samples by this position in the written file.
    pub fn sample_index(&self, id: SampleId) -> Option<usize> {
        self.samples.iter().position(|sample| sample.id() == id)
    }

    /// Mutable access to the sample with the given id.
    pub fn sample_mut(&mut self, id: SampleId) -> Option<AttachedMut<'_, Sample>> {
        let parent = Some(self.id);
        self.samples
            .iter_mut()
            .find(|sample| sample.id() == id)
            .map(|sample| AttachedMut::new(sample, parent, Sample::set_parent_file))
    }

    /// Attaches and appends the given sample. Returns the sample's id.
    pub fn add_sample(&mut self, mut sample: Sample) -> SampleId {
        sample.set_parent_file(Some(self.id));
        let id = sample.id();
        self.samples.push(sample);
        id
    }

    /// Detaches and removes the sample at the given position.
    pub fn remove_sample(&mut self, position: usize) -> Option<Sample> {
        detach_at(&mut self.samples, position, Sample::set_parent_file)
    }

    pub fn remove_samples<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<Sample> {
        detach_range(&mut self.samples, range, Sample::set_parent_file)
    }

    pub fn remove_sample_if<P: FnMut(&Sample) -> bool>(&mut self, predicate: P) -> usize {
        remove_if(&mut self.samples, predicate)
    }

    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    // Writing

    /// Writes the whole SoundFont as RIFF "sfbk" file.
    ///
    /// All chunks are encoded and size checked before anything is written, so encoding errors
    /// leave the writer untouched. Only errors of the writer itself may leave a partially
    /// written file behind.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Error> {
        let info_chunks = self.info.chunks();
        let info_chunks = info_chunks
            .iter()
            .map(|chunk| chunk.as_ref())
            .collect::<Vec<_>>();
        let lists = [
            encode_list(*b"INFO", &info_chunks)?,
            encode_list(*b"sdta", &[&SampleDataChunk::new(self) as &dyn Chunk])?,
            encode_list(
                *b"pdta",
                &[
                    &PresetHeaderChunk::new(self) as &dyn Chunk,
                    &PresetBagChunk::new(self),
                    &PresetModulatorChunk::new(self),
                    &PresetGeneratorChunk::new(self),
                    &InstrumentHeaderChunk::new(self),
                    &InstrumentBagChunk::new(self),
                    &InstrumentModulatorChunk::new(self),
                    &InstrumentGeneratorChunk::new(self),
                    &SampleHeaderChunk::new(self),
                ],
            )?,
        ];

        riff_size(lists.iter().map(|(_, size)| *size))?;

        let contents = lists.into_iter().map(|(list, _)| list).collect();
        let written = ChunkContents::Children(RIFF_ID, SFBK_ID, contents).write(writer)?;
        log::debug!(
            "Wrote SoundFont '{}' with {} presets, {} instruments and {} samples ({} bytes)",
            self.info.bank_name(),
            self.presets.len(),
            self.instruments.len(),
            self.samples.len(),
            written
        );
        Ok(())
    }

    /// Writes the whole SoundFont into a new byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Writes the whole SoundFont into a file at the given path, replacing existing files.
    /// Nothing gets created when encoding the SoundFont fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for SoundFont {
    fn default() -> Self {
        Self::new()
    }
}

// -------------------------------------------------------------------------------------------------

fn detach_at<T>(
    entities: &mut Vec<T>,
    position: usize,
    set_parent_file: fn(&mut T, Option<SoundFontId>),
) -> Option<T> {
    if position < entities.len() {
        let mut entity = entities.remove(position);
        set_parent_file(&mut entity, None);
        Some(entity)
    } else {
        None
    }
}

fn detach_range<T, R: RangeBounds<usize>>(
    entities: &mut Vec<T>,
    range: R,
    set_parent_file: fn(&mut T, Option<SoundFontId>),
) -> Vec<T> {
    entities
        .drain(range)
        .map(|mut entity| {
            set_parent_file(&mut entity, None);
            entity
        })
        .collect()
}

fn remove_if<T, P: FnMut(&T) -> bool>(entities: &mut Vec<T>, mut predicate: P) -> usize {
    let len = entities.len();
    entities.retain(|entity| !predicate(entity));
    len - entities.len()
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use byteorder::{ByteOrder, LittleEndian};

    use super::*;
    use crate::{Generator, GeneratorAmount, GeneratorItem, InstrumentZone, PresetZone};

    fn piano_soundfont() -> SoundFont {
        let mut file = SoundFont::new();
        file.info_mut().set_bank_name("Piano Bank").unwrap();
        file.info_mut().set_software("sf2forge").unwrap();

        let sample = file.add_sample(
            Sample::with_data("Piano C4", (0..100).map(|i| i * 100).collect(), 44100).unwrap(),
        );
        let mut instrument = Instrument::new("Piano").unwrap();
        let mut zone = InstrumentZone::with_sample(sample);
        zone.set_generator(GeneratorItem::new(
            Generator::KeyRange,
            GeneratorAmount::range(0, 127),
        ));
        instrument.add_zone(zone);
        let instrument = file.add_instrument(instrument);

        let mut preset = Preset::new("Piano").unwrap();
        preset.add_zone(PresetZone::with_instrument(instrument));
        file.add_preset(preset);
        file
    }

    #[test]
    fn attach_and_detach() {
        let mut file = SoundFont::new();
        let mut preset = Preset::new("Strings").unwrap();
        preset.add_zone(PresetZone::new());
        preset.set_global_zone(PresetZone::new());
        assert!(!preset.has_parent_file());

        let id = file.add_preset(preset);
        let preset = file.preset(id).unwrap();
        assert_eq!(preset.parent_file(), Some(file.id()));
        assert_eq!(preset.zones()[0].parent_file(), Some(file.id()));
        assert_eq!(preset.global_zone().unwrap().parent_file(), Some(file.id()));

        let preset = file.remove_preset(0).unwrap();
        assert!(!preset.has_parent_file());
        assert!(!preset.zones()[0].has_parent_file());
        assert!(!preset.global_zone().unwrap().has_parent_file());
        assert!(file.presets().is_empty());
    }

    #[test]
    fn move_preset_between_files() {
        let mut first = SoundFont::new();
        let mut second = SoundFont::new();
        let id = first.add_preset(Preset::new("Bass").unwrap());

        let position = first.preset_index(id).unwrap();
        let preset = first.remove_preset(position).unwrap();
        second.add_preset(preset);

        assert_eq!(second.preset(id).unwrap().parent_file(), Some(second.id()));
        assert!(first.preset(id).is_none());
        assert_eq!(first.preset_index(id), None);
        assert_eq!(second.preset_index(id), Some(0));
    }

    #[test]
    fn mutable_access_keeps_parents() {
        let mut file = SoundFont::new();
        let id = file.add_instrument(Instrument::new("Lead").unwrap());
        {
            let mut instrument = file.instrument_mut(id).unwrap();
            instrument.add_zone(InstrumentZone::new());
            instrument.set_name("Lead 2").unwrap();
        }
        {
            let mut instrument = file.instrument_mut(id).unwrap();
            let mut zone = instrument.zone_mut(0).unwrap();
            zone.set_generator(GeneratorItem::new(Generator::Pan, -100i16));
        }
        let instrument = file.instrument(id).unwrap();
        assert_eq!(instrument.name(), "Lead 2");
        assert_eq!(instrument.zones()[0].parent_file(), Some(file.id()));
        assert!(instrument.zones()[0].generator(Generator::Pan).is_some());

        let sample = file.add_sample(Sample::new("Saw").unwrap());
        file.sample_mut(sample).unwrap().set_correction(5);
        assert_eq!(file.sample(sample).unwrap().correction(), 5);
        assert!(file.sample(sample).unwrap().has_parent_file());
    }

    #[test]
    fn zones_removed_through_guards_are_detached() {
        let mut file = SoundFont::new();
        let mut preset = Preset::new("Pads").unwrap();
        for _ in 0..4 {
            preset.add_zone(PresetZone::new());
        }
        preset.set_global_zone(PresetZone::new());
        let id = file.add_preset(preset);

        let (zone, zones, global) = {
            let mut preset = file.preset_mut(id).unwrap();
            preset.set_bank(1);
            let zone = preset.remove_zone(0).unwrap();
            let zones = preset.remove_zones(0..2);
            let global = preset.reset_global_zone().unwrap();
            preset.add_zone(PresetZone::new());
            (zone, zones, global)
        };
        assert!(!zone.has_parent_file());
        assert!(zones.iter().all(|zone| !zone.has_parent_file()));
        assert!(!global.has_parent_file());

        let preset = file.preset(id).unwrap();
        assert_eq!(preset.bank(), 1);
        assert_eq!(preset.zones().len(), 2);
        assert!(preset
            .zones()
            .iter()
            .all(|zone| zone.parent_file() == Some(file.id())));
        assert!(!preset.has_global_zone());
        assert_eq!(file.presets().len(), 1);
        assert_eq!(preset.parent_file(), Some(file.id()));
    }

    #[test]
    fn bulk_removal() {
        let mut file = SoundFont::new();
        for name in ["A", "B", "C", "D"] {
            file.add_sample(Sample::new(name).unwrap());
            file.add_instrument(Instrument::new(name).unwrap());
        }
        let removed = file.remove_samples(1..3);
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|sample| !sample.has_parent_file()));
        assert_eq!(file.samples().len(), 2);
        assert_eq!(file.samples()[1].name(), "D");

        assert_eq!(file.remove_instrument_if(|i| i.name() != "C"), 3);
        assert_eq!(file.instruments()[0].name(), "C");
        assert!(file.remove_instrument(1).is_none());
        file.clear_instruments();
        file.clear_samples();
        assert!(file.instruments().is_empty() && file.samples().is_empty());
    }

    #[test]
    fn write_riff_structure() {
        let file = piano_soundfont();
        let bytes = file.to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(LittleEndian::read_u32(&bytes[4..8]) as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..12], b"sfbk");

        let mut cursor = Cursor::new(&bytes);
        let riff = riff::Chunk::read(&mut cursor, 0).unwrap();
        assert_eq!(riff.id(), RIFF_ID);
        assert_eq!(riff.read_type(&mut cursor).unwrap(), SFBK_ID);

        let lists = riff
            .iter(&mut cursor)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let list_types = lists
            .iter()
            .map(|list| {
                assert_eq!(list.id(), LIST_ID);
                list.read_type(&mut cursor).unwrap().value
            })
            .collect::<Vec<_>>();
        assert_eq!(list_types, vec![*b"INFO", *b"sdta", *b"pdta"]);

        let children = |list: &riff::Chunk, cursor: &mut Cursor<&Vec<u8>>| {
            list.iter(cursor)
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        };

        let info = children(&lists[0], &mut cursor);
        let info_ids = info.iter().map(|c| c.id().value).collect::<Vec<_>>();
        assert_eq!(info_ids, vec![*b"ifil", *b"isng", *b"INAM", *b"ISFT"]);
        assert_eq!(info[0].read_contents(&mut cursor).unwrap(), vec![2, 0, 4, 0]);
        assert_eq!(
            info[2].read_contents(&mut cursor).unwrap(),
            b"Piano Bank\0\0".to_vec()
        );

        let sdta = children(&lists[1], &mut cursor);
        assert_eq!(sdta.len(), 1);
        assert_eq!(sdta[0].id().value, *b"smpl");
        assert_eq!(sdta[0].len(), (100 + 46) * 2);

        let pdta = children(&lists[2], &mut cursor);
        let pdta_chunks = pdta
            .iter()
            .map(|c| (c.id().value, c.len()))
            .collect::<Vec<_>>();
        assert_eq!(
            pdta_chunks,
            vec![
                (*b"phdr", 2 * 38),
                (*b"pbag", 2 * 4),
                (*b"pmod", 10),
                (*b"pgen", 2 * 4),
                (*b"inst", 2 * 22),
                (*b"ibag", 2 * 4),
                (*b"imod", 10),
                (*b"igen", 3 * 4),
                (*b"shdr", 2 * 46),
            ]
        );

        // instrument generators: key range, then the sample link
        let igen = pdta[7].read_contents(&mut cursor).unwrap();
        assert_eq!(&igen, &[43, 0, 0, 127, 53, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn write_invalid_reference() {
        let mut file = piano_soundfont();
        file.remove_instrument(0);

        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(
            file.write(&mut cursor),
            Err(Error::InvalidReference(_))
        ));
        assert!(cursor.into_inner().is_empty());
    }

    #[test]
    fn write_removed_sample_reference() {
        let mut file = piano_soundfont();
        let sample = file.remove_sample(0).unwrap();
        assert!(!sample.has_parent_file());

        let mut cursor = Cursor::new(Vec::new());
        match file.write(&mut cursor) {
            Err(Error::InvalidReference(message)) => assert!(message.starts_with("Sample")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(cursor.into_inner().is_empty());
    }

    struct LargeChunk;

    impl Chunk for LargeChunk {
        fn name(&self) -> FourCC {
            FourCC(*b"larg")
        }

        fn data_len(&self) -> u64 {
            1 << 31
        }

        fn write_data(&self, _data: &mut Vec<u8>) -> Result<(), Error> {
            panic!("large chunks must never be encoded");
        }
    }

    #[test]
    fn list_too_large() {
        match encode_list(*b"test", &[&LargeChunk, &LargeChunk]) {
            Err(Error::ChunkTooLarge { chunk, size }) => {
                assert_eq!(chunk, FourCC(*b"test"));
                assert_eq!(size, 2 * ((1 << 31) + CHUNK_HEADER_SIZE) + 12);
            }
            other => panic!("unexpected result: {:?}", other.map(|(_, size)| size)),
        }
    }

    #[test]
    fn riff_too_large() {
        assert_eq!(riff_size([20, 30]).unwrap(), 62);
        let list = u64::from(u32::MAX) / 2;
        assert!(riff_size([list]).is_ok());
        match riff_size([list, list]) {
            Err(Error::ChunkTooLarge { chunk, size }) => {
                assert_eq!(chunk, FourCC(*b"RIFF"));
                assert_eq!(size, 2 * list + 12);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn save_to_file() {
        let file = piano_soundfont();
        let path = std::env::temp_dir().join(format!("sf2forge-{}.sf2", file.id().0));
        file.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(bytes, file.to_bytes().unwrap());
    }
}
