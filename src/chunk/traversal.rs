//! The zone traversal shared by all preset and instrument chunk families.
//!
//! Header, bag, generator and modulator chunks all walk zones through [`zones`] and count
//! generator records through [`Zone::generator_records`](crate::zone::Zone), so bag indices
//! always agree with the records written to the generator and modulator chunks.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use four_cc::FourCC;

use crate::{
    error::Error,
    instrument::{Instrument, InstrumentId},
    preset::Preset,
    sample::SampleId,
    soundfont::SoundFont,
    utils::name_field,
    zone::{Zone, ZoneLink, ZonesInOrder},
};

// -------------------------------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::Preset {}
    impl Sealed for crate::Instrument {}
}

/// An owner of zones which is encoded into a header, bag, generator and modulator chunk family:
/// [`Preset`] (phdr, pbag, pmod, pgen) or [`Instrument`] (inst, ibag, imod, igen).
pub trait ZoneOwner: sealed::Sealed + Sized {
    /// The entity the owner's zones refer to.
    type Link: ZoneLink;

    const HEADER_CHUNK: FourCC;
    const BAG_CHUNK: FourCC;
    const MODULATOR_CHUNK: FourCC;
    const GENERATOR_CHUNK: FourCC;

    /// Size of a single header record in bytes.
    const HEADER_RECORD_SIZE: u64;

    /// All owners of this kind in the given file, in file order.
    fn owners(file: &SoundFont) -> &[Self];

    /// The owner's zones in encoding order.
    fn zones_in_order(&self) -> ZonesInOrder<'_, Self::Link>;

    /// Appends the owner's header record, pointing at its first bag.
    fn write_header(&self, data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error>;

    /// Appends the terminal header record, pointing past the last bag.
    fn write_header_terminator(data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error>;
}

impl ZoneOwner for Preset {
    type Link = InstrumentId;

    const HEADER_CHUNK: FourCC = FourCC(*b"phdr");
    const BAG_CHUNK: FourCC = FourCC(*b"pbag");
    const MODULATOR_CHUNK: FourCC = FourCC(*b"pmod");
    const GENERATOR_CHUNK: FourCC = FourCC(*b"pgen");

    const HEADER_RECORD_SIZE: u64 = 38;

    fn owners(file: &SoundFont) -> &[Self] {
        file.presets()
    }

    fn zones_in_order(&self) -> ZonesInOrder<'_, InstrumentId> {
        Preset::zones_in_order(self)
    }

    fn write_header(&self, data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error> {
        write_preset_header(
            data,
            &name_field(self.name()),
            [self.preset_number(), self.bank(), bag_index],
            [self.library(), self.genre(), self.morphology()],
        )
    }

    fn write_header_terminator(data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error> {
        write_preset_header(data, &name_field("EOP"), [0, 0, bag_index], [0, 0, 0])
    }
}

impl ZoneOwner for Instrument {
    type Link = SampleId;

    const HEADER_CHUNK: FourCC = FourCC(*b"inst");
    const BAG_CHUNK: FourCC = FourCC(*b"ibag");
    const MODULATOR_CHUNK: FourCC = FourCC(*b"imod");
    const GENERATOR_CHUNK: FourCC = FourCC(*b"igen");

    const HEADER_RECORD_SIZE: u64 = 22;

    fn owners(file: &SoundFont) -> &[Self] {
        file.instruments()
    }

    fn zones_in_order(&self) -> ZonesInOrder<'_, SampleId> {
        Instrument::zones_in_order(self)
    }

    fn write_header(&self, data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error> {
        write_instrument_header(data, &name_field(self.name()), bag_index)
    }

    fn write_header_terminator(data: &mut Vec<u8>, bag_index: u16) -> Result<(), Error> {
        write_instrument_header(data, &name_field("EOI"), bag_index)
    }
}

/// name\[20\], preset, bank, bag index, library, genre, morphology
fn write_preset_header(
    data: &mut Vec<u8>,
    name: &[u8],
    words: [u16; 3],
    dwords: [u32; 3],
) -> Result<(), Error> {
    data.write_all(name)?;
    for word in words {
        data.write_u16::<LittleEndian>(word)?;
    }
    for dword in dwords {
        data.write_u32::<LittleEndian>(dword)?;
    }
    Ok(())
}

/// name\[20\], bag index
fn write_instrument_header(data: &mut Vec<u8>, name: &[u8], bag_index: u16) -> Result<(), Error> {
    data.write_all(name)?;
    data.write_u16::<LittleEndian>(bag_index)?;
    Ok(())
}

// -------------------------------------------------------------------------------------------------

/// All zones of all owners of the given kind, in encoding order.
pub(crate) fn zones<'a, O: ZoneOwner + 'a>(
    file: &'a SoundFont,
) -> impl Iterator<Item = &'a Zone<O::Link>> + 'a
where
    O::Link: 'a,
{
    O::owners(file).iter().flat_map(O::zones_in_order)
}

/// Number of generator records a zone emits, including its link.
pub(crate) fn generator_count<L: ZoneLink>(zone: &Zone<L>) -> usize {
    zone.generator_records().count()
}

/// Number of modulator records a zone emits.
pub(crate) fn modulator_count<L: ZoneLink>(zone: &Zone<L>) -> usize {
    zone.modulators().len()
}
