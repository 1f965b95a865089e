//! SoundFont presets, see "7.2 The PHDR Sub-chunk".

use std::ops::RangeBounds;

use crate::{
    attach::AttachedMut,
    error::Error,
    soundfont::SoundFontId,
    utils::{check_name, unique_usize_id},
    zone::{PresetZone, ZoneList, ZonesInOrder},
    InstrumentId,
};

// -------------------------------------------------------------------------------------------------

/// A unique id of a [`Preset`], stable for the preset's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PresetId(usize);

impl PresetId {
    fn new() -> Self {
        Self(unique_usize_id())
    }
}

// -------------------------------------------------------------------------------------------------

/// A preset: a named, numbered program which layers instruments via its zones.
#[derive(Debug)]
pub struct Preset {
    id: PresetId,
    name: String,
    preset_number: u16,
    bank: u16,
    library: u32,
    genre: u32,
    morphology: u32,
    zones: ZoneList<InstrumentId>,
}

impl Preset {
    /// The bank number for General MIDI percussion presets.
    pub const PERCUSSION_BANK: u16 = 128;

    /// Creates a new empty preset with preset and bank number 0.
    ///
    /// Fails when the name exceeds [`MAX_NAME_LENGTH`](crate::MAX_NAME_LENGTH) bytes.
    pub fn new(name: &str) -> Result<Self, Error> {
        Self::with_numbers(name, 0, 0)
    }

    /// Creates a new empty preset with the given preset and bank numbers.
    pub fn with_numbers(name: &str, preset_number: u16, bank: u16) -> Result<Self, Error> {
        check_name(name)?;
        Ok(Self {
            id: PresetId::new(),
            name: name.to_owned(),
            preset_number,
            bank,
            library: 0,
            genre: 0,
            morphology: 0,
            zones: ZoneList::new(),
        })
    }

    pub fn id(&self) -> PresetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name. On errors, the previous name is kept.
    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        check_name(name)?;
        self.name = name.to_owned();
        Ok(())
    }

    pub fn preset_number(&self) -> u16 {
        self.preset_number
    }

    pub fn set_preset_number(&mut self, preset_number: u16) {
        self.preset_number = preset_number;
    }

    pub fn bank(&self) -> u16 {
        self.bank
    }

    pub fn set_bank(&mut self, bank: u16) {
        self.bank = bank;
    }

    /// The unused dwLibrary field of the preset header. Written as is.
    pub fn library(&self) -> u32 {
        self.library
    }

    pub fn set_library(&mut self, library: u32) {
        self.library = library;
    }

    /// The unused dwGenre field of the preset header. Written as is.
    pub fn genre(&self) -> u32 {
        self.genre
    }

    pub fn set_genre(&mut self, genre: u32) {
        self.genre = genre;
    }

    /// The unused dwMorphology field of the preset header. Written as is.
    pub fn morphology(&self) -> u32 {
        self.morphology
    }

    pub fn set_morphology(&mut self, morphology: u32) {
        self.morphology = morphology;
    }

    /// The regular zones, excluding the global zone.
    pub fn zones(&self) -> &[PresetZone] {
        self.zones.zones()
    }

    pub fn zone_mut(&mut self, position: usize) -> Option<AttachedMut<'_, PresetZone>> {
        self.zones.zone_mut(position)
    }

    /// Appends a regular zone.
    ///
    /// A zone without an instrument is still written as a regular zone. When such a zone ends up
    /// first and the preset has no global zone, SoundFont readers will treat it as the global
    /// zone, so a warning is logged.
    pub fn add_zone(&mut self, zone: PresetZone) {
        self.zones.add_zone(zone);
    }

    /// Removes and returns the zone at the given position, if it exists.
    pub fn remove_zone(&mut self, position: usize) -> Option<PresetZone> {
        self.zones.remove_zone(position)
    }

    /// Removes and returns the zones in the given range.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn remove_zones<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<PresetZone> {
        self.zones.remove_zones(range)
    }

    /// Removes all zones which match the predicate. Returns the number of removed zones.
    pub fn remove_zone_if<P: FnMut(&PresetZone) -> bool>(&mut self, predicate: P) -> usize {
        self.zones.remove_zone_if(predicate)
    }

    pub fn clear_zones(&mut self) {
        self.zones.clear_zones();
    }

    pub fn has_global_zone(&self) -> bool {
        self.zones.global_zone().is_some()
    }

    pub fn global_zone(&self) -> Option<&PresetZone> {
        self.zones.global_zone()
    }

    pub fn global_zone_mut(&mut self) -> Option<AttachedMut<'_, PresetZone>> {
        self.zones.global_zone_mut()
    }

    /// Sets or replaces the global zone. An instrument link of the zone is removed.
    pub fn set_global_zone(&mut self, zone: PresetZone) {
        self.zones.set_global_zone(zone);
    }

    pub fn reset_global_zone(&mut self) -> Option<PresetZone> {
        self.zones.reset_global_zone()
    }

    pub fn has_parent_file(&self) -> bool {
        self.zones.parent_file().is_some()
    }

    /// The file this preset is attached to, if any.
    pub fn parent_file(&self) -> Option<SoundFontId> {
        self.zones.parent_file()
    }

    pub(crate) fn set_parent_file(&mut self, parent_file: Option<SoundFontId>) {
        self.zones.set_parent_file(parent_file);
    }

    pub(crate) fn zones_in_order(&self) -> ZonesInOrder<'_, InstrumentId> {
        self.zones.in_order()
    }
}

/// Setters of a preset which is owned by a file. Removed zones are detached.
impl AttachedMut<'_, Preset> {
    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.target_mut().set_name(name)
    }

    pub fn set_preset_number(&mut self, preset_number: u16) {
        self.target_mut().set_preset_number(preset_number);
    }

    pub fn set_bank(&mut self, bank: u16) {
        self.target_mut().set_bank(bank);
    }

    pub fn set_library(&mut self, library: u32) {
        self.target_mut().set_library(library);
    }

    pub fn set_genre(&mut self, genre: u32) {
        self.target_mut().set_genre(genre);
    }

    pub fn set_morphology(&mut self, morphology: u32) {
        self.target_mut().set_morphology(morphology);
    }

    pub fn zone_mut(&mut self, position: usize) -> Option<AttachedMut<'_, PresetZone>> {
        self.target_mut().zone_mut(position)
    }

    pub fn add_zone(&mut self, zone: PresetZone) {
        self.target_mut().add_zone(zone);
    }

    pub fn remove_zone(&mut self, position: usize) -> Option<PresetZone> {
        self.target_mut().remove_zone(position)
    }

    pub fn remove_zones<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<PresetZone> {
        self.target_mut().remove_zones(range)
    }

    pub fn remove_zone_if<P: FnMut(&PresetZone) -> bool>(&mut self, predicate: P) -> usize {
        self.target_mut().remove_zone_if(predicate)
    }

    pub fn clear_zones(&mut self) {
        self.target_mut().clear_zones();
    }

    pub fn global_zone_mut(&mut self) -> Option<AttachedMut<'_, PresetZone>> {
        self.target_mut().global_zone_mut()
    }

    pub fn set_global_zone(&mut self, zone: PresetZone) {
        self.target_mut().set_global_zone(zone);
    }

    pub fn reset_global_zone(&mut self) -> Option<PresetZone> {
        self.target_mut().reset_global_zone()
    }
}

/// Clones get a new id and are not attached to any file.
impl Clone for Preset {
    fn clone(&self) -> Self {
        Self {
            id: PresetId::new(),
            name: self.name.clone(),
            preset_number: self.preset_number,
            bank: self.bank,
            library: self.library,
            genre: self.genre,
            morphology: self.morphology,
            zones: self.zones.clone(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
