//! SoundFont instruments, see "7.6 The INST Sub-chunk".

use std::ops::RangeBounds;

use crate::{
    attach::AttachedMut,
    error::Error,
    sample::SampleId,
    soundfont::SoundFontId,
    utils::{check_name, unique_usize_id},
    zone::{InstrumentZone, ZoneList, ZonesInOrder},
};

// -------------------------------------------------------------------------------------------------

/// A unique id of an [`Instrument`]. Preset zones refer to instruments by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstrumentId(usize);

impl InstrumentId {
    fn new() -> Self {
        Self(unique_usize_id())
    }
}

// -------------------------------------------------------------------------------------------------

/// An instrument: a named collection of zones which map key and velocity ranges to samples.
#[derive(Debug)]
pub struct Instrument {
    id: InstrumentId,
    name: String,
    zones: ZoneList<SampleId>,
}

impl Instrument {
    /// Creates a new empty instrument.
    ///
    /// Fails when the name exceeds [`MAX_NAME_LENGTH`](crate::MAX_NAME_LENGTH) bytes.
    pub fn new(name: &str) -> Result<Self, Error> {
        check_name(name)?;
        Ok(Self {
            id: InstrumentId::new(),
            name: name.to_owned(),
            zones: ZoneList::new(),
        })
    }

    /// Creates a new instrument with the given zones.
    pub fn with_zones(
        name: &str,
        zones: impl IntoIterator<Item = InstrumentZone>,
    ) -> Result<Self, Error> {
        let mut instrument = Self::new(name)?;
        for zone in zones {
            instrument.add_zone(zone);
        }
        Ok(instrument)
    }

    pub fn id(&self) -> InstrumentId {
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

    /// The regular zones, excluding the global zone.
    pub fn zones(&self) -> &[InstrumentZone] {
        self.zones.zones()
    }

    pub fn zone_mut(&mut self, position: usize) -> Option<AttachedMut<'_, InstrumentZone>> {
        self.zones.zone_mut(position)
    }

    /// Appends a regular zone.
    ///
    /// A zone without a sample is still written as a regular zone. When such a zone ends up first
    /// and the instrument has no global zone, SoundFont readers will treat it as the global zone,
    /// so a warning is logged.
    pub fn add_zone(&mut self, zone: InstrumentZone) {
        self.zones.add_zone(zone);
    }

    /// Removes and returns the zone at the given position, if it exists.
    pub fn remove_zone(&mut self, position: usize) -> Option<InstrumentZone> {
        self.zones.remove_zone(position)
    }

    /// Removes and returns the zones in the given range.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn remove_zones<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<InstrumentZone> {
        self.zones.remove_zones(range)
    }

    /// Removes all zones which match the predicate. Returns the number of removed zones.
    pub fn remove_zone_if<P: FnMut(&InstrumentZone) -> bool>(&mut self, predicate: P) -> usize {
        self.zones.remove_zone_if(predicate)
    }

    pub fn clear_zones(&mut self) {
        self.zones.clear_zones();
    }

    pub fn has_global_zone(&self) -> bool {
        self.zones.global_zone().is_some()
    }

    pub fn global_zone(&self) -> Option<&InstrumentZone> {
        self.zones.global_zone()
    }

    pub fn global_zone_mut(&mut self) -> Option<AttachedMut<'_, InstrumentZone>> {
        self.zones.global_zone_mut()
    }

    /// Sets or replaces the global zone. A sample link of the zone is removed.
    pub fn set_global_zone(&mut self, zone: InstrumentZone) {
        self.zones.set_global_zone(zone);
    }

    pub fn reset_global_zone(&mut self) -> Option<InstrumentZone> {
        self.zones.reset_global_zone()
    }

    pub fn has_parent_file(&self) -> bool {
        self.zones.parent_file().is_some()
    }

    /// The file this instrument is attached to, if any.
    pub fn parent_file(&self) -> Option<SoundFontId> {
        self.zones.parent_file()
    }

    pub(crate) fn set_parent_file(&mut self, parent_file: Option<SoundFontId>) {
        self.zones.set_parent_file(parent_file);
    }

    pub(crate) fn zones_in_order(&self) -> ZonesInOrder<'_, SampleId> {
        self.zones.in_order()
    }
}

/// Setters of an instrument which is owned by a file. Removed zones are detached.
impl AttachedMut<'_, Instrument> {
    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.target_mut().set_name(name)
    }

    pub fn zone_mut(&mut self, position: usize) -> Option<AttachedMut<'_, InstrumentZone>> {
        self.target_mut().zone_mut(position)
    }

    pub fn add_zone(&mut self, zone: InstrumentZone) {
        self.target_mut().add_zone(zone);
    }

    pub fn remove_zone(&mut self, position: usize) -> Option<InstrumentZone> {
        self.target_mut().remove_zone(position)
    }

    pub fn remove_zones<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<InstrumentZone> {
        self.target_mut().remove_zones(range)
    }

    pub fn remove_zone_if<P: FnMut(&InstrumentZone) -> bool>(&mut self, predicate: P) -> usize {
        self.target_mut().remove_zone_if(predicate)
    }

    pub fn clear_zones(&mut self) {
        self.target_mut().clear_zones();
    }

    pub fn global_zone_mut(&mut self) -> Option<AttachedMut<'_, InstrumentZone>> {
        self.target_mut().global_zone_mut()
    }

    pub fn set_global_zone(&mut self, zone: InstrumentZone) {
        self.target_mut().set_global_zone(zone);
    }

    pub fn reset_global_zone(&mut self) -> Option<InstrumentZone> {
        self.target_mut().reset_global_zone()
    }
}

/// Clones get a new id and are not attached to any file.
impl Clone for Instrument {
    fn clone(&self) -> Self {
        Self {
            id: InstrumentId::new(),
            name: self.name.clone(),
            zones: self.zones.clone(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
