use std::ops::RangeBounds;

use crate::{attach::AttachedMut, soundfont::SoundFontId};

use super::{Zone, ZoneLink};

// -------------------------------------------------------------------------------------------------

/// Zones of a preset or instrument in encoding order: the global zone first, if any.
pub type ZonesInOrder<'a, L> =
    std::iter::Chain<std::option::Iter<'a, Zone<L>>, std::slice::Iter<'a, Zone<L>>>;

// -------------------------------------------------------------------------------------------------

/// The owned regular zones and the optional global zone of a preset or instrument, together with
/// the file the owner is attached to.
///
/// Every structural mutation stamps the current parent file into the affected zones.
#[derive(Debug)]
pub(crate) struct ZoneList<L: ZoneLink> {
    zones: Vec<Zone<L>>,
    global_zone: Option<Zone<L>>,
    parent_file: Option<SoundFontId>,
}

impl<L: ZoneLink> ZoneList<L> {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            global_zone: None,
            parent_file: None,
        }
    }

    pub fn zones(&self) -> &[Zone<L>] {
        &self.zones
    }

    pub fn zone_mut(&mut self, position: usize) -> Option<AttachedMut<'_, Zone<L>>> {
        let parent = self.parent_file;
        self.zones
            .get_mut(position)
            .map(|zone| AttachedMut::new(zone, parent, Zone::set_parent_file))
    }

    pub fn add_zone(&mut self, mut zone: Zone<L>) {
        if zone.link().is_none() {
            log::warn!(
                "Adding a zone without {} link, which may be read as a global zone",
                L::ENTITY_NAME.to_lowercase()
            );
        }
        zone.set_parent_file(self.parent_file);
        self.zones.push(zone);
    }

    pub fn remove_zone(&mut self, position: usize) -> Option<Zone<L>> {
        if position < self.zones.len() {
            let mut zone = self.zones.remove(position);
            zone.set_parent_file(None);
            Some(zone)
        } else {
            None
        }
    }

    pub fn remove_zones<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<Zone<L>> {
        self.zones
            .drain(range)
            .map(|mut zone| {
                zone.set_parent_file(None);
                zone
            })
            .collect()
    }

    pub fn remove_zone_if<P: FnMut(&Zone<L>) -> bool>(&mut self, mut predicate: P) -> usize {
        let len = self.zones.len();
        self.zones.retain(|zone| !predicate(zone));
        len - self.zones.len()
    }

    pub fn clear_zones(&mut self) {
        self.zones.clear();
    }

    pub fn global_zone(&self) -> Option<&Zone<L>> {
        self.global_zone.as_ref()
    }

    pub fn global_zone_mut(&mut self) -> Option<AttachedMut<'_, Zone<L>>> {
        let parent = self.parent_file;
        self.global_zone
            .as_mut()
            .map(|zone| AttachedMut::new(zone, parent, Self::reattach_global_zone))
    }

    pub fn set_global_zone(&mut self, mut zone: Zone<L>) {
        Self::reattach_global_zone(&mut zone, self.parent_file);
        self.global_zone = Some(zone);
    }

    pub fn reset_global_zone(&mut self) -> Option<Zone<L>> {
        self.global_zone.take().map(|mut zone| {
            zone.set_parent_file(None);
            zone
        })
    }

    /// All zones in the order they are encoded.
    pub fn in_order(&self) -> ZonesInOrder<'_, L> {
        self.global_zone.iter().chain(self.zones.iter())
    }

    pub fn parent_file(&self) -> Option<SoundFontId> {
        self.parent_file
    }

    pub fn set_parent_file(&mut self, parent_file: Option<SoundFontId>) {
        self.parent_file = parent_file;
        if let Some(zone) = self.global_zone.as_mut() {
            zone.set_parent_file(parent_file);
        }
        for zone in &mut self.zones {
            zone.set_parent_file(parent_file);
        }
    }

    /// A global zone applies to all sibling zones and thus never refers to an instrument or
    /// sample on its own.
    fn reattach_global_zone(zone: &mut Zone<L>, parent_file: Option<SoundFontId>) {
        if let Some(link) = zone.reset_link() {
            log::warn!(
                "Removing {} link {:?} from global zone",
                L::ENTITY_NAME,
                link
            );
        }
        zone.set_parent_file(parent_file);
    }
}

/// Clones deep copy all zones and are not attached to any file.
impl<L: ZoneLink> Clone for ZoneList<L> {
    fn clone(&self) -> Self {
        Self {
            zones: self.zones.clone(),
            global_zone: self.global_zone.clone(),
            parent_file: None,
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::{Generator, GeneratorItem},
        InstrumentZone, Sample, SampleId, SoundFont,
    };

    #[test]
    fn zones_without_links_are_kept() {
        let sample = Sample::new("Noise").unwrap();
        let mut list = ZoneList::new();
        let mut zone = InstrumentZone::new();
        zone.set_generator(GeneratorItem::new(Generator::Pan, 10i16));
        list.add_zone(zone.clone());
        list.add_zone(InstrumentZone::with_sample(sample.id()));
        assert_eq!(list.zones().len(), 2);
        assert_eq!(list.zones()[0], zone);
        assert!(list.global_zone().is_none());
        assert_eq!(list.in_order().next(), Some(&zone));
    }

    #[test]
    fn removed_zones_are_detached() {
        let mut list = ZoneList::<SampleId>::new();
        list.add_zone(InstrumentZone::new());
        list.add_zone(InstrumentZone::new());
        list.set_global_zone(InstrumentZone::new());
        let parent = Some(SoundFont::new().id());
        list.set_parent_file(parent);
        assert!(list.in_order().all(|zone| zone.parent_file() == parent));

        let zone = list.remove_zone(0).unwrap();
        assert!(!zone.has_parent_file());
        let global = list.reset_global_zone().unwrap();
        assert!(!global.has_parent_file());
        assert_eq!(list.zones()[0].parent_file(), parent);
    }
}
