//! Preset and instrument zones: unique-by-key generator and modulator settings, plus an
//! optional reference to the instrument (preset zones) or sample (instrument zones) they play.

use std::fmt::Debug;

use crate::{
    attach::AttachedMut,
    generator::{Generator, GeneratorItem},
    instrument::InstrumentId,
    modulator::{ModulatorIdentifier, ModulatorItem},
    sample::SampleId,
    soundfont::{SoundFont, SoundFontId},
    utils::keyed::KeyedList,
};

mod list;
pub(crate) use list::ZoneList;
pub use list::ZonesInOrder;

// -------------------------------------------------------------------------------------------------

/// The entity a zone refers to. Encoded as the zone's final generator, pointing at the index of
/// the referenced entity in the written file.
pub trait ZoneLink: Copy + PartialEq + Debug {
    /// The generator which carries the link in generator records.
    const GENERATOR: Generator;

    /// Human readable name of the linked entity type.
    const ENTITY_NAME: &'static str;

    /// Position of the linked entity in the given file, if the file owns it.
    fn resolve(&self, file: &SoundFont) -> Option<usize>;
}

impl ZoneLink for InstrumentId {
    const GENERATOR: Generator = Generator::Instrument;
    const ENTITY_NAME: &'static str = "Instrument";

    fn resolve(&self, file: &SoundFont) -> Option<usize> {
        file.instrument_index(*self)
    }
}

impl ZoneLink for SampleId {
    const GENERATOR: Generator = Generator::SampleId;
    const ENTITY_NAME: &'static str = "Sample";

    fn resolve(&self, file: &SoundFont) -> Option<usize> {
        file.sample_index(*self)
    }
}

// -------------------------------------------------------------------------------------------------

/// A single generator record of a zone, as emitted into generator chunks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GeneratorRecord<L> {
    Item(GeneratorItem),
    Link(L),
}

// -------------------------------------------------------------------------------------------------

/// A zone of a preset or instrument.
///
/// Generators are unique by operator, modulators by [`ModulatorIdentifier`]. Setting an item
/// with an existing key replaces the existing item in place, so insertion order is kept.
pub struct Zone<L: ZoneLink> {
    generators: KeyedList<GeneratorItem>,
    modulators: KeyedList<ModulatorItem>,
    link: Option<L>,
    parent_file: Option<SoundFontId>,
}

/// A preset zone, optionally referring to an instrument.
pub type PresetZone = Zone<InstrumentId>;

/// An instrument zone, optionally referring to a sample.
pub type InstrumentZone = Zone<SampleId>;

impl<L: ZoneLink> Zone<L> {
    /// Creates a new empty, unlinked zone.
    pub fn new() -> Self {
        Self {
            generators: KeyedList::new(),
            modulators: KeyedList::new(),
            link: None,
            parent_file: None,
        }
    }

    /// Creates a new zone with the given items. Items with duplicate keys are merged with
    /// [`Self::set_generator`] and [`Self::set_modulator`] semantics.
    pub fn with_items(
        generators: impl IntoIterator<Item = GeneratorItem>,
        modulators: impl IntoIterator<Item = ModulatorItem>,
    ) -> Self {
        let mut zone = Self::new();
        for generator in generators {
            zone.set_generator(generator);
        }
        for modulator in modulators {
            zone.set_modulator(modulator);
        }
        zone
    }

    pub fn generators(&self) -> &[GeneratorItem] {
        self.generators.as_slice()
    }

    /// Sets a generator, replacing an existing generator with the same operator.
    ///
    /// Instrument and sample links are not written from generator items: use the zone's link
    /// instead. Such items are stored, but skipped when encoding.
    pub fn set_generator(&mut self, generator: GeneratorItem) {
        if generator.op().is_link() {
            log::warn!(
                "Generator '{}' is set through the zone's link and will not be written",
                generator.op()
            );
        }
        self.generators.upsert(generator);
    }

    pub fn find_generator(&self, op: Generator) -> Option<usize> {
        self.generators.position(op)
    }

    pub fn generator(&self, op: Generator) -> Option<&GeneratorItem> {
        self.generators.get(op)
    }

    pub fn remove_generator(&mut self, op: Generator) -> Option<GeneratorItem> {
        self.generators.remove(op)
    }

    pub fn clear_generators(&mut self) {
        self.generators.clear();
    }

    pub fn modulators(&self) -> &[ModulatorItem] {
        self.modulators.as_slice()
    }

    /// Sets a modulator, replacing an existing modulator with the same identifier.
    pub fn set_modulator(&mut self, modulator: ModulatorItem) {
        self.modulators.upsert(modulator);
    }

    pub fn find_modulator(&self, identifier: ModulatorIdentifier) -> Option<usize> {
        self.modulators.position(identifier)
    }

    pub fn modulator(&self, identifier: ModulatorIdentifier) -> Option<&ModulatorItem> {
        self.modulators.get(identifier)
    }

    pub fn remove_modulator(&mut self, identifier: ModulatorIdentifier) -> Option<ModulatorItem> {
        self.modulators.remove(identifier)
    }

    pub fn clear_modulators(&mut self) {
        self.modulators.clear();
    }

    /// The instrument or sample this zone refers to.
    pub fn link(&self) -> Option<L> {
        self.link
    }

    pub fn set_link(&mut self, link: L) {
        self.link = Some(link);
    }

    pub fn reset_link(&mut self) -> Option<L> {
        self.link.take()
    }

    pub fn has_parent_file(&self) -> bool {
        self.parent_file.is_some()
    }

    /// The file which (indirectly) owns this zone, if any.
    pub fn parent_file(&self) -> Option<SoundFontId> {
        self.parent_file
    }

    pub(crate) fn set_parent_file(&mut self, parent_file: Option<SoundFontId>) {
        self.parent_file = parent_file;
    }

    /// Generator records in the order they are encoded: key range, velocity range, all other
    /// generators in insertion order and finally the link, if any.
    pub(crate) fn generator_records(&self) -> impl Iterator<Item = GeneratorRecord<L>> + '_ {
        let ranges = [Generator::KeyRange, Generator::VelRange]
            .into_iter()
            .filter_map(|op| self.generators.get(op).copied());
        let others = self
            .generators
            .iter()
            .filter(|generator| !generator.op().is_range() && !generator.op().is_link())
            .copied();
        ranges
            .chain(others)
            .map(GeneratorRecord::Item)
            .chain(self.link.map(GeneratorRecord::Link))
    }
}

impl Zone<InstrumentId> {
    /// Creates a new preset zone which plays the given instrument.
    pub fn with_instrument(instrument: InstrumentId) -> Self {
        let mut zone = Self::new();
        zone.set_link(instrument);
        zone
    }

    pub fn instrument(&self) -> Option<InstrumentId> {
        self.link()
    }

    pub fn set_instrument(&mut self, instrument: InstrumentId) {
        self.set_link(instrument);
    }
}

impl Zone<SampleId> {
    /// Creates a new instrument zone which plays the given sample.
    pub fn with_sample(sample: SampleId) -> Self {
        let mut zone = Self::new();
        zone.set_link(sample);
        zone
    }

    pub fn sample(&self) -> Option<SampleId> {
        self.link()
    }

    pub fn set_sample(&mut self, sample: SampleId) {
        self.set_link(sample);
    }
}

// -------------------------------------------------------------------------------------------------

/// Setters of a zone which is owned by a preset or instrument.
impl<L: ZoneLink> AttachedMut<'_, Zone<L>> {
    pub fn set_generator(&mut self, generator: GeneratorItem) {
        self.target_mut().set_generator(generator);
    }

    pub fn remove_generator(&mut self, op: Generator) -> Option<GeneratorItem> {
        self.target_mut().remove_generator(op)
    }

    pub fn clear_generators(&mut self) {
        self.target_mut().clear_generators();
    }

    pub fn set_modulator(&mut self, modulator: ModulatorItem) {
        self.target_mut().set_modulator(modulator);
    }

    pub fn remove_modulator(&mut self, identifier: ModulatorIdentifier) -> Option<ModulatorItem> {
        self.target_mut().remove_modulator(identifier)
    }

    pub fn clear_modulators(&mut self) {
        self.target_mut().clear_modulators();
    }

    pub fn set_link(&mut self, link: L) {
        self.target_mut().set_link(link);
    }

    pub fn reset_link(&mut self) -> Option<L> {
        self.target_mut().reset_link()
    }
}

impl AttachedMut<'_, Zone<InstrumentId>> {
    pub fn set_instrument(&mut self, instrument: InstrumentId) {
        self.target_mut().set_instrument(instrument);
    }
}

impl AttachedMut<'_, Zone<SampleId>> {
    pub fn set_sample(&mut self, sample: SampleId) {
        self.target_mut().set_sample(sample);
    }
}

// -------------------------------------------------------------------------------------------------

impl<L: ZoneLink> Default for Zone<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones are deep copies of all items and are not attached to any file.
impl<L: ZoneLink> Clone for Zone<L> {
    fn clone(&self) -> Self {
        Self {
            generators: self.generators.clone(),
            modulators: self.modulators.clone(),
            link: self.link,
            parent_file: None,
        }
    }
}

/// Zones compare equal when their items and link are equal, regardless of their parent file.
impl<L: ZoneLink> PartialEq for Zone<L> {
    fn eq(&self, other: &Self) -> bool {
        self.generators == other.generators
            && self.modulators == other.modulators
            && self.link == other.link
    }
}

impl<L: ZoneLink> Debug for Zone<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zone")
            .field("generators", &self.generators())
            .field("modulators", &self.modulators())
            .field("link", &self.link)
            .field("parent_file", &self.parent_file)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::GeneratorAmount,
        modulator::{GeneralController, Modulator, Transform},
        sample::Sample,
    };

    fn velocity_to_attenuation(amount: i16) -> ModulatorItem {
        ModulatorItem::new(
            Modulator::general(GeneralController::NoteOnVelocity),
            Generator::InitialAttenuation,
            amount,
            Modulator::default(),
            Transform::Linear,
        )
    }

    #[test]
    fn generator_upsert() {
        let mut zone = InstrumentZone::new();
        zone.set_generator(GeneratorItem::new(Generator::Pan, 100i16));
        zone.set_generator(GeneratorItem::new(Generator::FineTune, 5i16));
        zone.set_generator(GeneratorItem::new(Generator::Pan, -100i16));

        assert_eq!(zone.generators().len(), 2);
        assert_eq!(zone.find_generator(Generator::Pan), Some(0));
        assert_eq!(
            zone.generators()[0].amount(),
            GeneratorAmount::Short(-100)
        );
        assert_eq!(zone.find_generator(Generator::FineTune), Some(1));
        assert_eq!(zone.find_generator(Generator::CoarseTune), None);

        assert!(zone.remove_generator(Generator::Pan).is_some());
        assert_eq!(zone.find_generator(Generator::Pan), None);
        zone.clear_generators();
        assert!(zone.generators().is_empty());
    }

    #[test]
    fn modulator_upsert() {
        let mut zone = PresetZone::new();
        zone.set_modulator(velocity_to_attenuation(960));
        let other = ModulatorItem::new(
            Modulator::general(GeneralController::PitchWheel),
            Generator::FineTune,
            12700,
            Modulator::general(GeneralController::PitchWheelSensitivity),
            Transform::Linear,
        );
        zone.set_modulator(other);
        zone.set_modulator(velocity_to_attenuation(480));

        assert_eq!(zone.modulators().len(), 2);
        let identifier = velocity_to_attenuation(0).identifier();
        assert_eq!(zone.find_modulator(identifier), Some(0));
        assert_eq!(zone.modulator(identifier).unwrap().amount(), 480);
        assert_eq!(zone.find_modulator(other.identifier()), Some(1));
        assert_eq!(zone.find_modulator(ModulatorIdentifier::default()), None);

        zone.clear_modulators();
        assert_eq!(zone.find_modulator(identifier), None);
    }

    #[test]
    fn merged_construction_and_clone() {
        let zone = InstrumentZone::with_items(
            [
                GeneratorItem::new(Generator::Pan, 1i16),
                GeneratorItem::new(Generator::Pan, 2i16),
            ],
            [velocity_to_attenuation(1)],
        );
        assert_eq!(zone.generators().len(), 1);
        assert_eq!(zone.generators()[0].amount(), GeneratorAmount::Short(2));

        let mut copy = zone.clone();
        assert_eq!(copy, zone);
        copy.set_generator(GeneratorItem::new(Generator::Pan, 3i16));
        assert_ne!(copy, zone);
        assert_eq!(zone.generators()[0].amount(), GeneratorAmount::Short(2));
    }

    #[test]
    fn record_order() {
        let sample = Sample::new("Sine").unwrap();
        let mut zone = InstrumentZone::with_sample(sample.id());
        zone.set_generator(GeneratorItem::new(Generator::Pan, 1i16));
        zone.set_generator(GeneratorItem::new(Generator::SampleId, 7u16));
        zone.set_generator(GeneratorItem::new(
            Generator::VelRange,
            GeneratorAmount::range(0, 64),
        ));
        zone.set_generator(GeneratorItem::new(Generator::FineTune, 2i16));
        zone.set_generator(GeneratorItem::new(
            Generator::KeyRange,
            GeneratorAmount::range(60, 72),
        ));

        let records = zone.generator_records().collect::<Vec<_>>();
        let ops = records
            .iter()
            .map(|record| match record {
                GeneratorRecord::Item(item) => item.op(),
                GeneratorRecord::Link(_) => Generator::SampleId,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            ops,
            vec![
                Generator::KeyRange,
                Generator::VelRange,
                Generator::Pan,
                Generator::FineTune,
                Generator::SampleId
            ]
        );
        assert_eq!(records.last(), Some(&GeneratorRecord::Link(sample.id())));
    }
}
