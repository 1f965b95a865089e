#![doc = include_str!("../README.md")]

// private mods (will be partly re-exported)
mod attach;
mod error;
mod generator;
mod instrument;
mod modulator;
mod preset;
mod sample;
mod soundfont;
mod utils;
mod zone;

// public, flat re-exports
pub use error::Error;

pub use attach::AttachedMut;

pub use generator::{Generator, GeneratorAmount, GeneratorItem};

pub use modulator::{
    ControllerDirection, ControllerPolarity, ControllerType, GeneralController, Modulator,
    ModulatorController, ModulatorIdentifier, ModulatorItem, Transform,
};

pub use zone::{InstrumentZone, PresetZone, Zone, ZoneLink, ZonesInOrder};

pub use preset::{Preset, PresetId};

pub use instrument::{Instrument, InstrumentId};

pub use sample::{Sample, SampleId, SampleLink};

pub use soundfont::{
    Info, SoundFont, SoundFontId, Version, MAX_COMMENT_LENGTH, MAX_INFO_TEXT_LENGTH,
};

pub use utils::MAX_NAME_LENGTH;

// public mods
pub mod chunk;
