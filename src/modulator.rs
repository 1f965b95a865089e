//! SoundFont modulator sources, transforms and zone modulator items.
//!
//! A modulator routes a controller source, optionally scaled by a second amount source, into a
//! destination generator. Within a zone, modulators are unique by their
//! [`ModulatorIdentifier`]: the (source, destination, amount source) triple.

use strum::{Display, EnumIter, EnumString, FromRepr};

// -------------------------------------------------------------------------------------------------

/// Transform applied to the modulation source, see "8.3 Modulator Transform Enumerators".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
)]
#[repr(u16)]
pub enum Transform {
    #[default]
    Linear = 0,
    AbsoluteValue = 2,
}

impl Transform {
    pub const fn raw(self) -> u16 {
        self as u16
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::from_repr(raw)
    }
}

// -------------------------------------------------------------------------------------------------

mod controller;
pub use controller::{
    ControllerDirection, ControllerPolarity, ControllerType, GeneralController, Modulator,
    ModulatorController,
};

mod identifier;
pub use identifier::ModulatorIdentifier;

mod item;
pub use item::ModulatorItem;
