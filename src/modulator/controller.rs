use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Non MIDI controller palette, see "8.2.1 Source Enumerator Controller Palettes".
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
#[repr(u8)]
pub enum GeneralController {
    #[default]
    NoController = 0,
    NoteOnVelocity = 2,
    NoteOnKeyNumber = 3,
    PolyPressure = 10,
    ChannelPressure = 13,
    PitchWheel = 14,
    PitchWheelSensitivity = 16,
    Link = 127,
}

/// Direction of a modulator source, from minimum to maximum or reversed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum ControllerDirection {
    #[default]
    MinToMax,
    MaxToMin,
}

/// Polarity of a modulator source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum ControllerPolarity {
    #[default]
    Unipolar,
    Bipolar,
}

/// Continuity type of a modulator source, see "8.2.4 Source Types".
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, FromRepr,
)]
#[repr(u8)]
pub enum ControllerType {
    #[default]
    Linear = 0,
    Concave = 1,
    Convex = 2,
    Switch = 3,
}

/// The controller a modulator source reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulatorController {
    General(GeneralController),
    /// MIDI continuous controller number in range `0..128`.
    Midi(u8),
}

impl Default for ModulatorController {
    fn default() -> Self {
        Self::General(GeneralController::NoController)
    }
}

// -------------------------------------------------------------------------------------------------

/// A modulator source enumerator, see "8.2 Modulator Source Enumerators".
///
/// Bit layout of the raw 16-bit value: controller index (0..=6), MIDI CC flag (7),
/// direction (8), polarity (9), source type (10..=15).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Modulator(u16);

impl Modulator {
    const INDEX_MASK: u16 = 0x007F;
    const MIDI_FLAG: u16 = 0x0080;
    const DIRECTION_FLAG: u16 = 0x0100;
    const POLARITY_FLAG: u16 = 0x0200;
    const TYPE_SHIFT: u16 = 10;

    /// Creates a new modulator source.
    ///
    /// Fails when a MIDI controller number is out of the 7-bit controller range.
    pub fn new(
        controller: ModulatorController,
        direction: ControllerDirection,
        polarity: ControllerPolarity,
        controller_type: ControllerType,
    ) -> Result<Self, Error> {
        let index = match controller {
            ModulatorController::General(general) => general as u16,
            ModulatorController::Midi(number) => {
                if u16::from(number) > Self::INDEX_MASK {
                    return Err(Error::ValueOutOfRange(format!(
                        "MIDI controller number {number} must be less than 128"
                    )));
                }
                u16::from(number) | Self::MIDI_FLAG
            }
        };
        let mut raw = index | ((controller_type as u16) << Self::TYPE_SHIFT);
        if direction == ControllerDirection::MaxToMin {
            raw |= Self::DIRECTION_FLAG;
        }
        if polarity == ControllerPolarity::Bipolar {
            raw |= Self::POLARITY_FLAG;
        }
        Ok(Self(raw))
    }

    /// A linear, unipolar, positive source for the given general controller.
    pub fn general(controller: GeneralController) -> Self {
        Self(controller as u16)
    }

    /// Creates a modulator source from its raw 16-bit representation.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The source controller. Returns `None` for undefined general controller indices.
    pub fn controller(self) -> Option<ModulatorController> {
        let index = (self.0 & Self::INDEX_MASK) as u8;
        if self.0 & Self::MIDI_FLAG != 0 {
            Some(ModulatorController::Midi(index))
        } else {
            GeneralController::from_repr(index).map(ModulatorController::General)
        }
    }

    pub fn direction(self) -> ControllerDirection {
        if self.0 & Self::DIRECTION_FLAG != 0 {
            ControllerDirection::MaxToMin
        } else {
            ControllerDirection::MinToMax
        }
    }

    pub fn polarity(self) -> ControllerPolarity {
        if self.0 & Self::POLARITY_FLAG != 0 {
            ControllerPolarity::Bipolar
        } else {
            ControllerPolarity::Unipolar
        }
    }

    /// The source type. Returns `None` for types undefined in SoundFont 2.04.
    pub fn controller_type(self) -> Option<ControllerType> {
        ControllerType::from_repr((self.0 >> Self::TYPE_SHIFT) as u8)
    }
}

impl From<GeneralController> for Modulator {
    fn from(controller: GeneralController) -> Self {
        Self::general(controller)
    }
}

// -------------------------------------------------------------------------------------------------
