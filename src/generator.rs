//! SoundFont generator operators, amounts and zone generator items.

use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::utils::keyed::Keyed;

// -------------------------------------------------------------------------------------------------

/// SoundFont 2.04 generator operator, see "8.1.2 Generator Enumerators Defined".
///
/// Unused and reserved operators are listed too, so every operator value below `EndOper`
/// maps to a variant.
#[derive(
    Debug,
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
pub enum Generator {
    StartAddrsOffset = 0,
    EndAddrsOffset = 1,
    StartloopAddrsOffset = 2,
    EndloopAddrsOffset = 3,
    StartAddrsCoarseOffset = 4,
    ModLfoToPitch = 5,
    VibLfoToPitch = 6,
    ModEnvToPitch = 7,
    InitialFilterFc = 8,
    InitialFilterQ = 9,
    ModLfoToFilterFc = 10,
    ModEnvToFilterFc = 11,
    EndAddrsCoarseOffset = 12,
    ModLfoToVolume = 13,
    Unused1 = 14,
    ChorusEffectsSend = 15,
    ReverbEffectsSend = 16,
    Pan = 17,
    Unused2 = 18,
    Unused3 = 19,
    Unused4 = 20,
    DelayModLfo = 21,
    FreqModLfo = 22,
    DelayVibLfo = 23,
    FreqVibLfo = 24,
    DelayModEnv = 25,
    AttackModEnv = 26,
    HoldModEnv = 27,
    DecayModEnv = 28,
    SustainModEnv = 29,
    ReleaseModEnv = 30,
    KeynumToModEnvHold = 31,
    KeynumToModEnvDecay = 32,
    DelayVolEnv = 33,
    AttackVolEnv = 34,
    HoldVolEnv = 35,
    DecayVolEnv = 36,
    SustainVolEnv = 37,
    ReleaseVolEnv = 38,
    KeynumToVolEnvHold = 39,
    KeynumToVolEnvDecay = 40,
    Instrument = 41,
    Reserved1 = 42,
    KeyRange = 43,
    VelRange = 44,
    StartloopAddrsCoarseOffset = 45,
    Keynum = 46,
    Velocity = 47,
    InitialAttenuation = 48,
    Reserved2 = 49,
    EndloopAddrsCoarseOffset = 50,
    CoarseTune = 51,
    FineTune = 52,
    SampleId = 53,
    SampleModes = 54,
    Reserved3 = 55,
    ScaleTuning = 56,
    ExclusiveClass = 57,
    OverridingRootKey = 58,
    Unused5 = 59,
    EndOper = 60,
}

impl Generator {
    /// Raw 16-bit operator value as stored in generator and modulator records.
    pub const fn raw(self) -> u16 {
        self as u16
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::from_repr(raw)
    }

    /// Range generators must precede all other generators of a zone.
    pub const fn is_range(self) -> bool {
        matches!(self, Self::KeyRange | Self::VelRange)
    }

    /// Link generators terminate a zone and refer to an instrument or sample by index. Zones
    /// set them through their instrument or sample reference only.
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Instrument | Self::SampleId)
    }
}

// -------------------------------------------------------------------------------------------------

/// The 16-bit amount of a generator: a signed or unsigned word, or a low/high byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorAmount {
    Range { lo: u8, hi: u8 },
    Short(i16),
    Word(u16),
}

impl GeneratorAmount {
    pub const fn range(lo: u8, hi: u8) -> Self {
        Self::Range { lo, hi }
    }

    /// Little endian byte representation, as written to generator records.
    pub const fn to_le_bytes(self) -> [u8; 2] {
        match self {
            Self::Range { lo, hi } => [lo, hi],
            Self::Short(value) => value.to_le_bytes(),
            Self::Word(value) => value.to_le_bytes(),
        }
    }
}

impl Default for GeneratorAmount {
    fn default() -> Self {
        Self::Short(0)
    }
}

impl From<i16> for GeneratorAmount {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<u16> for GeneratorAmount {
    fn from(value: u16) -> Self {
        Self::Word(value)
    }
}

// -------------------------------------------------------------------------------------------------

/// A generator setting of a zone, unique by its operator within the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratorItem {
    op: Generator,
    amount: GeneratorAmount,
}

impl GeneratorItem {
    pub fn new<A: Into<GeneratorAmount>>(op: Generator, amount: A) -> Self {
        Self {
            op,
            amount: amount.into(),
        }
    }

    pub fn op(&self) -> Generator {
        self.op
    }

    pub fn set_op(&mut self, op: Generator) {
        self.op = op;
    }

    pub fn amount(&self) -> GeneratorAmount {
        self.amount
    }

    pub fn set_amount<A: Into<GeneratorAmount>>(&mut self, amount: A) {
        self.amount = amount.into();
    }
}

impl Keyed for GeneratorItem {
    type Key = Generator;

    fn key(&self) -> Generator {
        self.op
    }
}

// -------------------------------------------------------------------------------------------------
