use crate::generator::Generator;

use super::Modulator;

// -------------------------------------------------------------------------------------------------

/// The unique key of a modulator within a zone, see "7.4 The PMOD Sub-chunk".
///
/// Ordering is lexicographic by source, destination, then amount source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulatorIdentifier {
    source_op: Modulator,
    destination_op: Generator,
    amount_source_op: Modulator,
}

impl ModulatorIdentifier {
    pub fn new(
        source_op: Modulator,
        destination_op: Generator,
        amount_source_op: Modulator,
    ) -> Self {
        Self {
            source_op,
            destination_op,
            amount_source_op,
        }
    }

    /// The source of data for the modulator.
    pub fn source_op(&self) -> Modulator {
        self.source_op
    }

    pub fn set_source_op(&mut self, source_op: Modulator) {
        self.source_op = source_op;
    }

    /// The destination generator of the modulator.
    pub fn destination_op(&self) -> Generator {
        self.destination_op
    }

    pub fn set_destination_op(&mut self, destination_op: Generator) {
        self.destination_op = destination_op;
    }

    /// The modulation source applied to the modulation amount.
    pub fn amount_source_op(&self) -> Modulator {
        self.amount_source_op
    }

    pub fn set_amount_source_op(&mut self, amount_source_op: Modulator) {
        self.amount_source_op = amount_source_op;
    }
}

impl Default for ModulatorIdentifier {
    fn default() -> Self {
        Self::new(
            Modulator::default(),
            Generator::StartAddrsOffset,
            Modulator::default(),
        )
    }
}

// -------------------------------------------------------------------------------------------------
