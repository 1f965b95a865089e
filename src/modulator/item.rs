use crate::{generator::Generator, utils::keyed::Keyed};

use super::{Modulator, ModulatorIdentifier, Transform};

// -------------------------------------------------------------------------------------------------

/// A modulator setting of a zone, unique by its [`ModulatorIdentifier`] within the zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModulatorItem {
    identifier: ModulatorIdentifier,
    amount: i16,
    transform_op: Transform,
}

impl ModulatorItem {
    pub fn new(
        source_op: Modulator,
        destination_op: Generator,
        amount: i16,
        amount_source_op: Modulator,
        transform_op: Transform,
    ) -> Self {
        Self::from_identifier(
            ModulatorIdentifier::new(source_op, destination_op, amount_source_op),
            amount,
            transform_op,
        )
    }

    pub fn from_identifier(
        identifier: ModulatorIdentifier,
        amount: i16,
        transform_op: Transform,
    ) -> Self {
        Self {
            identifier,
            amount,
            transform_op,
        }
    }

    pub fn identifier(&self) -> ModulatorIdentifier {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: ModulatorIdentifier) {
        self.identifier = identifier;
    }

    pub fn source_op(&self) -> Modulator {
        self.identifier.source_op()
    }

    pub fn destination_op(&self) -> Generator {
        self.identifier.destination_op()
    }

    pub fn amount_source_op(&self) -> Modulator {
        self.identifier.amount_source_op()
    }

    /// The degree to which the source modulates the destination.
    pub fn amount(&self) -> i16 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: i16) {
        self.amount = amount;
    }

    pub fn transform_op(&self) -> Transform {
        self.transform_op
    }

    pub fn set_transform_op(&mut self, transform_op: Transform) {
        self.transform_op = transform_op;
    }
}

impl Keyed for ModulatorItem {
    type Key = ModulatorIdentifier;

    fn key(&self) -> ModulatorIdentifier {
        self.identifier
    }
}
