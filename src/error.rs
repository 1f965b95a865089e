use std::{error, fmt, io};

use four_cc::FourCC;

// -------------------------------------------------------------------------------------------------

/// Provides an enumeration of all possible errors reported by sf2forge.
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// A name or numeric field does not fit into its SoundFont representation.
    ValueOutOfRange(String),
    /// The encoded chunk would not fit into a 32-bit RIFF length field.
    ChunkTooLarge { chunk: FourCC, size: u64 },
    /// A zone or sample refers to an entity which is not part of the written file.
    InvalidReference(String),
    IoError(io::Error),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange(str) => write!(f, "Value out of range: {str}"),
            Self::ChunkTooLarge { chunk, size } => {
                write!(f, "Chunk '{chunk}' is too large: {size} bytes")
            }
            Self::InvalidReference(str) => write!(f, "Invalid reference: {str}"),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}
