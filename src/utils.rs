pub(crate) mod keyed;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Generates a unique usize number, by simply counting atomically upwards from 1.
pub fn unique_usize_id() -> usize {
    static ENTITY_ID_COUNTER: AtomicUsize = AtomicUsize::new(1);
    ENTITY_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// -------------------------------------------------------------------------------------------------

/// Size of the fixed name field in preset, instrument and sample header records.
pub(crate) const NAME_FIELD_SIZE: usize = 20;

/// Maximum length of an entity name, excluding the terminator byte.
pub const MAX_NAME_LENGTH: usize = NAME_FIELD_SIZE - 1;

/// Validates a preset, instrument or sample name against the fixed header name field.
pub(crate) fn check_name(name: &str) -> Result<(), Error> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::ValueOutOfRange(format!(
            "Name '{name}' is {} bytes long, but must not exceed {MAX_NAME_LENGTH} bytes",
            name.len()
        )));
    }
    Ok(())
}

/// Returns the NUL padded fixed-size name field for the given (checked) name.
pub(crate) fn name_field(name: &str) -> [u8; NAME_FIELD_SIZE] {
    let mut field = [0u8; NAME_FIELD_SIZE];
    let bytes = name.as_bytes();
    let len = bytes.len().min(MAX_NAME_LENGTH);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Converts a list position into a 16-bit record index.
pub(crate) fn to_record_index(index: usize, what: &str) -> Result<u16, Error> {
    u16::try_from(index).map_err(|_| {
        Error::ValueOutOfRange(format!(
            "{what} index {index} exceeds the 16-bit record index range"
        ))
    })
}

// -------------------------------------------------------------------------------------------------
