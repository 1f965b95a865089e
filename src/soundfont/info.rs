use four_cc::FourCC;

use crate::{
    chunk::{Chunk, TextChunk, VersionChunk},
    error::Error,
};

// -------------------------------------------------------------------------------------------------

/// A major.minor version number, as stored in the "ifil" and "iver" INFO sub-chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

// -------------------------------------------------------------------------------------------------

/// Maximum length of an INFO text, excluding the terminator byte.
pub const MAX_INFO_TEXT_LENGTH: usize = 255;
/// Maximum length of the "ICMT" comment text, excluding the terminator byte.
pub const MAX_COMMENT_LENGTH: usize = 65535;

fn check_text(what: &str, text: &str, max_len: usize) -> Result<(), Error> {
    if text.len() > max_len {
        return Err(Error::ValueOutOfRange(format!(
            "{what} is {} bytes long, but must not exceed {max_len} bytes",
            text.len()
        )));
    }
    Ok(())
}

// -------------------------------------------------------------------------------------------------

/// Bank level meta data of a SoundFont, written into the "INFO" list.
///
/// The file format version, sound engine and bank name are always written, all other texts only
/// when set.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    sound_engine: String,
    bank_name: String,
    rom_name: Option<String>,
    rom_version: Option<Version>,
    creation_date: Option<String>,
    engineers: Option<String>,
    product: Option<String>,
    copyright: Option<String>,
    comment: Option<String>,
    software: Option<String>,
}

impl Info {
    /// The SoundFont format version this crate writes.
    pub const FILE_VERSION: Version = Version::new(2, 4);

    pub const DEFAULT_SOUND_ENGINE: &'static str = "EMU8000";
    pub const DEFAULT_BANK_NAME: &'static str = "Untitled";

    pub fn new() -> Self {
        Self {
            sound_engine: Self::DEFAULT_SOUND_ENGINE.to_string(),
            bank_name: Self::DEFAULT_BANK_NAME.to_string(),
            rom_name: None,
            rom_version: None,
            creation_date: None,
            engineers: None,
            product: None,
            copyright: None,
            comment: None,
            software: None,
        }
    }

    /// Target sound engine ("isng").
    pub fn sound_engine(&self) -> &str {
        &self.sound_engine
    }

    pub fn set_sound_engine(&mut self, sound_engine: &str) -> Result<(), Error> {
        check_text("Sound engine", sound_engine, MAX_INFO_TEXT_LENGTH)?;
        self.sound_engine = sound_engine.to_string();
        Ok(())
    }

    /// Bank name ("INAM").
    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn set_bank_name(&mut self, bank_name: &str) -> Result<(), Error> {
        check_text("Bank name", bank_name, MAX_INFO_TEXT_LENGTH)?;
        self.bank_name = bank_name.to_string();
        Ok(())
    }

    /// Sound ROM name ("irom").
    pub fn rom_name(&self) -> Option<&str> {
        self.rom_name.as_deref()
    }

    pub fn set_rom_name(&mut self, rom_name: &str) -> Result<(), Error> {
        check_text("ROM name", rom_name, MAX_INFO_TEXT_LENGTH)?;
        self.rom_name = Some(rom_name.to_string());
        Ok(())
    }

    pub fn reset_rom_name(&mut self) {
        self.rom_name = None;
    }

    /// Sound ROM version ("iver").
    pub fn rom_version(&self) -> Option<Version> {
        self.rom_version
    }

    pub fn set_rom_version(&mut self, rom_version: Version) {
        self.rom_version = Some(rom_version);
    }

    pub fn reset_rom_version(&mut self) {
        self.rom_version = None;
    }

    /// Creation date ("ICRD"), conventionally "Month Day, Year".
    pub fn creation_date(&self) -> Option<&str> {
        self.creation_date.as_deref()
    }

    pub fn set_creation_date(&mut self, creation_date: &str) -> Result<(), Error> {
        check_text("Creation date", creation_date, MAX_INFO_TEXT_LENGTH)?;
        self.creation_date = Some(creation_date.to_string());
        Ok(())
    }

    pub fn reset_creation_date(&mut self) {
        self.creation_date = None;
    }

    /// Sound designers and engineers ("IENG").
    pub fn engineers(&self) -> Option<&str> {
        self.engineers.as_deref()
    }

    pub fn set_engineers(&mut self, engineers: &str) -> Result<(), Error> {
        check_text("Engineers", engineers, MAX_INFO_TEXT_LENGTH)?;
        self.engineers = Some(engineers.to_string());
        Ok(())
    }

    pub fn reset_engineers(&mut self) {
        self.engineers = None;
    }

    /// Product the bank is intended for ("IPRD").
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn set_product(&mut self, product: &str) -> Result<(), Error> {
        check_text("Product", product, MAX_INFO_TEXT_LENGTH)?;
        self.product = Some(product.to_string());
        Ok(())
    }

    pub fn reset_product(&mut self) {
        self.product = None;
    }

    /// Copyright message ("ICOP").
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn set_copyright(&mut self, copyright: &str) -> Result<(), Error> {
        check_text("Copyright", copyright, MAX_INFO_TEXT_LENGTH)?;
        self.copyright = Some(copyright.to_string());
        Ok(())
    }

    pub fn reset_copyright(&mut self) {
        self.copyright = None;
    }

    /// Comment ("ICMT").
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: &str) -> Result<(), Error> {
        check_text("Comment", comment, MAX_COMMENT_LENGTH)?;
        self.comment = Some(comment.to_string());
        Ok(())
    }

    pub fn reset_comment(&mut self) {
        self.comment = None;
    }

    /// Tools used to create and edit the bank ("ISFT").
    pub fn software(&self) -> Option<&str> {
        self.software.as_deref()
    }

    pub fn set_software(&mut self, software: &str) -> Result<(), Error> {
        check_text("Software", software, MAX_INFO_TEXT_LENGTH)?;
        self.software = Some(software.to_string());
        Ok(())
    }

    pub fn reset_software(&mut self) {
        self.software = None;
    }

    /// The INFO sub-chunks in the order they are written.
    pub(crate) fn chunks(&self) -> Vec<Box<dyn Chunk + '_>> {
        let mut chunks: Vec<Box<dyn Chunk + '_>> = Vec::new();
        chunks.push(Box::new(VersionChunk::new(
            FourCC(*b"ifil"),
            Self::FILE_VERSION,
        )));
        chunks.push(Box::new(TextChunk::new(
            FourCC(*b"isng"),
            &self.sound_engine,
        )));
        chunks.push(Box::new(TextChunk::new(FourCC(*b"INAM"), &self.bank_name)));
        if let Some(rom_name) = &self.rom_name {
            chunks.push(Box::new(TextChunk::new(FourCC(*b"irom"), rom_name)));
        }
        if let Some(rom_version) = self.rom_version {
            chunks.push(Box::new(VersionChunk::new(FourCC(*b"iver"), rom_version)));
        }
        for (name, text) in [
            (*b"ICRD", &self.creation_date),
            (*b"IENG", &self.engineers),
            (*b"IPRD", &self.product),
            (*b"ICOP", &self.copyright),
            (*b"ICMT", &self.comment),
            (*b"ISFT", &self.software),
        ] {
            if let Some(text) = text {
                chunks.push(Box::new(TextChunk::new(FourCC(name), text)));
            }
        }
        chunks
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new()
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_limits() {
        let mut info = Info::new();
        assert!(info.set_bank_name(&"b".repeat(255)).is_ok());
        assert!(matches!(
            info.set_bank_name(&"b".repeat(256)),
            Err(Error::ValueOutOfRange(_))
        ));
        assert_eq!(info.bank_name().len(), 255);

        assert!(info.set_comment(&"c".repeat(1000)).is_ok());
        assert!(info.set_comment(&"c".repeat(65536)).is_err());
        assert_eq!(info.comment().map(str::len), Some(1000));
    }

    #[test]
    fn chunk_order() {
        let mut info = Info::new();
        let names = |info: &Info| {
            info.chunks()
                .iter()
                .map(|chunk| chunk.name())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            names(&info),
            vec![FourCC(*b"ifil"), FourCC(*b"isng"), FourCC(*b"INAM")]
        );

        info.set_software("sf2forge").unwrap();
        info.set_rom_version(Version::new(1, 0));
        info.set_rom_name("ROM").unwrap();
        info.set_copyright("CC0").unwrap();
        assert_eq!(
            names(&info),
            vec![
                FourCC(*b"ifil"),
                FourCC(*b"isng"),
                FourCC(*b"INAM"),
                FourCC(*b"irom"),
                FourCC(*b"iver"),
                FourCC(*b"ICOP"),
                FourCC(*b"ISFT"),
            ]
        );

        info.reset_rom_name();
        info.reset_rom_version();
        assert_eq!(names(&info).len(), 5);
    }
}
