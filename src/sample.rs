//! SoundFont samples, see "7.10 The SHDR Sub-chunk".

use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::{
    attach::AttachedMut,
    error::Error,
    soundfont::SoundFontId,
    utils::{check_name, unique_usize_id},
};

// -------------------------------------------------------------------------------------------------

/// A unique id of a [`Sample`]. Instrument zones and linked samples refer to samples by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleId(usize);

impl SampleId {
    fn new() -> Self {
        Self(unique_usize_id())
    }
}

// -------------------------------------------------------------------------------------------------

/// Sample type and channel layout, see "7.10 The SHDR Sub-chunk", sfSampleType.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, FromRepr,
)]
#[repr(u16)]
pub enum SampleLink {
    #[default]
    Mono = 1,
    Right = 2,
    Left = 4,
    Linked = 8,
    RomMono = 0x8001,
    RomRight = 0x8002,
    RomLeft = 0x8004,
    RomLinked = 0x8008,
}

impl SampleLink {
    pub const fn raw(self) -> u16 {
        self as u16
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::from_repr(raw)
    }
}

// -------------------------------------------------------------------------------------------------

/// A mono, 16-bit PCM sample with loop points and pitch information.
#[derive(Debug)]
pub struct Sample {
    id: SampleId,
    name: String,
    data: Vec<i16>,
    start_loop: u32,
    end_loop: u32,
    sample_rate: u32,
    original_key: u8,
    correction: i8,
    link: Option<SampleId>,
    sample_type: SampleLink,
    parent_file: Option<SoundFontId>,
}

impl Sample {
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    pub const DEFAULT_ORIGINAL_KEY: u8 = 60;
    /// Original key value for unpitched samples.
    pub const UNPITCHED_KEY: u8 = 255;

    /// Creates a new empty mono sample.
    ///
    /// Fails when the name exceeds [`MAX_NAME_LENGTH`](crate::MAX_NAME_LENGTH) bytes.
    pub fn new(name: &str) -> Result<Self, Error> {
        check_name(name)?;
        Ok(Self {
            id: SampleId::new(),
            name: name.to_owned(),
            data: Vec::new(),
            start_loop: 0,
            end_loop: 0,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            original_key: Self::DEFAULT_ORIGINAL_KEY,
            correction: 0,
            link: None,
            sample_type: SampleLink::Mono,
            parent_file: None,
        })
    }

    /// Creates a new mono sample with the given data, looping over the entire data.
    pub fn with_data(name: &str, data: Vec<i16>, sample_rate: u32) -> Result<Self, Error> {
        let mut sample = Self::new(name)?;
        sample.set_sample_rate(sample_rate)?;
        sample.set_data(data)?;
        Ok(sample)
    }

    pub fn id(&self) -> SampleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name. On errors, the previous name is kept.
    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        check_name(name)?;
        self.name = name.to_owned();
        Ok(())
    }

    pub fn data(&self) -> &[i16] {
        &self.data
    }

    /// Replaces the sample data and resets the loop to span the entire data.
    pub fn set_data(&mut self, data: Vec<i16>) -> Result<(), Error> {
        let len = u32::try_from(data.len()).map_err(|_| {
            Error::ValueOutOfRange(format!(
                "Sample data of {} points exceeds the 32-bit sample offset range",
                data.len()
            ))
        })?;
        self.data = data;
        self.start_loop = 0;
        self.end_loop = len;
        Ok(())
    }

    /// Loop start, in sample points relative to the start of the sample data.
    pub fn start_loop(&self) -> u32 {
        self.start_loop
    }

    /// Loop end, in sample points relative to the start of the sample data.
    pub fn end_loop(&self) -> u32 {
        self.end_loop
    }

    /// Sets the loop points. Both must lie within the sample data and start must not exceed end.
    pub fn set_loop(&mut self, start_loop: u32, end_loop: u32) -> Result<(), Error> {
        if start_loop > end_loop || end_loop as usize > self.data.len() {
            return Err(Error::ValueOutOfRange(format!(
                "Loop {start_loop}..{end_loop} does not fit into sample '{}' of {} points",
                self.name,
                self.data.len()
            )));
        }
        self.start_loop = start_loop;
        self.end_loop = end_loop;
        Ok(())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), Error> {
        if sample_rate == 0 {
            return Err(Error::ValueOutOfRange(
                "Sample rate must not be zero".to_string(),
            ));
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    /// MIDI key number of the recorded pitch, or [`Self::UNPITCHED_KEY`].
    pub fn original_key(&self) -> u8 {
        self.original_key
    }

    pub fn set_original_key(&mut self, original_key: u8) -> Result<(), Error> {
        if original_key > 127 && original_key != Self::UNPITCHED_KEY {
            return Err(Error::ValueOutOfRange(format!(
                "Original key {original_key} must be a MIDI key number or {}",
                Self::UNPITCHED_KEY
            )));
        }
        self.original_key = original_key;
        Ok(())
    }

    /// Pitch correction in cents.
    pub fn correction(&self) -> i8 {
        self.correction
    }

    pub fn set_correction(&mut self, correction: i8) {
        self.correction = correction;
    }

    /// The other channel of a stereo or linked sample.
    pub fn link(&self) -> Option<SampleId> {
        self.link
    }

    pub fn set_link(&mut self, link: SampleId) {
        self.link = Some(link);
    }

    pub fn reset_link(&mut self) -> Option<SampleId> {
        self.link.take()
    }

    pub fn sample_type(&self) -> SampleLink {
        self.sample_type
    }

    pub fn set_sample_type(&mut self, sample_type: SampleLink) {
        self.sample_type = sample_type;
    }

    pub fn has_parent_file(&self) -> bool {
        self.parent_file.is_some()
    }

    /// The file this sample is attached to, if any.
    pub fn parent_file(&self) -> Option<SoundFontId> {
        self.parent_file
    }

    pub(crate) fn set_parent_file(&mut self, parent_file: Option<SoundFontId>) {
        self.parent_file = parent_file;
    }
}

/// Setters of a sample which is owned by a file.
impl AttachedMut<'_, Sample> {
    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.target_mut().set_name(name)
    }

    pub fn set_data(&mut self, data: Vec<i16>) -> Result<(), Error> {
        self.target_mut().set_data(data)
    }

    pub fn set_loop(&mut self, start_loop: u32, end_loop: u32) -> Result<(), Error> {
        self.target_mut().set_loop(start_loop, end_loop)
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), Error> {
        self.target_mut().set_sample_rate(sample_rate)
    }

    pub fn set_original_key(&mut self, original_key: u8) -> Result<(), Error> {
        self.target_mut().set_original_key(original_key)
    }

    pub fn set_correction(&mut self, correction: i8) {
        self.target_mut().set_correction(correction);
    }

    pub fn set_link(&mut self, link: SampleId) {
        self.target_mut().set_link(link);
    }

    pub fn reset_link(&mut self) -> Option<SampleId> {
        self.target_mut().reset_link()
    }

    pub fn set_sample_type(&mut self, sample_type: SampleLink) {
        self.target_mut().set_sample_type(sample_type);
    }
}

/// Clones get a new id and are not attached to any file.
impl Clone for Sample {
    fn clone(&self) -> Self {
        Self {
            id: SampleId::new(),
            name: self.name.clone(),
            data: self.data.clone(),
            start_loop: self.start_loop,
            end_loop: self.end_loop,
            sample_rate: self.sample_rate,
            original_key: self.original_key,
            correction: self.correction,
            link: self.link,
            sample_type: self.sample_type,
            parent_file: None,
        }
    }
}

// -------------------------------------------------------------------------------------------------
