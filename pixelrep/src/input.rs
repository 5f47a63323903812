//! Raw sample input, as handed over by a pixel data decoder.

use std::convert::TryFrom;

use snafu::{ensure, OptionExt};

use crate::error::{Error, InvalidArgumentSnafu, Result};
use crate::PixelRepresentation;

/// An interpreted representation of the DICOM _Pixel Representation_ attribute.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum SampleRepresentation {
    /// unsigned pixel data sample values
    #[default]
    Unsigned,
    /// signed pixel data sample values
    Signed,
}

impl SampleRepresentation {
    /// Whether sample values are to be interpreted as signed.
    #[inline]
    pub fn is_signed(self) -> bool {
        self == SampleRepresentation::Signed
    }
}

impl TryFrom<u16> for SampleRepresentation {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(SampleRepresentation::Unsigned),
            1 => Ok(SampleRepresentation::Signed),
            _ => InvalidArgumentSnafu {
                name: "PixelRepresentation",
                value: value.to_string(),
            }
            .fail(),
        }
    }
}

/// The raw samples decoded from a source image.
///
/// Only the bookkeeping is kept here:
/// the sample buffer itself belongs to the decoder.
#[derive(Debug, PartialEq, Eq)]
pub struct InputPixel {
    sample_count: usize,
    bits_stored: u16,
    representation: SampleRepresentation,
}

impl InputPixel {
    /// Create an input pixel description of `sample_count` raw samples,
    /// 16 bits stored, unsigned.
    pub fn new(sample_count: usize) -> Self {
        InputPixel {
            sample_count,
            bits_stored: 16,
            representation: SampleRepresentation::Unsigned,
        }
    }

    /// Create an input pixel description
    /// from the image geometry of the source object.
    ///
    /// The sample count is
    /// `rows * columns * samples_per_pixel * number_of_frames`.
    pub fn from_geometry(
        rows: u16,
        columns: u16,
        samples_per_pixel: u16,
        number_of_frames: u32,
    ) -> Result<Self> {
        let sample_count = (rows as usize)
            .checked_mul(columns as usize)
            .and_then(|n| n.checked_mul(samples_per_pixel as usize))
            .and_then(|n| n.checked_mul(number_of_frames as usize))
            .context(InvalidArgumentSnafu {
                name: "NumberOfFrames",
                value: number_of_frames.to_string(),
            })?;
        Ok(Self::new(sample_count))
    }

    /// Declare how many bits of each sample are used
    /// and whether samples are signed.
    ///
    /// `bits_stored` must be between 1 and 32.
    pub fn with_bits_stored(
        self,
        bits_stored: u16,
        representation: SampleRepresentation,
    ) -> Result<Self> {
        ensure!(
            (1..=32).contains(&bits_stored),
            InvalidArgumentSnafu {
                name: "BitsStored",
                value: bits_stored.to_string(),
            }
        );
        Ok(InputPixel {
            bits_stored,
            representation,
            ..self
        })
    }

    /// The number of bits effectively used by each sample.
    #[inline]
    pub fn bits_stored(&self) -> u16 {
        self.bits_stored
    }

    /// The sample representation (signedness).
    #[inline]
    pub fn representation(&self) -> SampleRepresentation {
        self.representation
    }

    /// The minimum and maximum raw values
    /// which a sample of this input can hold.
    pub fn value_range(&self) -> (f64, f64) {
        let size = 2_f64.powi(self.bits_stored as i32);
        match self.representation {
            SampleRepresentation::Unsigned => (0., size - 1.),
            SampleRepresentation::Signed => (-size / 2., size / 2. - 1.),
        }
    }
}

impl PixelRepresentation for InputPixel {
    #[inline]
    fn sample_count(&self) -> usize {
        self.sample_count
    }
}
