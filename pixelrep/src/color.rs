//! Color pixel representation.

use std::convert::TryFrom;

use snafu::ensure;

use crate::error::{Error, InvalidArgumentSnafu, Result};
use crate::{InputPixel, PixelRepresentation};

/// An interpreted representation of the DICOM _Planar Configuration_ attribute.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum PlanarConfiguration {
    /// color samples are interleaved pixel by pixel (R1G1B1R2G2B2...)
    #[default]
    Interleaved,
    /// each color plane is stored separately (R1R2...G1G2...B1B2...)
    Planar,
}

impl TryFrom<u16> for PlanarConfiguration {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(PlanarConfiguration::Interleaved),
            1 => Ok(PlanarConfiguration::Planar),
            _ => InvalidArgumentSnafu {
                name: "PlanarConfiguration",
                value: value.to_string(),
            }
            .fail(),
        }
    }
}

/// A color pixel representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPixel {
    sample_count: usize,
    samples_per_pixel: u16,
    planar_configuration: PlanarConfiguration,
}

impl ColorPixel {
    /// Create a color pixel representation of `sample_count` samples,
    /// three samples per pixel, interleaved.
    pub fn new(sample_count: usize) -> Self {
        ColorPixel {
            sample_count,
            samples_per_pixel: 3,
            planar_configuration: PlanarConfiguration::Interleaved,
        }
    }

    /// Create a color pixel representation from decoded input samples.
    ///
    /// An absent input yields a representation with zero samples.
    /// `samples_per_pixel` must not be zero.
    pub fn from_input(input: Option<&InputPixel>, samples_per_pixel: u16) -> Result<Self> {
        ensure!(
            samples_per_pixel > 0,
            InvalidArgumentSnafu {
                name: "SamplesPerPixel",
                value: "0",
            }
        );
        Ok(ColorPixel {
            sample_count: input.map_or(0, |input| input.sample_count()),
            samples_per_pixel,
            planar_configuration: PlanarConfiguration::Interleaved,
        })
    }

    /// Declare how color samples are laid out.
    pub fn with_planar_configuration(self, planar_configuration: PlanarConfiguration) -> Self {
        ColorPixel {
            planar_configuration,
            ..self
        }
    }

    /// The number of samples making up each pixel.
    #[inline]
    pub fn samples_per_pixel(&self) -> u16 {
        self.samples_per_pixel
    }

    /// How color samples are laid out.
    #[inline]
    pub fn planar_configuration(&self) -> PlanarConfiguration {
        self.planar_configuration
    }

    /// The number of whole pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.sample_count / self.samples_per_pixel as usize
    }
}

impl PixelRepresentation for ColorPixel {
    #[inline]
    fn sample_count(&self) -> usize {
        self.sample_count
    }
}
