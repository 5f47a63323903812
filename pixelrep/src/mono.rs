//! Monochrome pixel representation.

use std::sync::Arc;

use num_traits::NumCast;
use tracing::trace;

use crate::error::Result;
use crate::{ColorPixel, InputPixel, ModalityLut, ModalityTransform, PixelRepresentation, SharedModality};

/// A monochrome pixel representation,
/// optionally attached to a shared modality transform.
///
/// The sample count is always derived from the source
/// this representation was built from.
/// A held modality transform stays alive
/// for as long as this representation does,
/// and is released exactly once when it is dropped.
#[derive(Debug)]
pub struct MonoPixel {
    sample_count: usize,
    modality: Option<SharedModality>,
}

impl MonoPixel {
    /// Create a monochrome pixel representation of `sample_count` samples
    /// without a modality transform.
    pub fn new(sample_count: usize) -> Self {
        MonoPixel {
            sample_count,
            modality: None,
        }
    }

    /// Create a monochrome pixel representation from decoded input samples.
    ///
    /// An absent input yields a representation with zero samples.
    /// The modality handle is moved in as is:
    /// the caller gives away its unit of the reference count
    /// to the new representation.
    pub fn from_input(input: Option<&InputPixel>, modality: Option<SharedModality>) -> Self {
        let sample_count = match input {
            Some(input) => input.sample_count(),
            None => 0,
        };
        if let Some(modality) = &modality {
            trace!(
                sample_count,
                owners = ModalityTransform::reference_count(modality),
                "Attaching modality transform"
            );
        }
        MonoPixel {
            sample_count,
            modality,
        }
    }

    /// Create a monochrome pixel representation
    /// with the sample count of a color pixel representation.
    pub fn from_color(color: &ColorPixel) -> Self {
        Self::new(color.sample_count())
    }

    /// Create a monochrome pixel representation of `sample_count` samples
    /// which shares this representation's modality transform, if any.
    ///
    /// The transform's reference count grows by one,
    /// and shrinks back when the new representation is dropped.
    pub fn reframe(&self, sample_count: usize) -> Self {
        let modality = self.modality.as_ref().map(Arc::clone);
        if let Some(modality) = &modality {
            trace!(
                sample_count,
                owners = ModalityTransform::reference_count(modality),
                "Sharing modality transform"
            );
        }
        MonoPixel {
            sample_count,
            modality,
        }
    }

    /// The modality transform attached to this representation.
    #[inline]
    pub fn modality(&self) -> Option<&SharedModality> {
        self.modality.as_ref()
    }

    /// Whether a modality transform is attached.
    #[inline]
    pub fn has_modality(&self) -> bool {
        self.modality.is_some()
    }

    /// The range of values which samples of `input`
    /// take after the modality transform.
    ///
    /// Without a modality transform this is the raw value range.
    pub fn modality_value_range(&self, input: &InputPixel) -> (f64, f64) {
        let range = input.value_range();
        match &self.modality {
            Some(modality) => modality.apply_range(range),
            None => range,
        }
    }

    /// Build a lookup table mapping every raw value of `input`
    /// to its modality value.
    ///
    /// Without a modality transform the table is the identity.
    pub fn modality_lut<T>(&self, input: &InputPixel) -> Result<ModalityLut<T>>
    where
        T: NumCast + Copy + Send + Sync + 'static,
    {
        match &self.modality {
            Some(modality) => ModalityLut::new(input, modality),
            None => ModalityLut::new(input, &ModalityTransform::identity()),
        }
    }
}

impl Clone for MonoPixel {
    /// Share the modality transform with a representation
    /// of the same sample count.
    fn clone(&self) -> Self {
        self.reframe(self.sample_count)
    }
}

impl Drop for MonoPixel {
    fn drop(&mut self) {
        if let Some(modality) = &self.modality {
            trace!(
                owners = ModalityTransform::reference_count(modality) - 1,
                "Detaching modality transform"
            );
        }
    }
}

impl From<&ColorPixel> for MonoPixel {
    fn from(color: &ColorPixel) -> Self {
        MonoPixel::from_color(color)
    }
}

impl PixelRepresentation for MonoPixel {
    #[inline]
    fn sample_count(&self) -> usize {
        self.sample_count
    }
}
