//! Modality transformation of raw pixel sample values,
//! and its shared handle.

use std::sync::Arc;

use tracing::trace;

/// Description of a modality rescale function,
/// defined by a _rescale slope_ and _rescale intercept_.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rescale {
    /// the rescale slope
    pub slope: f64,
    /// the rescale intercept
    pub intercept: f64,
}

impl Rescale {
    /// Create a new rescale function.
    #[inline]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Rescale { slope, intercept }
    }

    /// The rescale function which leaves values untouched
    /// (slope 1, intercept 0).
    #[inline]
    pub fn identity() -> Self {
        Rescale::new(1., 0.)
    }

    /// Apply the rescale function to a value.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        self.slope * value + self.intercept
    }
}

impl Default for Rescale {
    fn default() -> Self {
        Rescale::identity()
    }
}

/// A shared handle to a modality transform.
///
/// Each [`MonoPixel`](crate::MonoPixel) attached to the transform
/// holds one unit of the reference count,
/// which is released when the pixel representation is dropped.
pub type SharedModality = Arc<ModalityTransform>;

/// The modality transformation,
/// which turns raw device sample values
/// into modality values (such as Hounsfield units).
#[derive(Debug, PartialEq)]
pub struct ModalityTransform {
    rescale: Rescale,
}

impl ModalityTransform {
    /// Create a modality transform based on a rescale function.
    pub fn new(rescale: Rescale) -> Self {
        ModalityTransform { rescale }
    }

    /// Create a modality transform which does not change sample values.
    pub fn identity() -> Self {
        Self::new(Rescale::identity())
    }

    /// Move the transform into a shared handle.
    /// The new handle starts with a reference count of 1.
    pub fn shared(self) -> SharedModality {
        trace!(
            slope = self.rescale.slope,
            intercept = self.rescale.intercept,
            "Creating shared modality transform"
        );
        Arc::new(self)
    }

    /// Retrieve the number of live handles to the given transform.
    #[inline]
    pub fn reference_count(this: &SharedModality) -> usize {
        Arc::strong_count(this)
    }

    /// The underlying rescale function.
    #[inline]
    pub fn rescale(&self) -> Rescale {
        self.rescale
    }

    /// Whether applying this transform leaves all values unchanged.
    pub fn is_identity(&self) -> bool {
        self.rescale == Rescale::identity()
    }

    /// Apply the transform to a single raw sample value.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        self.rescale.apply(value)
    }

    /// Apply the transform to a range of raw values,
    /// yielding the range of output values in ascending order.
    pub fn apply_range(&self, (min, max): (f64, f64)) -> (f64, f64) {
        let (a, b) = (self.apply(min), self.apply(max));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Drop for ModalityTransform {
    fn drop(&mut self) {
        trace!("Releasing modality transform");
    }
}
