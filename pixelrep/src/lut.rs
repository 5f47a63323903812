//! Look-up table (LUT) for the modality transformation.
//!
//! This module contains the [`ModalityLut`] data type,
//! which maps each raw sample value that an [`InputPixel`] can hold
//! to its modality value,
//! so that the transform is evaluated once per possible value
//! rather than once per sample.

use num_traits::NumCast;
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use snafu::{ensure, OptionExt, ResultExt, Snafu};

use crate::error::{CreateLutSnafu as CreateLutContext, InvalidArgumentSnafu, Result};
use crate::{InputPixel, ModalityTransform};

/// The largest number of bits stored for which a table is built.
pub const MAX_LUT_BITS: u16 = 16;

/// The LUT could not be created:
/// entry #{index} was mapped to {y_value},
/// which could not be cast to the target type.
#[derive(Debug, PartialEq, Snafu)]
pub struct CreateLutError {
    index: usize,
    y_value: f64,
}

impl CreateLutError {
    /// Get the original index in the LUT.
    pub fn index(&self) -> usize {
        self.index
    }
    /// Get the value which could not be converted to the target type.
    pub fn y_value(&self) -> f64 {
        self.y_value
    }
}

/// A look up table holding the outcome of a modality transform
/// for every raw sample value of an input.
///
/// # Example
///
/// ```
/// # use dicom_pixelrep::{
/// #     InputPixel, ModalityLut, ModalityTransform, Rescale, SampleRepresentation,
/// # };
/// let input = InputPixel::new(512 * 512)
///     .with_bits_stored(12, SampleRepresentation::Unsigned)?;
/// let modality = ModalityTransform::new(Rescale::new(1., -1024.));
/// let lut: ModalityLut<i16> = ModalityLut::new(&input, &modality)?;
///
/// assert_eq!(lut.get(1024_u16), Some(0));
/// # Result::<(), dicom_pixelrep::Error>::Ok(())
/// ```
#[derive(Debug)]
pub struct ModalityLut<T> {
    /// the table which maps an index to a transformed value,
    /// of size 2 to the power of `bits_stored`
    table: Vec<T>,
    /// whether the input sample values are signed (Pixel Representation = 1)
    signed: bool,
}

impl<T: 'static> ModalityLut<T>
where
    T: NumCast,
    T: Copy,
    T: Send + Sync,
{
    /// Create a new LUT for the value range of `input`,
    /// populated with the outputs of the given modality transform.
    ///
    /// Fails if the input stores more than [`MAX_LUT_BITS`] bits per sample,
    /// or if a transformed value does not fit in `T`.
    pub fn new(input: &InputPixel, modality: &ModalityTransform) -> Result<Self> {
        let bits_stored = input.bits_stored();
        ensure!(
            bits_stored <= MAX_LUT_BITS,
            InvalidArgumentSnafu {
                name: "BitsStored",
                value: bits_stored.to_string(),
            }
        );
        let signed = input.representation().is_signed();
        let size = 1_usize << bits_stored;

        #[cfg(feature = "rayon")]
        let iter = (0..size).into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = 0..size;

        let table: Result<Vec<_>, CreateLutError> = iter
            .map(|i| {
                // the upper half of the table holds negative values when signed
                let x = if signed && i >= size / 2 {
                    i as f64 - size as f64
                } else {
                    i as f64
                };
                let value = modality.apply(x);
                T::from(value).context(CreateLutSnafu {
                    index: i,
                    y_value: value,
                })
            })
            .collect();

        Ok(ModalityLut {
            table: table.context(CreateLutContext)?,
            signed,
        })
    }

    /// The number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    /// Never the case for a successfully built table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Transform a single raw sample value.
    ///
    /// Signed sample values are expected
    /// with their bits reinterpreted as their unsigned counterpart.
    /// Returns `None` if an unsigned value is out of the table's range.
    pub fn get<I>(&self, sample_value: I) -> Option<T>
    where
        I: Into<u32>,
    {
        let val = sample_value.into() as usize;
        let index = if self.signed {
            // mask out the extra sign bits
            val & (self.table.len() - 1)
        } else {
            val
        };
        self.table.get(index).copied()
    }

    /// Adapts an iterator of raw sample values
    /// to an iterator of modality values,
    /// skipping values out of the table's range.
    pub fn map_iter<'a, I: 'static>(
        &'a self,
        iter: impl IntoIterator<Item = I> + 'a,
    ) -> impl Iterator<Item = T> + 'a
    where
        I: Into<u32>,
    {
        iter.into_iter().filter_map(move |i| self.get(i))
    }
}
