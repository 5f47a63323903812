//! This crate models the pixel representations of a DICOM image
//! as its pixel data flows from decoded input samples,
//! through the modality transformation,
//! to the samples of a single output frame.
//!
//! Only sample counts and the ownership of the modality transform
//! are kept here.
//! The sample buffers themselves belong to the decoder
//! and to the image storage, and are never copied.
//!
//! - [`InputPixel`] describes the raw samples decoded from the source.
//! - [`MonoPixel`] is a monochrome representation,
//!   optionally attached to a [`ModalityTransform`]
//!   through a reference counted [`SharedModality`] handle.
//! - [`ColorPixel`] is a color representation.
//! - [`MonoOutputPixel`] and [`ColorOutputPixel`]
//!   hold the sample count of one frame.
//!
//! All of them expose their sample count
//! through the [`PixelRepresentation`] trait.
//!
//! # Examples
//!
//! ```
//! # use dicom_pixelrep::{
//! #     InputPixel, ModalityTransform, MonoOutputPixel, MonoPixel,
//! #     PixelRepresentation, Rescale,
//! # };
//! let input = InputPixel::from_geometry(512, 512, 1, 4)?;
//! let modality = ModalityTransform::new(Rescale::new(1., -1024.)).shared();
//!
//! let mono = MonoPixel::from_input(Some(&input), Some(modality.clone()));
//! assert_eq!(ModalityTransform::reference_count(&modality), 2);
//!
//! // pick the first two frames, sharing the same transform
//! let frames = mono.reframe(2 * 512 * 512);
//! assert_eq!(ModalityTransform::reference_count(&modality), 3);
//!
//! let output = MonoOutputPixel::new(Some(&frames), 2)?;
//! assert_eq!(output.sample_count(), 512 * 512);
//!
//! drop(frames);
//! drop(mono);
//! assert_eq!(ModalityTransform::reference_count(&modality), 1);
//! # Result::<(), dicom_pixelrep::Error>::Ok(())
//! ```

mod color;
mod error;
mod input;
mod mono;
mod output;
mod transform;

pub mod lut;

pub use color::{ColorPixel, PlanarConfiguration};
pub use error::{Error, Result};
pub use input::{InputPixel, SampleRepresentation};
pub use lut::{CreateLutError, ModalityLut};
pub use mono::MonoPixel;
pub use output::{ColorOutputPixel, MonoOutputPixel};
pub use transform::{ModalityTransform, Rescale, SharedModality};

/// Common interface of all pixel representations.
pub trait PixelRepresentation {
    /// The number of samples held by this representation.
    fn sample_count(&self) -> usize;
}

impl<T: ?Sized> PixelRepresentation for &T
where
    T: PixelRepresentation,
{
    #[inline]
    fn sample_count(&self) -> usize {
        (**self).sample_count()
    }
}
