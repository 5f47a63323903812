//! Output pixel representations, holding one frame's worth of samples.
//!
//! An output representation only takes the sample count of its source
//! at construction time,
//! and keeps no relationship with the source afterwards.

use std::ops::Range;

use snafu::ensure;
use tracing::{debug, warn};

use crate::error::{FrameOutOfRangeSnafu, InvalidArgumentSnafu, Result};
use crate::{ColorPixel, MonoPixel, PixelRepresentation};

/// Divide the sample count of an optional source by the number of frames.
fn samples_per_frame(source_count: Option<usize>, frame_count: u32) -> Result<usize> {
    ensure!(
        frame_count > 0,
        InvalidArgumentSnafu {
            name: "frame_count",
            value: "0",
        }
    );

    let Some(source_count) = source_count else {
        return Ok(0);
    };
    let frame_count = frame_count as usize;
    if source_count % frame_count != 0 {
        warn!(
            source_count,
            frame_count, "Sample count is not a multiple of the number of frames"
        );
    }
    let sample_count = source_count / frame_count;
    debug!(source_count, frame_count, sample_count, "Derived output frame size");
    Ok(sample_count)
}

/// The range of samples of frame #`index` within the source buffer.
fn frame_range(sample_count: usize, frame_count: u32, index: u32) -> Result<Range<usize>> {
    ensure!(
        index < frame_count,
        FrameOutOfRangeSnafu { index, frame_count }
    );
    let start = sample_count * index as usize;
    Ok(start..start + sample_count)
}

/// Monochrome output pixel representation for a single frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonoOutputPixel {
    sample_count: usize,
    frame_count: u32,
}

impl MonoOutputPixel {
    /// Derive the output representation of one frame
    /// out of a source with `frame_count` frames.
    ///
    /// An absent source yields zero samples.
    /// Fails if `frame_count` is zero.
    pub fn new(source: Option<&MonoPixel>, frame_count: u32) -> Result<Self> {
        let sample_count = samples_per_frame(source.map(|s| s.sample_count()), frame_count)?;
        Ok(MonoOutputPixel {
            sample_count,
            frame_count,
        })
    }

    /// The number of frames in the source.
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// The range of samples of the given frame (0-indexed)
    /// within the source sample buffer.
    pub fn frame_range(&self, index: u32) -> Result<Range<usize>> {
        frame_range(self.sample_count, self.frame_count, index)
    }
}

impl PixelRepresentation for MonoOutputPixel {
    #[inline]
    fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Color output pixel representation for a single frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColorOutputPixel {
    sample_count: usize,
    frame_count: u32,
    samples_per_pixel: u16,
}

impl ColorOutputPixel {
    /// Derive the output representation of one frame
    /// out of a source with `frame_count` frames.
    ///
    /// An absent source yields zero samples.
    /// Fails if `frame_count` is zero.
    pub fn new(source: Option<&ColorPixel>, frame_count: u32) -> Result<Self> {
        let sample_count = samples_per_frame(source.map(|s| s.sample_count()), frame_count)?;
        Ok(ColorOutputPixel {
            sample_count,
            frame_count,
            samples_per_pixel: source.map_or(3, |s| s.samples_per_pixel()),
        })
    }

    /// The number of frames in the source.
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// The number of whole pixels in one frame.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.sample_count / self.samples_per_pixel as usize
    }

    /// The range of samples of the given frame (0-indexed)
    /// within the source sample buffer.
    pub fn frame_range(&self, index: u32) -> Result<Range<usize>> {
        frame_range(self.sample_count, self.frame_count, index)
    }
}

impl PixelRepresentation for ColorOutputPixel {
    #[inline]
    fn sample_count(&self) -> usize {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rstest::rstest;

    #[rstest]
    #[case(100, 4, 25)]
    #[case(7, 2, 3)]
    #[case(262_144, 1, 262_144)]
    #[case(3, 5, 0)]
    fn mono_output_divides_by_frames(
        #[case] samples: usize,
        #[case] frames: u32,
        #[case] expected: usize,
    ) {
        let mono = MonoPixel::new(samples);
        let output = MonoOutputPixel::new(Some(&mono), frames).unwrap();
        assert_eq!(output.sample_count(), expected);
        assert_eq!(output.frame_count(), frames);
    }

    #[rstest]
    #[case(300, 3, 100)]
    #[case(7, 2, 3)]
    fn color_output_divides_by_frames(
        #[case] samples: usize,
        #[case] frames: u32,
        #[case] expected: usize,
    ) {
        let color = ColorPixel::new(samples);
        let output = ColorOutputPixel::new(Some(&color), frames).unwrap();
        assert_eq!(output.sample_count(), expected);
    }

    #[test]
    fn output_from_absent_source() {
        let output = MonoOutputPixel::new(None, 5).unwrap();
        assert_eq!(output.sample_count(), 0);
        let output = ColorOutputPixel::new(None, 5).unwrap();
        assert_eq!(output.sample_count(), 0);
        assert_eq!(output.pixel_count(), 0);
    }

    #[test]
    fn output_zero_frames_is_rejected() {
        let mono = MonoPixel::new(100);
        let err = MonoOutputPixel::new(Some(&mono), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "frame_count", .. }));

        // also when the source is absent
        assert!(MonoOutputPixel::new(None, 0).is_err());
        assert!(ColorOutputPixel::new(Some(&ColorPixel::new(9)), 0).is_err());
        assert!(ColorOutputPixel::new(None, 0).is_err());
    }

    #[test]
    fn output_frame_ranges() {
        let mono = MonoPixel::new(100);
        let output = MonoOutputPixel::new(Some(&mono), 4).unwrap();
        assert_eq!(output.frame_range(0).unwrap(), 0..25);
        assert_eq!(output.frame_range(3).unwrap(), 75..100);

        let err = output.frame_range(4).unwrap_err();
        assert!(matches!(
            err,
            Error::FrameOutOfRange {
                index: 4,
                frame_count: 4,
                ..
            }
        ));
    }

    #[test]
    fn color_output_pixel_count() {
        let color = ColorPixel::new(60_000);
        let output = ColorOutputPixel::new(Some(&color), 2).unwrap();
        assert_eq!(output.sample_count(), 30_000);
        assert_eq!(output.pixel_count(), 10_000);
        assert_eq!(output.frame_range(1).unwrap(), 30_000..60_000);
    }

    #[test]
    fn output_outlives_source() {
        let mono = MonoPixel::new(48);
        let output = MonoOutputPixel::new(Some(&mono), 3).unwrap();
        drop(mono);
        assert_eq!(output.sample_count(), 16);
    }
}
