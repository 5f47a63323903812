//! Error types for pixel representation construction.

use snafu::{Backtrace, Snafu};

use crate::lut::CreateLutError;

/// An error which may occur when building a pixel representation.
///
/// Absent source representations are never an error:
/// they are taken as holding zero samples.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Invalid value `{value}` for argument `{name}`
    InvalidArgument {
        name: &'static str,
        value: String,
        backtrace: Backtrace,
    },

    /// Frame #{index} is out of range for {frame_count} frame(s)
    FrameOutOfRange {
        index: u32,
        frame_count: u32,
        backtrace: Backtrace,
    },

    /// Could not create modality lookup table
    CreateLut {
        source: CreateLutError,
        backtrace: Backtrace,
    },
}

/// Alias for the result of building a pixel representation.
pub type Result<T, E = Error> = std::result::Result<T, E>;
