//! Common utilities and data structures

pub mod int24;
pub mod sample;
pub mod samplefmt;

pub use int24::I24;
pub use sample::Sample;
pub use samplefmt::SampleFormat;

/// One interleaved stereo frame: `[left, right]`
pub type StereoFrame<T> = [T; 2];

/// Channel index of the left sample in a [`StereoFrame`]
pub const LEFT: usize = 0;
/// Channel index of the right sample in a [`StereoFrame`]
pub const RIGHT: usize = 1;
