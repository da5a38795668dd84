//! Single-sample bit depth conversions
//!
//! The free functions are pure and stateless. [`BitDepthCast`] lifts one of
//! them to whole stereo buffers, writing into a separate target buffer since
//! the sample type changes.

use crate::util::{StereoFrame, I24, LEFT, RIGHT};

/// Widen a 24-bit sample to full-scale 32-bit
pub fn convert_24_to_32(value: I24) -> i32 {
    value.scale32()
}

/// Narrow a 24-bit sample to 16-bit
pub fn convert_24_to_16(value: I24) -> i16 {
    value.scale16()
}

/// Convert a 24-bit sample to float, full scale is ±1.0
pub fn convert_24_to_float(value: I24) -> f32 {
    value.scale_float()
}

/// Narrow a 32-bit sample to 16-bit as `value / i32::MAX * i16::MAX`
pub fn convert_32_to_16(value: i32) -> i16 {
    (value as f64 / i32::MAX as f64 * i16::MAX as f64) as i16
}

/// Applies a single-sample conversion to every channel of every frame
#[derive(Debug, Clone, Copy)]
pub struct BitDepthCast<F, T> {
    cast: fn(F) -> T,
}

impl<F: Copy, T> BitDepthCast<F, T> {
    pub fn new(cast: fn(F) -> T) -> Self {
        BitDepthCast { cast }
    }

    /// Convert `src` into `target`, returning the number of frames written
    ///
    /// Only the frames both buffers have room for are converted.
    pub fn convert(&self, src: &[StereoFrame<F>], target: &mut [StereoFrame<T>]) -> usize {
        let mut count = 0;
        for (from, to) in src.iter().zip(target.iter_mut()) {
            to[LEFT] = (self.cast)(from[LEFT]);
            to[RIGHT] = (self.cast)(from[RIGHT]);
            count += 1;
        }
        count
    }

    /// Convert `src` into a newly allocated buffer
    pub fn convert_to_vec(&self, src: &[StereoFrame<F>]) -> Vec<StereoFrame<T>> {
        src.iter()
            .map(|frame| [(self.cast)(frame[LEFT]), (self.cast)(frame[RIGHT])])
            .collect()
    }
}

impl BitDepthCast<I24, i32> {
    pub fn widen_24_to_32() -> Self {
        Self::new(convert_24_to_32)
    }
}

impl BitDepthCast<I24, i16> {
    pub fn narrow_24_to_16() -> Self {
        Self::new(convert_24_to_16)
    }
}

impl BitDepthCast<I24, f32> {
    pub fn widen_24_to_float() -> Self {
        Self::new(convert_24_to_float)
    }
}

impl BitDepthCast<i32, i16> {
    pub fn narrow_32_to_16() -> Self {
        Self::new(convert_32_to_16)
    }
}
