//! In-place stereo sample converters
//!
//! `AutoCenter` and `FillLeftRight` calibrate from the first usable buffer they
//! see and then freeze that calibration for the lifetime of the instance. They
//! never re-measure, even if the signal drifts later on. Build a new instance
//! to recalibrate.

use super::SampleConverter;
use crate::util::{Sample, StereoFrame, LEFT, RIGHT};
use tracing::debug;

/// Leaves every sample untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl<T: Sample> SampleConverter<T> for PassThrough {
    fn convert(&mut self, _frames: &mut [StereoFrame<T>]) {}
}

/// Adds an offset, multiplies by a factor and clips symmetrically at `±max_value`
///
/// Both channels use the same `(factor, offset, max_value)` triple. A factor
/// of 0 mutes the signal.
#[derive(Debug, Clone, Copy)]
pub struct Scaler<T: Sample> {
    factor: f32,
    offset: T,
    max_value: T,
}

impl<T: Sample> Scaler<T> {
    /// Create a new scaler
    pub fn new(factor: f32, offset: T, max_value: T) -> Self {
        Scaler {
            factor,
            offset,
            max_value,
        }
    }

    /// A scaler that silences everything
    pub fn mute(max_value: T) -> Self {
        Self::new(0.0, T::ZERO, max_value)
    }

    /// Get the gain factor
    pub fn factor(&self) -> f32 {
        self.factor
    }

    fn scale(&self, value: T) -> T {
        let limit = self.max_value.to_f64().abs();
        let scaled = (value.to_f64() + self.offset.to_f64()) * self.factor as f64;
        T::from_f64(scaled.clamp(-limit, limit))
    }
}

impl<T: Sample> SampleConverter<T> for Scaler<T> {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        for frame in frames.iter_mut() {
            frame[LEFT] = self.scale(frame[LEFT]);
            frame[RIGHT] = self.scale(frame[RIGHT]);
        }
    }
}

/// One-shot DC offset calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration<T> {
    /// Nothing measured yet, or the first buffer had no positive mean
    Uncalibrated,
    /// Offset measured from the first positively biased buffer, frozen
    Calibrated(T),
}

/// Removes a DC offset measured once from the first buffer
///
/// The offset is the left-channel mean if it is positive, otherwise the
/// right-channel mean if that is positive. Only the first non-empty buffer is
/// measured: if it has no positive bias the converter stays uncalibrated for
/// good and every buffer passes through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct AutoCenter<T: Sample> {
    calibration: Calibration<T>,
    probed: bool,
}

impl<T: Sample> AutoCenter<T> {
    /// Create a new, uncalibrated auto-center converter
    pub fn new() -> Self {
        AutoCenter {
            calibration: Calibration::Uncalibrated,
            probed: false,
        }
    }

    /// Current calibration state
    pub fn calibration(&self) -> Calibration<T> {
        self.calibration
    }

    /// The frozen offset, if calibrated
    pub fn offset(&self) -> Option<T> {
        match self.calibration {
            Calibration::Calibrated(offset) => Some(offset),
            Calibration::Uncalibrated => None,
        }
    }

    fn calibrate(&mut self, frames: &[StereoFrame<T>]) {
        if frames.is_empty() {
            return;
        }
        self.probed = true;

        let (sum_left, sum_right) = frames.iter().fold((0.0f64, 0.0f64), |(l, r), frame| {
            (l + frame[LEFT].to_f64(), r + frame[RIGHT].to_f64())
        });
        let mean_left = sum_left / frames.len() as f64;
        let mean_right = sum_right / frames.len() as f64;

        let mean = if mean_left > 0.0 {
            mean_left
        } else if mean_right > 0.0 {
            mean_right
        } else {
            return;
        };

        let offset = T::from_f64(mean);
        debug!(mean_left, mean_right, ?offset, "AutoCenter calibrated");
        self.calibration = Calibration::Calibrated(offset);
    }
}

impl<T: Sample> Default for AutoCenter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> SampleConverter<T> for AutoCenter<T> {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        if !self.probed {
            self.calibrate(frames);
        }

        if let Calibration::Calibrated(offset) = self.calibration {
            let offset = offset.to_f64();
            for frame in frames.iter_mut() {
                frame[LEFT] = T::from_f64(frame[LEFT].to_f64() - offset);
                frame[RIGHT] = T::from_f64(frame[RIGHT].to_f64() - offset);
            }
        }
    }
}

/// Swaps the left and right channel of every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchLeftRight;

impl<T: Sample> SampleConverter<T> for SwitchLeftRight {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        for frame in frames.iter_mut() {
            frame.swap(LEFT, RIGHT);
        }
    }
}

/// Silent-channel detection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPresence {
    /// Every buffer seen so far was silent on both channels
    Probing,
    /// Latched from the first buffer carrying any signal, frozen
    Latched { left_empty: bool, right_empty: bool },
}

/// Copies the live channel into a channel that is entirely silent
///
/// Probes buffers until one has a non-zero sample on either channel, then
/// latches which channels were silent in that buffer. With exactly one silent
/// channel, every later buffer gets the other channel copied into it.
#[derive(Debug, Clone, Copy)]
pub struct FillLeftRight {
    presence: ChannelPresence,
}

impl FillLeftRight {
    /// Create a new fill converter that has not probed any buffer yet
    pub fn new() -> Self {
        FillLeftRight {
            presence: ChannelPresence::Probing,
        }
    }

    /// Current silent-channel detection state
    pub fn presence(&self) -> ChannelPresence {
        self.presence
    }

    fn probe<T: Sample>(&mut self, frames: &[StereoFrame<T>]) {
        let left_empty = frames.iter().all(|frame| frame[LEFT].is_silent());
        let right_empty = frames.iter().all(|frame| frame[RIGHT].is_silent());

        if !left_empty || !right_empty {
            debug!(left_empty, right_empty, "FillLeftRight latched");
            self.presence = ChannelPresence::Latched {
                left_empty,
                right_empty,
            };
        }
    }
}

impl Default for FillLeftRight {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> SampleConverter<T> for FillLeftRight {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        if self.presence == ChannelPresence::Probing {
            self.probe(frames);
        }

        match self.presence {
            ChannelPresence::Latched {
                left_empty: true,
                right_empty: false,
            } => {
                for frame in frames.iter_mut() {
                    frame[LEFT] = frame[RIGHT];
                }
            }
            ChannelPresence::Latched {
                left_empty: false,
                right_empty: true,
            } => {
                for frame in frames.iter_mut() {
                    frame[RIGHT] = frame[LEFT];
                }
            }
            _ => {}
        }
    }
}

/// Adds a fixed bias to every sample, wrapping on overflow
///
/// With the default bias of `0x8000`, signed 16-bit samples come out with the
/// bit pattern of unsigned 16-bit samples, which is what internal DACs expect.
#[derive(Debug, Clone, Copy)]
pub struct BiasShift {
    bias: i64,
}

impl BiasShift {
    /// Bias that maps signed 16-bit samples onto the unsigned range
    pub const UNSIGNED_16: i64 = 0x8000;

    /// Create a new bias shift adding `bias` to every sample
    pub fn new(bias: i64) -> Self {
        BiasShift { bias }
    }

    /// Get the bias added to each sample
    pub fn bias(&self) -> i64 {
        self.bias
    }
}

impl Default for BiasShift {
    fn default() -> Self {
        Self::new(Self::UNSIGNED_16)
    }
}

impl<T: Sample> SampleConverter<T> for BiasShift {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        for frame in frames.iter_mut() {
            frame[LEFT] = frame[LEFT].wrapping_offset(self.bias);
            frame[RIGHT] = frame[RIGHT].wrapping_offset(self.bias);
        }
    }
}
