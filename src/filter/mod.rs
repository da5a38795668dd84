//! In-place sample conversion
//!
//! Converters mutate a borrowed buffer of interleaved stereo frames. The frame
//! count is the length of the slice the caller hands in; converters never keep
//! the buffer beyond the call.

pub mod audio;
pub mod bitdepth;
pub mod chain;

pub use audio::{
    AutoCenter, BiasShift, Calibration, ChannelPresence, FillLeftRight, PassThrough, Scaler,
    SwitchLeftRight,
};
pub use bitdepth::{
    convert_24_to_16, convert_24_to_32, convert_24_to_float, convert_32_to_16, BitDepthCast,
};
pub use chain::ConverterChain;

use crate::util::{Sample, StereoFrame};
use serde::{Deserialize, Serialize};

/// Converter trait for processing stereo buffers in place
pub trait SampleConverter<T: Sample> {
    /// Convert every frame of `frames` in place
    ///
    /// The frame count is the slice length; to convert only a prefix of a
    /// larger buffer, pass `&mut buffer[..frame_count]` or use
    /// [`ConverterChain::convert_frames`]. Must accept buffers of any length,
    /// including empty ones.
    fn convert(&mut self, frames: &mut [StereoFrame<T>]);
}

impl<T: Sample, C: SampleConverter<T> + ?Sized> SampleConverter<T> for Box<C> {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        (**self).convert(frames)
    }
}

/// The closed set of buffer-level converters
#[derive(Debug, Clone)]
pub enum Converter<T: Sample> {
    PassThrough(PassThrough),
    Scaler(Scaler<T>),
    AutoCenter(AutoCenter<T>),
    SwitchLeftRight(SwitchLeftRight),
    FillLeftRight(FillLeftRight),
    BiasShift(BiasShift),
}

impl<T: Sample> Converter<T> {
    /// Short name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Converter::PassThrough(_) => "pass_through",
            Converter::Scaler(_) => "scaler",
            Converter::AutoCenter(_) => "auto_center",
            Converter::SwitchLeftRight(_) => "switch_left_right",
            Converter::FillLeftRight(_) => "fill_left_right",
            Converter::BiasShift(_) => "bias_shift",
        }
    }
}

impl<T: Sample> SampleConverter<T> for Converter<T> {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        match self {
            Converter::PassThrough(c) => c.convert(frames),
            Converter::Scaler(c) => c.convert(frames),
            Converter::AutoCenter(c) => c.convert(frames),
            Converter::SwitchLeftRight(c) => c.convert(frames),
            Converter::FillLeftRight(c) => c.convert(frames),
            Converter::BiasShift(c) => c.convert(frames),
        }
    }
}

macro_rules! impl_from_converter {
    ($($variant:ident),*) => {
        $(
            impl<T: Sample> From<$variant> for Converter<T> {
                fn from(c: $variant) -> Self {
                    Converter::$variant(c)
                }
            }
        )*
    };
}

impl_from_converter!(PassThrough, SwitchLeftRight, FillLeftRight, BiasShift);

impl<T: Sample> From<Scaler<T>> for Converter<T> {
    fn from(c: Scaler<T>) -> Self {
        Converter::Scaler(c)
    }
}

impl<T: Sample> From<AutoCenter<T>> for Converter<T> {
    fn from(c: AutoCenter<T>) -> Self {
        Converter::AutoCenter(c)
    }
}

/// Serializable description of one converter
///
/// Numeric parameters are given as `f64` and narrowed (saturating) to the
/// chain's sample type when built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConverterSpec {
    PassThrough,
    Scaler {
        factor: f32,
        #[serde(default)]
        offset: f64,
        max_value: f64,
    },
    AutoCenter,
    SwitchLeftRight,
    FillLeftRight,
    BiasShift {
        #[serde(default = "default_bias")]
        bias: i64,
    },
}

fn default_bias() -> i64 {
    BiasShift::UNSIGNED_16
}

impl ConverterSpec {
    /// Build a fresh, uncalibrated converter
    pub fn build<T: Sample>(&self) -> Converter<T> {
        match *self {
            ConverterSpec::PassThrough => PassThrough.into(),
            ConverterSpec::Scaler {
                factor,
                offset,
                max_value,
            } => Scaler::new(factor, T::from_f64(offset), T::from_f64(max_value)).into(),
            ConverterSpec::AutoCenter => AutoCenter::new().into(),
            ConverterSpec::SwitchLeftRight => SwitchLeftRight.into(),
            ConverterSpec::FillLeftRight => FillLeftRight::new().into(),
            ConverterSpec::BiasShift { bias } => BiasShift::new(bias).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_dispatch() {
        let mut converter: Converter<i16> = SwitchLeftRight.into();
        let mut frames = [[1i16, 2]];
        converter.convert(&mut frames);
        assert_eq!(frames, [[2, 1]]);
        assert_eq!(converter.name(), "switch_left_right");
    }

    #[test]
    fn test_spec_build() {
        let spec = ConverterSpec::Scaler {
            factor: 0.5,
            offset: 0.0,
            max_value: 100.0,
        };
        let mut converter = spec.build::<i32>();
        let mut frames = [[400, -50]];
        converter.convert(&mut frames);
        assert_eq!(frames, [[100, -25]]);
    }

    #[test]
    fn test_boxed_converter() {
        let mut boxed: Box<dyn SampleConverter<i16>> = Box::new(BiasShift::default());
        let mut frames = [[0i16, 0]];
        boxed.convert(&mut frames);
        assert_eq!(frames, [[i16::MIN, i16::MIN]]);
    }
}
