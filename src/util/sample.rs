//! Numeric sample abstraction used by the in-place converters

use super::int24::I24;
use std::fmt::Debug;

/// One channel value of an interleaved stereo frame
///
/// Arithmetic that can leave the type's range (scaling, re-centering) goes
/// through `f64` and saturates on the way back. `wrapping_offset` is the one
/// exception: it wraps, which is what a signed-to-unsigned bias shift needs.
pub trait Sample: Copy + PartialEq + PartialOrd + Default + Debug + Send + Sync + 'static {
    /// Silence
    const ZERO: Self;

    /// Widen to `f64` without loss
    fn to_f64(self) -> f64;

    /// Narrow from `f64`, rounding and saturating for integer types
    fn from_f64(value: f64) -> Self;

    /// Add `bias` with two's-complement wrap-around (plain add for floats)
    fn wrapping_offset(self, bias: i64) -> Self;

    /// Exactly zero
    fn is_silent(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! impl_int_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const ZERO: Self = 0;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    // `as` saturates and maps NaN to 0
                    value.round() as $t
                }

                fn wrapping_offset(self, bias: i64) -> Self {
                    (self as i64).wrapping_add(bias) as $t
                }
            }
        )*
    };
}

impl_int_sample!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const ZERO: Self = 0.0;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn wrapping_offset(self, bias: i64) -> Self {
                    self + bias as $t
                }
            }
        )*
    };
}

impl_float_sample!(f32, f64);

impl Sample for I24 {
    const ZERO: Self = I24::ZERO;

    fn to_f64(self) -> f64 {
        self.value() as f64
    }

    fn from_f64(value: f64) -> Self {
        I24::new_clamped(value.round() as i32)
    }

    fn wrapping_offset(self, bias: i64) -> Self {
        let wrapped = (self.value() as i64).wrapping_add(bias) & 0x00FF_FFFF;
        // sign-extend bit 23
        I24::new_clamped(((wrapped as i32) << 8) >> 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_narrowing() {
        assert_eq!(i16::from_f64(40000.0), i16::MAX);
        assert_eq!(i16::from_f64(-40000.0), i16::MIN);
        assert_eq!(i16::from_f64(1.6), 2);
        assert_eq!(I24::from_f64(1e12), I24::MAX);
        assert_eq!(f32::from_f64(0.25), 0.25);
    }

    #[test]
    fn test_wrapping_offset() {
        assert_eq!(0i16.wrapping_offset(0x8000), i16::MIN);
        assert_eq!(i16::MIN.wrapping_offset(0x8000), 0);
        assert_eq!((-1i16).wrapping_offset(0x8000) as u16, 0x7FFF);
        assert_eq!(100i32.wrapping_offset(0x8000), 100 + 0x8000);
        assert_eq!(I24::ZERO.wrapping_offset(0x80_0000), I24::MIN);
        assert_eq!(0.5f32.wrapping_offset(1), 1.5);
    }

    #[test]
    fn test_silence() {
        assert!(0i16.is_silent());
        assert!(!1i16.is_silent());
        assert!(0.0f32.is_silent());
    }
}
