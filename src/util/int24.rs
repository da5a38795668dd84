//! Signed 24-bit sample type

use std::fmt;

/// A signed 24-bit sample held in the low bits of an `i32`
///
/// The value is always kept inside `I24::MIN..=I24::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct I24(i32);

impl I24 {
    /// Largest representable value (2^23 - 1)
    pub const MAX: I24 = I24(8_388_607);
    /// Smallest representable value (-2^23)
    pub const MIN: I24 = I24(-8_388_608);
    /// Zero
    pub const ZERO: I24 = I24(0);

    /// Create a 24-bit value, saturating anything outside the 24-bit range
    pub fn new_clamped(value: i32) -> Self {
        I24(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Create a 24-bit value, `None` when out of range
    pub fn new(value: i32) -> Option<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Some(I24(value))
        } else {
            None
        }
    }

    /// The value as an `i32`
    pub fn value(self) -> i32 {
        self.0
    }

    /// Decode 3 little-endian bytes, sign-extending bit 23
    pub fn from_le_bytes(bytes: [u8; 3]) -> Self {
        let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
        I24((raw << 8) >> 8)
    }

    /// Encode as 3 little-endian bytes
    pub fn to_le_bytes(self) -> [u8; 3] {
        let b = self.0.to_le_bytes();
        [b[0], b[1], b[2]]
    }

    /// Full-scale widening to 32 bits
    pub fn scale32(self) -> i32 {
        self.0 << 8
    }

    /// Narrowing to 16 bits, dropping the low byte
    pub fn scale16(self) -> i16 {
        (self.0 >> 8) as i16
    }

    /// Full-scale conversion to float, `I24::MAX` maps to 1.0
    pub fn scale_float(self) -> f32 {
        (self.0 as f64 / Self::MAX.0 as f64) as f32
    }
}

impl From<i16> for I24 {
    fn from(value: i16) -> Self {
        I24(value as i32)
    }
}

impl From<I24> for i32 {
    fn from(value: I24) -> Self {
        value.0
    }
}

impl fmt::Display for I24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
