//! Audio sample format definitions

use std::fmt;

/// Interleaved PCM sample format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleFormat {
    /// Unsigned 8-bit
    U8,
    /// Signed 16-bit
    I16,
    /// Signed 24-bit, packed in 3 bytes
    I24,
    /// Signed 32-bit
    I32,
    /// 32-bit float
    F32,
    /// Unknown format
    #[default]
    Unknown,
}

impl SampleFormat {
    /// Get the size in bytes of one sample
    pub fn sample_size(&self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::I16 => 2,
            SampleFormat::I24 => 3,
            SampleFormat::I32 | SampleFormat::F32 => 4,
            SampleFormat::Unknown => 0,
        }
    }

    /// Get the bit depth of one sample
    pub fn bits_per_sample(&self) -> u16 {
        self.sample_size() as u16 * 8
    }

    /// Check if this is a floating point format
    pub fn is_float(&self) -> bool {
        matches!(self, SampleFormat::F32)
    }

    /// Integer PCM format for a bit depth, `Unknown` for anything else
    pub fn from_bits(bits_per_sample: u16) -> Self {
        match bits_per_sample {
            8 => SampleFormat::U8,
            16 => SampleFormat::I16,
            24 => SampleFormat::I24,
            32 => SampleFormat::I32,
            _ => SampleFormat::Unknown,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::U8 => "u8",
            SampleFormat::I16 => "s16",
            SampleFormat::I24 => "s24",
            SampleFormat::I32 => "s32",
            SampleFormat::F32 => "f32",
            SampleFormat::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
