//! Format metadata carried in a WAV header

use super::{
    DEFAULT_BITS_PER_SAMPLE, DEFAULT_CHANNELS, DEFAULT_DATA_LENGTH, DEFAULT_SAMPLE_RATE,
    RIFF_OVERHEAD, WAVE_FORMAT_PCM,
};
use crate::util::SampleFormat;
use serde::{Deserialize, Serialize};

/// Sound information available in a WAV header
///
/// Once populated, `block_align == channels * bits_per_sample / 8` and
/// `byte_rate == sample_rate * block_align`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioFormatInfo {
    /// Codec tag, PCM = 1
    pub format: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Number of channels
    pub channels: u16,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per frame
    pub block_align: u16,
    /// Payload length unknown, read until the transport ends
    pub is_streamed: bool,
    /// A `fmt ` chunk was parsed successfully
    pub is_valid: bool,
    /// Payload length in bytes, `STREAMED_DATA_LENGTH` when streamed
    pub data_length: u32,
    /// Declared RIFF chunk size (everything after the 8-byte RIFF header)
    pub file_size: u32,
}

impl AudioFormatInfo {
    /// Default encoder profile: 44.1 kHz, 16-bit stereo PCM, large bounded length
    pub fn default_profile() -> Self {
        let mut info = AudioFormatInfo {
            format: WAVE_FORMAT_PCM,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            channels: DEFAULT_CHANNELS,
            is_streamed: false,
            is_valid: true,
            data_length: DEFAULT_DATA_LENGTH,
            file_size: DEFAULT_DATA_LENGTH + RIFF_OVERHEAD,
            ..Default::default()
        };
        info.derive_rates();
        info
    }

    /// PCM format with the given shape and a bounded payload length
    pub fn pcm(sample_rate: u32, bits_per_sample: u16, channels: u16, data_length: u32) -> Self {
        let mut info = AudioFormatInfo {
            format: WAVE_FORMAT_PCM,
            sample_rate,
            bits_per_sample,
            channels,
            is_valid: true,
            data_length,
            file_size: data_length.saturating_add(RIFF_OVERHEAD),
            ..Default::default()
        };
        info.derive_rates();
        info
    }

    /// Calculate expected block alignment
    pub fn calculate_block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bits_per_sample / 8)
    }

    /// Calculate expected byte rate
    pub fn calculate_byte_rate(&self) -> u32 {
        self.sample_rate
            .saturating_mul(self.calculate_block_align() as u32)
    }

    /// Recompute `block_align` and `byte_rate` from the other fields
    pub fn derive_rates(&mut self) {
        self.block_align = self.calculate_block_align();
        self.byte_rate = self.calculate_byte_rate();
    }

    pub fn is_pcm(&self) -> bool {
        self.format == WAVE_FORMAT_PCM
    }

    /// Get the interleaved sample format
    pub fn sample_format(&self) -> SampleFormat {
        if self.is_pcm() {
            SampleFormat::from_bits(self.bits_per_sample)
        } else {
            SampleFormat::Unknown
        }
    }

    /// Whole frames in a bounded payload, `None` when streamed or shapeless
    pub fn frame_count(&self) -> Option<u64> {
        if self.is_streamed || self.block_align == 0 {
            return None;
        }
        Some(self.data_length as u64 / self.block_align as u64)
    }

    /// Payload duration in seconds, `None` when streamed
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.sample_rate == 0 {
            return None;
        }
        self.frame_count()
            .map(|frames| frames as f64 / self.sample_rate as f64)
    }
}
