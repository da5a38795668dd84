//! WAV audio format support
//!
//! Streaming RIFF/WAVE handling: a one-shot header parser that tolerates
//! malformed, oversized and streamed files, a decoder that strips the header
//! off an incoming byte stream, and an encoder that frames PCM payload.

pub mod decoder;
pub mod encoder;
pub mod header;
pub mod info;

pub use decoder::{DecoderState, Rejection, WavDecoder};
pub use encoder::WavEncoder;
pub use header::{PayloadRange, WavHeader};
pub use info::AudioFormatInfo;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Format tag for integer PCM
pub const WAVE_FORMAT_PCM: u16 = 0x0001;
/// Format tag announcing a WAVE_FORMAT_EXTENSIBLE `fmt ` chunk
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Chunk lengths of 0 or at least this value mean "unknown, streamed"
pub const STREAMED_LENGTH_THRESHOLD: u32 = 0x7fff_0000;
/// `data_length` recorded for streams of unknown length
pub const STREAMED_DATA_LENGTH: u32 = u32::MAX;

/// Size of the canonical `fmt ` chunk body
pub const FMT_CHUNK_SIZE: u32 = 16;
/// Minimum `fmt ` body size for the extensible variant
pub const FMT_EXTENSIBLE_MIN_SIZE: u32 = 28;
/// Size of the header the encoder emits (RIFF + fmt + data headers)
pub const CANONICAL_HEADER_SIZE: usize = 44;
/// RIFF chunk size minus payload for a canonical file
pub const RIFF_OVERHEAD: u32 = 36;

/// Encoder defaults
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;
pub const DEFAULT_CHANNELS: u16 = 2;
pub const DEFAULT_DATA_LENGTH: u32 = STREAMED_LENGTH_THRESHOLD;

/// True for chunk lengths that signal an unknown (streamed) size
pub fn is_streamed_length(length: u32) -> bool {
    length == 0 || length >= STREAMED_LENGTH_THRESHOLD
}
