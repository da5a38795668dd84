//! RIFF/WAVE header parsing
//!
//! The parser works on a buffer that is already in memory and never fails:
//! malformed input is skipped over and only shows in the `is_valid` and
//! `is_streamed` flags of the resulting [`AudioFormatInfo`].

use super::info::AudioFormatInfo;
use super::{
    is_streamed_length, DATA_CHUNK, FMT_CHUNK, FMT_CHUNK_SIZE, FMT_EXTENSIBLE_MIN_SIZE,
    RIFF_MAGIC, STREAMED_DATA_LENGTH, WAVE_FORMAT_EXTENSIBLE, WAVE_MAGIC,
};
use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, info};

/// Chunk budget used once a length turned out to be unknown
const UNBOUNDED: u64 = u64::MAX;

/// Location of the payload inside the parsed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadRange {
    /// Byte offset of the first payload byte
    pub offset: usize,
    /// Payload bytes available in the buffer
    pub len: usize,
}

impl PayloadRange {
    /// One past the last payload byte
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The payload bytes of `buffer`, which must be the parsed buffer
    pub fn slice<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        let end = self.end().min(buffer.len());
        &buffer[self.offset.min(end)..end]
    }
}

/// Read cursor over the header buffer
struct ChunkCursor<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ChunkCursor<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        ChunkCursor { buffer, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            self.pos = self.buffer.len();
            return None;
        }
        let bytes = &self.buffer[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    /// Chunk tags are compared byte for byte
    fn read_tag(&mut self) -> Option<[u8; 4]> {
        let bytes = self.take(4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn read_u16(&mut self) -> Option<u16> {
        self.take(2).map(LittleEndian::read_u16)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take(4).map(LittleEndian::read_u32)
    }

    /// Skip forward; skipping past the end parks the cursor at the end
    fn skip(&mut self, n: u64) {
        let n = usize::try_from(n).unwrap_or(usize::MAX);
        self.pos = self.pos.saturating_add(n).min(self.buffer.len());
    }
}

/// Parsed WAV header
#[derive(Debug, Clone)]
pub struct WavHeader {
    info: AudioFormatInfo,
    payload_offset: Option<usize>,
    buffer_len: usize,
}

impl WavHeader {
    /// Walk the chunks of `buffer` once
    ///
    /// Scans for a `RIFF`/`WAVE` chunk, skipping anything else (including
    /// `RIFF` chunks of another form type) and resuming the scan after it.
    /// Inside the WAVE chunk, a sub-chunk that claims more bytes than the
    /// chunk has left ends the sub-chunk walk; fields parsed before it are
    /// kept.
    pub fn parse(buffer: &[u8]) -> Self {
        debug!(len = buffer.len(), "Parsing WAV header");

        let mut cursor = ChunkCursor::new(buffer);
        let mut info = AudioFormatInfo::default();
        let mut payload_offset = None;

        while cursor.remaining() >= 8 {
            let (Some(tag), Some(declared)) = (cursor.read_tag(), cursor.read_u32()) else {
                break;
            };

            let mut length = declared as u64;
            if is_streamed_length(declared) {
                info.is_streamed = true;
                length = UNBOUNDED;
            }

            if &tag != RIFF_MAGIC || length < 4 {
                cursor.skip(length);
                continue;
            }

            let Some(form) = cursor.read_tag() else {
                break;
            };
            length -= 4;
            if &form != WAVE_MAGIC {
                debug!(form = ?String::from_utf8_lossy(&form), "Skipping non-WAVE RIFF chunk");
                cursor.skip(length);
                continue;
            }
            info.file_size = declared;

            while length >= 8 {
                let (Some(subtag), Some(sublength)) = (cursor.read_tag(), cursor.read_u32())
                else {
                    break;
                };
                length -= 8;

                let sub = sublength as u64;
                if length < sub {
                    debug!(
                        tag = ?String::from_utf8_lossy(&subtag),
                        sublength,
                        "Sub-chunk overruns its RIFF chunk"
                    );
                    break;
                }

                if &subtag == FMT_CHUNK {
                    if !Self::parse_fmt(&mut cursor, sublength, &mut info) {
                        break;
                    }
                } else if &subtag == DATA_CHUNK {
                    if payload_offset.is_none() {
                        payload_offset = Some(cursor.position());
                        info.data_length = sublength;
                    }
                    if sublength == 0 || info.is_streamed {
                        info.is_streamed = true;
                        info.data_length = STREAMED_DATA_LENGTH;
                        let header = WavHeader {
                            info,
                            payload_offset,
                            buffer_len: buffer.len(),
                        };
                        header.log_summary();
                        return header;
                    }
                    cursor.skip(sub);
                } else {
                    cursor.skip(sub);
                }
                length -= sub;
            }

            if length > 0 {
                cursor.skip(length);
            }
        }

        let header = WavHeader {
            info,
            payload_offset,
            buffer_len: buffer.len(),
        };
        header.log_summary();
        header
    }

    /// Parse a `fmt ` body; false when its declared size is too small
    fn parse_fmt(cursor: &mut ChunkCursor<'_>, sublength: u32, info: &mut AudioFormatInfo) -> bool {
        if sublength < FMT_CHUNK_SIZE {
            debug!(sublength, "Insufficient data for 'fmt '");
            return false;
        }

        let fields = (|| {
            Some((
                cursor.read_u16()?,
                cursor.read_u16()?,
                cursor.read_u32()?,
                cursor.read_u32()?,
                cursor.read_u16()?,
                cursor.read_u16()?,
            ))
        })();
        let Some((format, channels, sample_rate, byte_rate, block_align, bits_per_sample)) = fields
        else {
            return false;
        };

        info.format = format;
        info.channels = channels;
        info.sample_rate = sample_rate;
        info.byte_rate = byte_rate;
        info.block_align = block_align;
        info.bits_per_sample = bits_per_sample;

        if format == WAVE_FORMAT_EXTENSIBLE {
            if sublength < FMT_EXTENSIBLE_MIN_SIZE {
                debug!(sublength, "Insufficient data for WAVE_FORMAT_EXTENSIBLE");
                return false;
            }
            // cbSize, valid bits and channel mask precede the sub-format GUID
            cursor.skip(8);
            let Some(sub_format) = cursor.read_u32() else {
                return false;
            };
            info.format = (sub_format & 0xFFFF) as u16;
            cursor.skip((sublength - FMT_EXTENSIBLE_MIN_SIZE) as u64);
        } else {
            cursor.skip((sublength - FMT_CHUNK_SIZE) as u64);
        }

        info.is_valid = true;
        true
    }

    fn log_summary(&self) {
        info!(
            payload_offset = ?self.payload_offset,
            channels = self.info.channels,
            bits_per_sample = self.info.bits_per_sample,
            sample_rate = self.info.sample_rate,
            format = self.info.format,
            "WAV header parsed"
        );
    }

    /// The parsed format information
    pub fn audio_info(&self) -> &AudioFormatInfo {
        &self.info
    }

    /// Whether a `data` chunk was found and has not been taken yet
    pub fn has_payload(&self) -> bool {
        self.payload_offset.is_some()
    }

    /// Hand out the location of the first `data` payload, once
    ///
    /// Bounded payloads are cut to the declared `data_length`; streamed ones
    /// run to the end of the buffer. The second call returns `None`.
    pub fn take_payload(&mut self) -> Option<PayloadRange> {
        let offset = self.payload_offset.take()?;
        let available = self.buffer_len.saturating_sub(offset);
        let len = if self.info.is_streamed {
            available
        } else {
            available.min(self.info.data_length as usize)
        };
        Some(PayloadRange { offset, len })
    }
}
