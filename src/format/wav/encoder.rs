//! Streaming WAV encoder
//!
//! Emits the canonical 44-byte header in front of the first payload write.
//! Bounded streams track the remaining payload budget and close themselves
//! once it is used up; streamed ones forward everything until `end`.

use super::info::AudioFormatInfo;
use super::{
    is_streamed_length, CANONICAL_HEADER_SIZE, DATA_CHUNK, FMT_CHUNK, FMT_CHUNK_SIZE,
    RIFF_MAGIC, RIFF_OVERHEAD, STREAMED_DATA_LENGTH, WAVE_MAGIC,
};
use crate::error::{Error, Result};
use crate::format::ByteSink;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use tracing::{debug, error, info};

/// WAV encoder writing to `S`
pub struct WavEncoder<S: ByteSink> {
    sink: Option<S>,
    info: AudioFormatInfo,
    header_written: bool,
    remaining: i64,
    open: bool,
}

impl<S: ByteSink> WavEncoder<S> {
    /// Create an encoder; the sink must be provided with `begin_with_sink`
    pub fn new() -> Self {
        WavEncoder {
            sink: None,
            info: AudioFormatInfo::default_profile(),
            header_written: false,
            remaining: 0,
            open: false,
        }
    }

    /// Create an encoder writing to `sink`
    pub fn with_sink(sink: S) -> Self {
        let mut encoder = Self::new();
        encoder.sink = Some(sink);
        encoder
    }

    /// The default encoder configuration
    pub fn default_config() -> AudioFormatInfo {
        AudioFormatInfo::default_profile()
    }

    /// Start a new stream in the given format
    ///
    /// `byte_rate` and `block_align` are derived here. A stream flagged as
    /// streamed, or whose `data_length` is 0 or at least `0x7fff0000`, is
    /// unbounded; anything else becomes the payload budget.
    pub fn begin(&mut self, info: AudioFormatInfo) {
        let mut info = info;
        info.derive_rates();

        if info.is_streamed || is_streamed_length(info.data_length) {
            info!(data_length = info.data_length, "WAV output is streamed");
            info.is_streamed = true;
            info.data_length = STREAMED_DATA_LENGTH;
            info.file_size = STREAMED_DATA_LENGTH;
            self.remaining = 0;
        } else {
            info.file_size = info.data_length + RIFF_OVERHEAD;
            self.remaining = info.data_length as i64;
            info!(size_limit = self.remaining, "WAV output is bounded");
        }

        self.info = info;
        self.header_written = false;
        self.open = true;
    }

    /// Swap in a new sink and start a new stream
    pub fn begin_with_sink(&mut self, sink: S, info: AudioFormatInfo) {
        self.sink = Some(sink);
        self.begin(info);
    }

    /// Close the stream without writing anything further
    pub fn end(&mut self) {
        self.open = false;
    }

    /// Write PCM payload, returning the payload bytes the sink accepted
    ///
    /// Bounded streams accept at most the remaining budget; the write that
    /// uses it up flushes the sink and closes the encoder. Writing while
    /// closed or without a sink is a precondition violation. A header the
    /// sink did not fully accept, or a failing final flush, also closes the
    /// encoder; call `begin` to start over.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if !self.open {
            error!("The WavEncoder is not open - please call begin()");
            return Err(Error::precondition("WavEncoder is not open, call begin() first"));
        }
        if self.sink.is_none() {
            error!("No output sink was provided");
            return Err(Error::precondition("WavEncoder has no output sink"));
        }

        if !self.header_written {
            self.write_header()?;
        }

        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| Error::precondition("WavEncoder has no output sink"))?;

        if self.info.is_streamed {
            return sink.write(data);
        }

        let budget = usize::try_from(self.remaining).unwrap_or(0);
        let written = sink.write(&data[..data.len().min(budget)])?;
        self.remaining -= written as i64;

        if self.remaining <= 0 {
            info!("The defined size was written, closing the WavEncoder");
            self.open = false;
            sink.flush()?;
        }

        Ok(written)
    }

    fn write_header(&mut self) -> Result<()> {
        let header = self.header_bytes()?;
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| Error::precondition("WavEncoder has no output sink"))?;

        debug!("Writing WAV header");
        // a failed or partial header cannot be resumed, the stream is closed
        let written = match sink.write(&header) {
            Ok(written) => written,
            Err(e) => {
                self.open = false;
                return Err(e);
            }
        };
        if written != header.len() {
            error!(written, "Short WAV header write, closing the WavEncoder");
            self.open = false;
            return Err(Error::format(format!(
                "Sink accepted {} of {} header bytes",
                written,
                header.len()
            )));
        }

        self.header_written = true;
        Ok(())
    }

    /// RIFF header, `fmt ` chunk and `data` chunk header
    pub fn header_bytes(&self) -> Result<Vec<u8>> {
        let info = &self.info;
        let mut header = Vec::with_capacity(CANONICAL_HEADER_SIZE);

        header.write_all(RIFF_MAGIC)?;
        header.write_u32::<LittleEndian>(info.file_size)?;
        header.write_all(WAVE_MAGIC)?;

        header.write_all(FMT_CHUNK)?;
        header.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
        header.write_u16::<LittleEndian>(info.format)?;
        header.write_u16::<LittleEndian>(info.channels)?;
        header.write_u32::<LittleEndian>(info.sample_rate)?;
        header.write_u32::<LittleEndian>(info.byte_rate)?;
        header.write_u16::<LittleEndian>(info.block_align)?;
        header.write_u16::<LittleEndian>(info.bits_per_sample)?;

        header.write_all(DATA_CHUNK)?;
        header.write_u32::<LittleEndian>(info.data_length)?;

        Ok(header)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Format of the current stream
    pub fn audio_info(&self) -> &AudioFormatInfo {
        &self.info
    }

    /// Payload bytes left in a bounded stream, `None` when streamed
    pub fn remaining(&self) -> Option<u64> {
        if self.info.is_streamed {
            None
        } else {
            Some(self.remaining.max(0) as u64)
        }
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn into_sink(self) -> Option<S> {
        self.sink
    }
}

impl<S: ByteSink> Default for WavEncoder<S> {
    fn default() -> Self {
        Self::new()
    }
}
