//! Streaming WAV decoder
//!
//! Parses the header out of the first write and forwards PCM payload to a
//! downstream sink. Only `WAVE_FORMAT_PCM` is supported.

use super::header::WavHeader;
use super::info::AudioFormatInfo;
use crate::error::{Error, Result};
use crate::format::{ByteSink, FormatNegotiator};
use std::fmt;
use tracing::{debug, error, info};

/// Where the decoder is in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// The next write must carry the complete header
    ExpectingHeader,
    /// Writes are forwarded verbatim
    StreamingPayload,
    /// The format was refused; nothing is forwarded until `begin`
    Rejected(Rejection),
}

/// Why a decoder disabled itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The codec tag is not PCM
    NotPcm(u16),
    /// The format negotiator refused the format
    Negotiation,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotPcm(format) => write!(f, "WAV format not supported: {}", format),
            Rejection::Negotiation => write!(f, "format rejected by consumer"),
        }
    }
}

/// WAV decoder writing PCM payload to `S`
pub struct WavDecoder<S: ByteSink> {
    sink: S,
    negotiator: Option<Box<dyn FormatNegotiator + Send>>,
    header: Option<WavHeader>,
    state: DecoderState,
    active: bool,
}

impl<S: ByteSink> WavDecoder<S> {
    /// Create a decoder that accepts any PCM format
    pub fn new(sink: S) -> Self {
        WavDecoder {
            sink,
            negotiator: None,
            header: None,
            state: DecoderState::ExpectingHeader,
            active: false,
        }
    }

    /// Create a decoder that asks `negotiator` before forwarding anything
    pub fn with_negotiator<N>(sink: S, negotiator: N) -> Self
    where
        N: FormatNegotiator + Send + 'static,
    {
        let mut decoder = Self::new(sink);
        decoder.negotiator = Some(Box::new(negotiator));
        decoder
    }

    /// Start (or restart) decoding a new stream
    pub fn begin(&mut self) {
        self.header = None;
        self.state = DecoderState::ExpectingHeader;
        self.active = true;
    }

    /// Stop accepting writes
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Feed bytes from the transport, returning the payload bytes forwarded
    ///
    /// The first write must contain the whole header. If it holds no `data`
    /// chunk yet, nothing is forwarded and the next write is parsed as a
    /// header again. An inactive or rejected decoder forwards nothing.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        if !self.active {
            return Ok(0);
        }

        match self.state {
            DecoderState::ExpectingHeader => self.write_first(data),
            DecoderState::StreamingPayload => self.sink.write(data),
            DecoderState::Rejected(_) => Ok(0),
        }
    }

    fn write_first(&mut self, data: &[u8]) -> Result<usize> {
        let mut header = WavHeader::parse(data);
        let Some(payload) = header.take_payload() else {
            debug!(len = data.len(), "No WAV payload in first write yet");
            self.header = Some(header);
            return Ok(0);
        };

        let info = *header.audio_info();
        self.header = Some(header);
        info!(
            sample_rate = info.sample_rate,
            data_length = info.data_length,
            is_streamed = info.is_streamed,
            is_valid = info.is_valid,
            "WAV stream detected"
        );

        if !info.is_pcm() {
            let rejection = Rejection::NotPcm(info.format);
            error!("{}", rejection);
            self.state = DecoderState::Rejected(rejection);
            return Ok(0);
        }

        if let Some(negotiator) = self.negotiator.as_mut() {
            if !negotiator.validate(&info) {
                error!(
                    sample_rate = info.sample_rate,
                    channels = info.channels,
                    bits_per_sample = info.bits_per_sample,
                    "{}",
                    Rejection::Negotiation
                );
                self.state = DecoderState::Rejected(Rejection::Negotiation);
                return Ok(0);
            }
            negotiator.notify(&info);
        }

        self.state = DecoderState::StreamingPayload;
        debug!(len = payload.len, "Writing first sound data");
        self.sink.write(payload.slice(data))
    }

    /// Liveness: `begin` was called and `end` was not
    ///
    /// A rejected decoder is still active; check [`is_valid`](Self::is_valid)
    /// as well to tell "open but rejected" from "closed".
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// False once the format has been rejected
    pub fn is_valid(&self) -> bool {
        !matches!(self.state, DecoderState::Rejected(_))
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Why the decoder disabled itself, as an error value
    pub fn rejection(&self) -> Option<Error> {
        match self.state {
            DecoderState::Rejected(rejection) => Some(Error::unsupported(rejection.to_string())),
            _ => None,
        }
    }

    /// Format of the current stream, once a header has been parsed
    pub fn audio_info(&self) -> Option<&AudioFormatInfo> {
        self.header.as_ref().map(WavHeader::audio_info)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}
