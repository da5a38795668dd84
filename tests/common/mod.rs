//! Common test utilities for pcmflow integration tests
//!
//! This module provides helpers for building WAV byte streams, generating
//! stereo test signals, and recording what the codecs hand to their
//! collaborators.

#![allow(dead_code)]

use pcmflow::format::wav::AudioFormatInfo;
use pcmflow::format::FormatNegotiator;
use pcmflow::util::StereoFrame;
use std::io;
use std::sync::{Arc, Mutex};

// ============================================================================
// WAV Stream Generation
// ============================================================================

/// Build a canonical 44-byte-header WAV stream around `payload`
pub fn create_wav(sample_rate: u32, bits: u16, channels: u16, payload: &[u8]) -> Vec<u8> {
    create_wav_with_format(1, sample_rate, bits, channels, payload)
}

/// Build a canonical WAV stream with an arbitrary codec tag
pub fn create_wav_with_format(
    format: u16,
    sample_rate: u32,
    bits: u16,
    channels: u16,
    payload: &[u8],
) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut out = Vec::with_capacity(44 + payload.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + payload.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(&fmt_chunk(format, sample_rate, bits, channels, block_align));
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// A 16-byte `fmt ` chunk including its 8-byte chunk header
pub fn fmt_chunk(format: u16, sample_rate: u32, bits: u16, channels: u16, block_align: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(24);
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&format.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out
}

/// An arbitrary chunk with the given tag and body
pub fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// Interleaved 16-bit little-endian PCM ramp, `frames` stereo frames long
pub fn create_pcm16_ramp(frames: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let left = (i as i16).wrapping_mul(64);
        let right = left.wrapping_neg();
        out.extend_from_slice(&left.to_le_bytes());
        out.extend_from_slice(&right.to_le_bytes());
    }
    out
}

// ============================================================================
// Stereo Frame Generation
// ============================================================================

/// Sine wave stereo frames, right channel phase-inverted
pub fn create_sine_frames(count: usize, amplitude: f64) -> Vec<StereoFrame<i16>> {
    (0..count)
        .map(|i| {
            let v = (amplitude * (i as f64 * 0.05).sin()) as i16;
            [v, v.saturating_neg()]
        })
        .collect()
}

/// Constant frames with a DC offset on both channels
pub fn create_dc_frames(count: usize, left: i16, right: i16) -> Vec<StereoFrame<i16>> {
    vec![[left, right]; count]
}

// ============================================================================
// Collaborator Doubles
// ============================================================================

/// Writer that accepts at most `limit` bytes in total
pub struct ShortSink {
    pub data: Vec<u8>,
    pub limit: usize,
}

impl ShortSink {
    pub fn new(limit: usize) -> Self {
        ShortSink {
            data: Vec::new(),
            limit,
        }
    }
}

impl io::Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.data.len());
        let n = buf.len().min(room);
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer whose first call accepts at most `first_limit` bytes, then everything
pub struct StutterSink {
    pub data: Vec<u8>,
    pub first_limit: usize,
    pub calls: usize,
}

impl StutterSink {
    pub fn new(first_limit: usize) -> Self {
        StutterSink {
            data: Vec::new(),
            first_limit,
            calls: 0,
        }
    }
}

impl io::Write for StutterSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = if self.calls == 1 {
            buf.len().min(self.first_limit)
        } else {
            buf.len()
        };
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that accepts every byte but fails every flush
#[derive(Default)]
pub struct FailingFlushSink {
    pub data: Vec<u8>,
    pub writes: usize,
    pub flushes: usize,
}

impl io::Write for FailingFlushSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport closed"))
    }
}

/// Writer that fails every write
pub struct FailingSink;

impl io::Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a `RecordingNegotiator` was asked
#[derive(Debug, Default)]
pub struct NegotiationLog {
    pub validated: Vec<AudioFormatInfo>,
    pub notified: Vec<AudioFormatInfo>,
}

/// Negotiator that records every call and answers with a fixed verdict
#[derive(Clone)]
pub struct RecordingNegotiator {
    pub accept: bool,
    pub log: Arc<Mutex<NegotiationLog>>,
}

impl RecordingNegotiator {
    pub fn new(accept: bool) -> Self {
        RecordingNegotiator {
            accept,
            log: Arc::new(Mutex::new(NegotiationLog::default())),
        }
    }
}

impl FormatNegotiator for RecordingNegotiator {
    fn validate(&mut self, info: &AudioFormatInfo) -> bool {
        self.log.lock().unwrap().validated.push(*info);
        self.accept
    }

    fn notify(&mut self, info: &AudioFormatInfo) {
        self.log.lock().unwrap().notified.push(*info);
    }
}
