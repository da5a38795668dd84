//! Container format handling
//!
//! This module holds the two collaborator seams the codecs talk to, the byte
//! sink and the format negotiator, plus the RIFF/WAVE implementation.

pub mod wav;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use wav::AudioFormatInfo;

/// Downstream byte transport (file, socket, DAC feed)
///
/// `write` reports how many bytes were accepted. Callers do not retry short
/// writes.
pub trait ByteSink {
    /// Offer `data`, returning how many bytes were accepted
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Push any buffered bytes to the transport
    fn flush(&mut self) -> Result<()>;
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        Ok(Write::write(self, data)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(Write::flush(self)?)
    }
}

/// Consumer-side format negotiation
///
/// Called at most once per decoder run, synchronously, during the first
/// write. `notify` only follows a successful `validate`.
pub trait FormatNegotiator {
    /// Whether the consumer can take audio in this format
    fn validate(&mut self, info: &AudioFormatInfo) -> bool {
        let _ = info;
        true
    }

    /// The format the payload that follows is in
    fn notify(&mut self, info: &AudioFormatInfo);
}

/// List-based negotiator: accepts formats whose parameters are all listed
///
/// An empty list accepts any value for that parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSupport {
    #[serde(default)]
    pub sample_rates: Vec<u32>,
    #[serde(default)]
    pub bits_per_sample: Vec<u16>,
    #[serde(default)]
    pub channels: Vec<u16>,
    /// Last format passed to `notify`
    #[serde(skip)]
    pub current: Option<AudioFormatInfo>,
}

impl FormatSupport {
    /// Accept everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_sample_rates(mut self, rates: &[u32]) -> Self {
        self.sample_rates = rates.to_vec();
        self
    }

    pub fn with_bits_per_sample(mut self, bits: &[u16]) -> Self {
        self.bits_per_sample = bits.to_vec();
        self
    }

    pub fn with_channels(mut self, channels: &[u16]) -> Self {
        self.channels = channels.to_vec();
        self
    }

    /// Check a format against the lists without recording anything
    pub fn supports(&self, info: &AudioFormatInfo) -> bool {
        fn allowed<V: PartialEq>(list: &[V], value: &V) -> bool {
            list.is_empty() || list.contains(value)
        }

        allowed(&self.sample_rates, &info.sample_rate)
            && allowed(&self.bits_per_sample, &info.bits_per_sample)
            && allowed(&self.channels, &info.channels)
    }
}

impl FormatNegotiator for FormatSupport {
    fn validate(&mut self, info: &AudioFormatInfo) -> bool {
        self.supports(info)
    }

    fn notify(&mut self, info: &AudioFormatInfo) {
        self.current = Some(*info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_is_a_sink() {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(ByteSink::write(&mut out, b"abc").unwrap(), 3);
        ByteSink::flush(&mut out).unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_format_support_lists() {
        let mut support = FormatSupport::any()
            .with_sample_rates(&[44100, 48000])
            .with_channels(&[2]);

        let mut info = AudioFormatInfo::default_profile();
        assert!(support.validate(&info));

        info.sample_rate = 22050;
        assert!(!support.validate(&info));

        info.sample_rate = 48000;
        info.channels = 1;
        assert!(!support.supports(&info));
    }

    #[test]
    fn test_format_support_notify_records_format() {
        let mut support = FormatSupport::any();
        let info = AudioFormatInfo::default_profile();
        support.notify(&info);
        assert_eq!(support.current, Some(info));
    }
}
