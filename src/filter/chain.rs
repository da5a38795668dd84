//! Converter chain for sequential in-place conversion
//!
//! Every stage works on the same buffer and sees what the previous stage left
//! behind. Order matters: a `Scaler` placed before an `AutoCenter` changes the
//! offset the latter measures.

use super::{ConverterSpec, SampleConverter};
use crate::util::{Sample, StereoFrame};
use tracing::debug;

/// A chain of converters applied in insertion order
pub struct ConverterChain<T: Sample> {
    converters: Vec<Box<dyn SampleConverter<T> + Send>>,
}

impl<T: Sample> ConverterChain<T> {
    /// Create a new empty converter chain
    pub fn new() -> Self {
        ConverterChain {
            converters: Vec::new(),
        }
    }

    /// Build a chain from serializable converter descriptions
    pub fn from_specs(specs: &[ConverterSpec]) -> Self {
        let mut chain = Self::new();
        for spec in specs {
            let converter = spec.build::<T>();
            debug!(converter = converter.name(), "Adding converter to chain");
            chain.push(converter);
        }
        chain
    }

    /// Add a converter to the end of the chain
    pub fn add<C>(mut self, converter: C) -> Self
    where
        C: SampleConverter<T> + Send + 'static,
    {
        self.push(converter);
        self
    }

    /// Add a converter to the end of the chain (mutable version)
    pub fn push<C>(&mut self, converter: C)
    where
        C: SampleConverter<T> + Send + 'static,
    {
        self.converters.push(Box::new(converter));
    }

    /// Get the number of converters in the chain
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert the first `frame_count` frames of `buffer`
    ///
    /// `frame_count` is clamped to the buffer length.
    pub fn convert_frames(&mut self, buffer: &mut [StereoFrame<T>], frame_count: usize) {
        let end = frame_count.min(buffer.len());
        self.convert(&mut buffer[..end]);
    }
}

impl<T: Sample> SampleConverter<T> for ConverterChain<T> {
    fn convert(&mut self, frames: &mut [StereoFrame<T>]) {
        for converter in &mut self.converters {
            converter.convert(frames);
        }
    }
}

impl<T: Sample> Default for ConverterChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::audio::{AutoCenter, FillLeftRight, Scaler, SwitchLeftRight};

    #[test]
    fn test_empty_chain() {
        let mut chain = ConverterChain::<i16>::new();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());

        let mut frames = [[3i16, 4]];
        chain.convert(&mut frames);
        assert_eq!(frames, [[3, 4]]);
    }

    #[test]
    fn test_chain_builder() {
        let chain = ConverterChain::<i16>::new()
            .add(Scaler::new(0.5, 0, i16::MAX))
            .add(Scaler::new(2.0, 0, i16::MAX));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_stages_run_in_insertion_order() {
        // +10 then x2 gives 2(v+10); the reverse order would give 2v+10
        let mut chain = ConverterChain::<i32>::new()
            .add(Scaler::new(1.0, 10, 1000))
            .add(Scaler::new(2.0, 0, 1000));
        let mut frames = [[1, 2]];
        chain.convert(&mut frames);
        assert_eq!(frames, [[22, 24]]);
    }

    #[test]
    fn test_later_stage_measures_earlier_output() {
        let mut chain = ConverterChain::<i32>::new()
            .add(Scaler::new(0.5, 0, 1000))
            .add(AutoCenter::new());
        let mut frames = [[200, 0], [200, 0]];
        chain.convert(&mut frames);
        // AutoCenter saw 100, not 200
        assert_eq!(frames, [[0, -100], [0, -100]]);
    }

    #[test]
    fn test_fill_then_switch() {
        let mut chain = ConverterChain::<i16>::new()
            .add(FillLeftRight::new())
            .add(SwitchLeftRight);
        let mut frames = [[0i16, 9], [0, 8]];
        chain.convert(&mut frames);
        assert_eq!(frames, [[9, 9], [8, 8]]);
    }

    #[test]
    fn test_convert_frames_limits_range() {
        let mut chain = ConverterChain::<i16>::new().add(SwitchLeftRight);
        let mut frames = [[1i16, 2], [3, 4], [5, 6]];
        chain.convert_frames(&mut frames, 2);
        assert_eq!(frames, [[2, 1], [4, 3], [5, 6]]);
        chain.convert_frames(&mut frames, 10);
        assert_eq!(frames, [[1, 2], [3, 4], [6, 5]]);
    }
}
