//! pcmflow - moving raw PCM between byte transports and sample buffers
//!
//! pcmflow sits between a byte-oriented transport (a file, a socket, a DAC
//! feed) and in-memory stereo sample buffers.
//!
//! # Architecture
//!
//! - `format`: the byte sink and format negotiation seams, plus the streaming
//!   RIFF/WAVE header parser, decoder and encoder
//! - `filter`: in-place sample converters and the chain that runs them
//! - `util`: sample types (`I24`, the `Sample` trait) and sample format tags
//!
//! All components are synchronous and single-writer: every call processes one
//! buffer and returns. Share an instance across threads only behind your own
//! lock.

pub mod error;
pub mod filter;
pub mod format;
pub mod util;

pub use error::{Error, Result};
pub use filter::{ConverterChain, SampleConverter};
pub use format::wav::{AudioFormatInfo, WavDecoder, WavEncoder, WavHeader};
pub use format::{ByteSink, FormatNegotiator};

/// pcmflow version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the pcmflow library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the pcmflow library with the given configuration
///
/// Installs a global `tracing` subscriber when logging is requested. A second
/// installation attempt is reported as [`Error::Init`].
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
            .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}
