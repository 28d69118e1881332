//! Raw LZMA1 compression, fixed to the stream parameters every BySquare reader expects.
//!
//! The compressed body carries no header, no uncompressed size, and no guaranteed end marker. A
//! reader has to know the parameters below ahead of time and learn the output length from the
//! envelope.

use liblzma::stream::{Action, Filters, LzmaOptions, Status, Stream};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};
use tracing::trace;

/// Literal context bits (`lc`).
pub const LITERAL_CONTEXT_BITS: u32 = 3;
/// Literal position bits (`lp`).
pub const LITERAL_POSITION_BITS: u32 = 0;
/// Position bits (`pb`).
pub const POSITION_BITS: u32 = 2;
/// Dictionary size, 128 kiB.
pub const DICT_SIZE: u32 = 1 << 17;

/// Highest encoder preset level accepted by liblzma.
pub const MAX_LEVEL: u8 = 9;
/// Preset level used by the reference producer.
pub const DEFAULT_LEVEL: u8 = 6;

const PRESET_EXTREME: u32 = 0x8000_0000;

#[derive(Debug)]
pub enum CompressionError {
    /// liblzma rejected the options or the input.
    Lzma(liblzma::stream::Error),
    /// The stream ran dry before producing the promised number of bytes.
    Truncated { expected: usize, actual: usize },
    /// The encoder stopped making progress with output space still available.
    Stalled,
    /// Preset level outside of 0-9.
    Level(u8),
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionError::Lzma(e) => write!(f, "lzma failure ({})", e),
            CompressionError::Truncated { expected, actual } => write!(
                f,
                "stream ended after {} bytes, header promised {}",
                actual, expected
            ),
            CompressionError::Stalled => f.write_str("encoder stopped making progress"),
            CompressionError::Level(l) => write!(
                f,
                "compression level {} is out of range, maximum is {}",
                l, MAX_LEVEL
            ),
        }
    }
}

impl std::error::Error for CompressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompressionError::Lzma(e) => Some(e),
            _ => None,
        }
    }
}

impl From<liblzma::stream::Error> for CompressionError {
    fn from(value: liblzma::stream::Error) -> Self {
        CompressionError::Lzma(value)
    }
}

/// Encoder effort settings.
///
/// Only the amount of work the encoder puts in can be tuned. The stream parameters are fixed, so
/// any setting produces codes readable by any decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompressSerde")]
pub struct Compress {
    level: u8,
    extreme: bool,
}

// Struct used solely for deserialization
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CompressSerde {
    level: u8,
    #[serde(default)]
    extreme: bool,
}

impl TryFrom<CompressSerde> for Compress {
    type Error = CompressionError;
    fn try_from(value: CompressSerde) -> Result<Self, Self::Error> {
        let compress = Compress::new(value.level).ok_or(CompressionError::Level(value.level))?;
        Ok(compress.with_extreme(value.extreme))
    }
}

impl Compress {
    /// Create a new setting with the given preset level. Fails if the level is above 9.
    pub fn new(level: u8) -> Option<Self> {
        if level > MAX_LEVEL {
            return None;
        }
        Some(Self {
            level,
            extreme: false,
        })
    }

    /// Enable or disable liblzma's "extreme" preset variant. Slower, occasionally smaller.
    pub fn with_extreme(mut self, extreme: bool) -> Self {
        self.extreme = extreme;
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_extreme(&self) -> bool {
        self.extreme
    }

    fn filters(&self) -> Result<Filters, CompressionError> {
        if self.level > MAX_LEVEL {
            return Err(CompressionError::Level(self.level));
        }
        let mut preset = self.level as u32;
        if self.extreme {
            preset |= PRESET_EXTREME;
        }
        let mut options = LzmaOptions::new_preset(preset)?;
        options
            .literal_context_bits(LITERAL_CONTEXT_BITS)
            .literal_position_bits(LITERAL_POSITION_BITS)
            .position_bits(POSITION_BITS)
            .dict_size(DICT_SIZE);
        let mut filters = Filters::new();
        filters.lzma1(&options);
        Ok(filters)
    }

    /// Compress `src` into a raw LZMA1 stream.
    pub fn compress(&self, src: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut stream = Stream::new_raw_encoder(&self.filters()?)?;
        let mut output = Vec::with_capacity(src.len() / 2 + 64);
        loop {
            if output.len() == output.capacity() {
                output.reserve(output.capacity().max(64));
            }
            let read = stream.total_in() as usize;
            let written = output.len();
            let status = stream.process_vec(&src[read..], &mut output, Action::Finish)?;
            if matches!(status, Status::StreamEnd) {
                break;
            }
            let progressed = stream.total_in() as usize != read || output.len() != written;
            if !progressed && output.len() < output.capacity() {
                return Err(CompressionError::Stalled);
            }
        }
        trace!(input = src.len(), output = output.len(), "compressed payload");
        Ok(output)
    }
}

impl std::default::Default for Compress {
    fn default() -> Self {
        Compress {
            level: DEFAULT_LEVEL,
            extreme: false,
        }
    }
}

/// Expand a raw LZMA1 stream, stopping as soon as `expected_len` bytes have been produced.
///
/// Anything left in `src` after that point (usually an end marker) is ignored. Running out of
/// input, or hitting an end marker, before `expected_len` is reached is an error.
pub fn decompress(src: &[u8], expected_len: usize) -> Result<Vec<u8>, CompressionError> {
    let mut stream = Stream::new_raw_decoder(&Compress::default().filters()?)?;
    let mut output = vec![0u8; expected_len];
    let mut read = 0;
    let mut written = 0;
    while written < expected_len {
        let status = stream.process(&src[read..], &mut output[written..], Action::Run)?;
        let total_in = stream.total_in() as usize;
        let total_out = stream.total_out() as usize;
        let progressed = total_in != read || total_out != written;
        read = total_in;
        written = total_out;
        if matches!(status, Status::StreamEnd) || !progressed {
            break;
        }
    }
    if written < expected_len {
        return Err(CompressionError::Truncated {
            expected: expected_len,
            actual: written,
        });
    }
    trace!(input = read, output = written, "decompressed payload");
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn round_trip_text() {
        let data = b"\x01\x02\x03\x04\t0\t2\tEUR\t20230101\t\t\t\tSK1234567890123456789012\t\tName";
        let compressed = Compress::default().compress(data).unwrap();
        let expanded = decompress(&compressed, data.len()).unwrap();
        assert_eq!(&expanded[..], &data[..]);
    }

    #[test]
    fn round_trip_random() {
        let mut rng = rand::thread_rng();
        for len in [0usize, 1, 5, 100, 4096, 65535] {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let compressed = Compress::default().compress(&data).unwrap();
            let expanded = decompress(&compressed, data.len()).unwrap();
            assert_eq!(expanded, data);
        }
    }

    #[test]
    fn every_level_is_readable() {
        let data = "Lorem ipsum dolor sit amet\t".repeat(40);
        for level in 0..=MAX_LEVEL {
            for extreme in [false, true] {
                let compress = Compress::new(level).unwrap().with_extreme(extreme);
                let compressed = compress.compress(data.as_bytes()).unwrap();
                let expanded = decompress(&compressed, data.len()).unwrap();
                assert_eq!(expanded, data.as_bytes());
            }
        }
    }

    #[test]
    fn compresses_repetitive_data() {
        let data = vec![b'A'; 10_000];
        let compressed = Compress::default().compress(&data).unwrap();
        assert!(compressed.len() < 200);
    }

    #[test]
    fn stops_at_expected_length() {
        let data = b"0123456789abcdef".repeat(8);
        let compressed = Compress::default().compress(&data).unwrap();
        let expanded = decompress(&compressed, 20).unwrap();
        assert_eq!(&expanded[..], &data[..20]);
    }

    #[test]
    fn short_stream_fails() {
        let data = b"0123456789abcdef".repeat(8);
        let compressed = Compress::default().compress(&data).unwrap();
        match decompress(&compressed, data.len() + 1) {
            Err(CompressionError::Truncated { expected, .. }) => {
                assert_eq!(expected, data.len() + 1)
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn cut_stream_fails() {
        let mut rng = rand::thread_rng();
        let data: Vec<u8> = (0..1000).map(|_| rng.gen()).collect();
        let compressed = Compress::default().compress(&data).unwrap();
        let cut = &compressed[..compressed.len() / 2];
        assert!(decompress(cut, data.len()).is_err());
    }

    #[test]
    fn empty_stream() {
        assert!(decompress(&[], 0).unwrap().is_empty());
        decompress(&[], 1).unwrap_err();
    }

    #[test]
    fn level_limits() {
        assert!(Compress::new(MAX_LEVEL).is_some());
        assert!(Compress::new(MAX_LEVEL + 1).is_none());
        assert_eq!(Compress::default().level(), DEFAULT_LEVEL);
        assert!(!Compress::default().is_extreme());
    }

    #[test]
    fn serde_settings() {
        let compress: Compress = serde_json::from_str(r#"{"level":9,"extreme":true}"#).unwrap();
        assert_eq!(compress, Compress::new(9).unwrap().with_extreme(true));
        let compress: Compress = serde_json::from_str(r#"{"level":2}"#).unwrap();
        assert_eq!(compress, Compress::new(2).unwrap());
        serde_json::from_str::<Compress>(r#"{"level":10}"#).unwrap_err();
        serde_json::from_str::<Compress>(r#"{"level":1,"dict":5}"#).unwrap_err();

        let json = serde_json::to_string(&Compress::default()).unwrap();
        let back: Compress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Compress::default());
    }
}
