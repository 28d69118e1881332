use crate::compress::CompressionError;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// The CRC-32 stored in front of the fields didn't match the one computed over them.
    ChecksumMismatch { expected: u32, actual: u32 },
    /// The compressed body couldn't be expanded to the length promised by the header, or the
    /// expanded fields weren't valid UTF-8.
    CorruptPayload(String),
    /// The code was too short to hold the 4-byte header.
    TruncatedEnvelope { actual: usize },
    /// Checksum plus joined fields exceed what the 16-bit length field can describe.
    FieldsTooLarge { max: usize, actual: usize },
    /// A character outside of `0-9A-V` (case-insensitive) was found in the code.
    InvalidCharacter { character: char, position: usize },
    /// The number of symbols in the code doesn't end on a byte boundary.
    InvalidLength { symbols: usize },
    /// The compression backend refused to set up an encoder. Only reachable with a compression
    /// setting that bypassed validation.
    Compress(CompressionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ChecksumMismatch { expected, actual } => write!(
                f,
                "Checksum mismatch: code carries {:08x}, fields hash to {:08x}",
                expected, actual
            ),
            Error::CorruptPayload(ref err) => write!(f, "Corrupt payload: {}", err),
            Error::TruncatedEnvelope { actual } => write!(
                f,
                "Envelope truncated: need at least 4 header bytes, got {}",
                actual
            ),
            Error::FieldsTooLarge { max, actual } => write!(
                f,
                "Fields too large: payload is {} bytes, maximum allowed is {}",
                actual, max
            ),
            Error::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "Invalid character {:?} at position {}",
                character, position
            ),
            Error::InvalidLength { symbols } => write!(
                f,
                "Invalid code length: {} symbols don't end on a byte boundary",
                symbols
            ),
            Error::Compress(ref err) => write!(f, "Failed compression step: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Compress(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<CompressionError> for Error {
    fn from(e: CompressionError) -> Self {
        Self::CorruptPayload(e.to_string())
    }
}
