//! The binary envelope wrapped around a compressed payload.
//!
//! ```text
//! +----------+----------+----------+----------+=================+
//! | TTTTTTTT | 00000000 | LLLLLLLL | LLLLLLLL | Compressed body |
//! +----------+----------+----------+----------+=================+
//! ```
//!
//! `T` is the document type tag, followed by a reserved byte. `L` is the 16-bit little-endian
//! length of the payload before compression.

use crate::compress::{self, Compress};
use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

/// Size of the fixed header.
pub const HEADER_LEN: usize = 4;
/// Largest payload the length field can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;
/// Value written into the reserved byte.
pub const RESERVED: u8 = 0x00;

/// Wrap `payload` in an envelope, compressing it with the default settings.
pub fn encode(type_tag: u8, payload: &[u8]) -> Result<Vec<u8>> {
    encode_with(&Compress::default(), type_tag, payload)
}

/// Wrap `payload` in an envelope, compressing it with the given settings.
pub fn encode_with(compress: &Compress, type_tag: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(Error::FieldsTooLarge {
            max: MAX_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    let body = compress.compress(payload).map_err(Error::Compress)?;
    let mut header = [type_tag, RESERVED, 0, 0];
    LittleEndian::write_u16(&mut header[2..], payload.len() as u16);
    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(&header);
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Split an envelope into its type tag and expanded payload.
pub fn decode(buf: &[u8]) -> Result<(u8, Vec<u8>)> {
    if buf.len() < HEADER_LEN {
        debug!(len = buf.len(), "envelope shorter than its header");
        return Err(Error::TruncatedEnvelope { actual: buf.len() });
    }
    let (header, body) = buf.split_at(HEADER_LEN);
    let type_tag = header[0];
    let reserved = header[1];
    if reserved != RESERVED {
        debug!(reserved, "ignoring non-zero reserved byte");
    }
    let len = LittleEndian::read_u16(&header[2..]) as usize;
    let payload = compress::decompress(body, len).map_err(|e| {
        debug!(type_tag, len, error = %e, "envelope body failed to decompress");
        Error::from(e)
    })?;
    Ok((type_tag, payload))
}
