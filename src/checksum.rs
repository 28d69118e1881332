//! CRC-32 integrity check over the joined fields.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use crc32fast::Hasher;

/// Length of the serialized checksum.
pub const CHECKSUM_LEN: usize = 4;

/// Compute the CRC-32 (IEEE) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Compute the CRC-32 of `data`, serialized little-endian.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    LittleEndian::write_u32(&mut out, crc32(data));
    out
}

/// Check `data` against a stored little-endian checksum.
pub fn verify(stored: [u8; CHECKSUM_LEN], data: &[u8]) -> Result<()> {
    let expected = LittleEndian::read_u32(&stored);
    let actual = crc32(data);
    if expected != actual {
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Build a payload: checksum of `fields` followed by `fields` itself.
pub fn seal(fields: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(CHECKSUM_LEN + fields.len());
    payload.extend_from_slice(&checksum(fields));
    payload.extend_from_slice(fields);
    payload
}

/// Split a payload into checksum and fields, verifying the checksum. The checksum never covers
/// itself.
pub fn open(payload: &[u8]) -> Result<&[u8]> {
    if payload.len() < CHECKSUM_LEN {
        return Err(Error::CorruptPayload(format!(
            "payload is {} bytes, too short to hold a checksum",
            payload.len()
        )));
    }
    let (stored, fields) = payload.split_at(CHECKSUM_LEN);
    let mut raw = [0u8; CHECKSUM_LEN];
    raw.copy_from_slice(stored);
    verify(raw, fields)?;
    Ok(fields)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(checksum(b"123456789"), [0x26, 0x39, 0xF4, 0xCB]);
    }

    #[test]
    fn seal_then_open() {
        let payload = seal(b"a\tb");
        assert_eq!(payload.len(), 7);
        assert_eq!(&payload[..4], &checksum(b"a\tb"));
        assert_eq!(open(&payload).unwrap(), b"a\tb");

        let empty = seal(b"");
        assert_eq!(empty, vec![0, 0, 0, 0]);
        assert_eq!(open(&empty).unwrap(), b"");
    }

    #[test]
    fn detects_corruption() {
        let mut payload = seal(b"SK1234567890123456789012");
        let last = payload.len() - 1;
        payload[last] ^= 0x01;
        match open(&payload) {
            Err(Error::ChecksumMismatch { expected, actual }) => assert_ne!(expected, actual),
            other => panic!("expected ChecksumMismatch, got {:?}", other),
        }

        let mut payload = seal(b"Name");
        payload[0] ^= 0x80;
        assert!(matches!(open(&payload), Err(Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn short_payload() {
        assert!(matches!(open(&[1, 2, 3]), Err(Error::CorruptPayload(_))));
    }
}
