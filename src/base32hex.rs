//! Base32 with the "extended hex" alphabet (RFC 4648 section 7), without padding.
//!
//! The alphabet `0-9A-V` fits inside the QR alphanumeric mode, which keeps the final symbol small.

use crate::error::{Error, Result};

/// The 32 symbols, in value order.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

// Symbols left over after the last complete 8-symbol group, indexed by leftover bytes (0-4).
const TAIL_SYMBOLS: [usize; 5] = [0, 2, 4, 5, 7];

/// Number of symbols needed to encode `len` bytes.
pub fn encoded_len(len: usize) -> usize {
    (len / 5) * 8 + TAIL_SYMBOLS[len % 5]
}

/// Number of bytes held by `symbols` symbols, or `None` if that count can't come from a whole
/// number of bytes.
pub fn decoded_len(symbols: usize) -> Option<usize> {
    let tail = TAIL_SYMBOLS.iter().position(|&t| t == symbols % 8)?;
    Some((symbols / 8) * 5 + tail)
}

fn symbol_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'V' => Some(c - b'A' + 10),
        b'a'..=b'v' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Encode bytes as unpadded base32hex.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(data.len()));
    let mut acc: u16 = 0;
    let mut bits = 0u32;
    for &byte in data {
        acc = (acc << 8) | byte as u16;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1F) as usize] as char);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((acc << (5 - bits)) & 0x1F) as usize] as char);
    }
    out
}

/// Decode unpadded base32hex. Case-insensitive.
///
/// Every character is checked before the length, so a bad character is reported even when the
/// length is also wrong. Leftover bits in the final symbol are discarded.
pub fn decode(code: &str) -> Result<Vec<u8>> {
    let mut values = Vec::with_capacity(code.len());
    for (position, character) in code.chars().enumerate() {
        let value = u8::try_from(character)
            .ok()
            .and_then(symbol_value)
            .ok_or(Error::InvalidCharacter {
                character,
                position,
            })?;
        values.push(value);
    }
    let len = decoded_len(values.len()).ok_or(Error::InvalidLength {
        symbols: values.len(),
    })?;

    let mut out = Vec::with_capacity(len);
    let mut acc: u16 = 0;
    let mut bits = 0u32;
    for value in values {
        acc = (acc << 5) | value as u16;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    debug_assert_eq!(out.len(), len);
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    // Test vectors from RFC 4648, with padding removed
    const VECTORS: &[(&str, &str)] = &[
        ("", ""),
        ("f", "CO"),
        ("fo", "CPNG"),
        ("foo", "CPNMU"),
        ("foob", "CPNMUOG"),
        ("fooba", "CPNMUOJ1"),
        ("foobar", "CPNMUOJ1E8"),
    ];

    #[test]
    fn rfc_vectors() {
        for (raw, enc) in VECTORS {
            assert_eq!(encode(raw.as_bytes()), *enc);
            assert_eq!(decode(enc).unwrap(), raw.as_bytes());
        }
    }

    #[test]
    fn lowercase_accepted() {
        assert_eq!(decode("cpnmuoj1e8").unwrap(), b"foobar");
        assert_eq!(decode("CpNmUoJ1e8").unwrap(), b"foobar");
    }

    #[test]
    fn random_round_trip() {
        let mut rng = rand::thread_rng();
        for len in 0..200usize {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let enc = encode(&data);
            assert_eq!(enc.len(), encoded_len(len));
            assert!(enc.bytes().all(|b| ALPHABET.contains(&b)));
            assert_eq!(decode(&enc).unwrap(), data);
        }
    }

    #[test]
    fn lengths() {
        for symbols in 0..64usize {
            let valid = matches!(symbols % 8, 0 | 2 | 4 | 5 | 7);
            assert_eq!(decoded_len(symbols).is_some(), valid, "symbols = {}", symbols);
        }
        assert_eq!(decoded_len(7), Some(4));
        assert_eq!(decoded_len(8), Some(5));
        assert_eq!(decoded_len(10), Some(6));
        match decode("CPN") {
            Err(Error::InvalidLength { symbols }) => assert_eq!(symbols, 3),
            other => panic!("expected InvalidLength, got {:?}", other),
        }
        assert!(matches!(decode("C"), Err(Error::InvalidLength { .. })));
        assert!(matches!(decode("CPNMUO"), Err(Error::InvalidLength { .. })));
    }

    #[test]
    fn bad_characters() {
        match decode("CPNMUOW1") {
            Err(Error::InvalidCharacter {
                character,
                position,
            }) => {
                assert_eq!(character, 'W');
                assert_eq!(position, 6);
            }
            other => panic!("expected InvalidCharacter, got {:?}", other),
        }
        assert!(matches!(decode("CO=="), Err(Error::InvalidCharacter { character: '=', .. })));
        assert!(matches!(decode("C O"), Err(Error::InvalidCharacter { .. })));
        assert!(matches!(decode("CŽ"), Err(Error::InvalidCharacter { position: 1, .. })));
        // Character errors win over length errors
        assert!(matches!(decode("W"), Err(Error::InvalidCharacter { .. })));
    }
}
