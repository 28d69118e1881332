use serde::{Deserialize, Serialize};
use std::fmt;

/// The one-byte tag at the front of every code, selecting which schema the fields follow.
///
/// Only two values are known today. Anything else is carried through untouched, so that codes
/// for newer schemas still decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DocumentType {
    /// Payment order ("PAY by square"), tag `0x00`.
    PaymentOrder,
    /// Invoice ("INVOICE by square"), tag `0x10`.
    Invoice,
    /// Any other tag.
    Other(u8),
}

impl DocumentType {
    /// Convert DocumentType to a single byte.
    pub fn to_u8(self) -> u8 {
        match self {
            DocumentType::PaymentOrder => 0x00,
            DocumentType::Invoice => 0x10,
            DocumentType::Other(v) => v,
        }
    }

    /// Read a byte as a DocumentType. Never fails; unknown values become [`DocumentType::Other`].
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x00 => DocumentType::PaymentOrder,
            0x10 => DocumentType::Invoice,
            v => DocumentType::Other(v),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(Self::from_u8(self.to_u8()), DocumentType::Other(_))
    }
}

impl From<u8> for DocumentType {
    fn from(v: u8) -> Self {
        Self::from_u8(v)
    }
}

impl From<DocumentType> for u8 {
    fn from(val: DocumentType) -> u8 {
        val.to_u8()
    }
}

impl std::default::Default for DocumentType {
    fn default() -> Self {
        DocumentType::PaymentOrder
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::PaymentOrder => f.write_str("payment order"),
            DocumentType::Invoice => f.write_str("invoice"),
            DocumentType::Other(v) => write!(f, "unknown type 0x{:02x}", v),
        }
    }
}
