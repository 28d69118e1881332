//! bysquare-pack encodes and decodes the short alphanumeric strings carried in BySquare payment
//! and invoice QR codes.
//!
//! A code is built from an ordered list of text fields and a one-byte document type tag:
//!
//! - The fields are joined with tabs into a single UTF-8 string. Tabs inside a field become
//! 	spaces.
//! - A CRC-32 of the joined fields is placed in front of them.
//! - The result is compressed as a raw LZMA1 stream with fixed parameters, and a 4-byte header
//! 	holding the tag and the uncompressed length is put in front.
//! - The envelope is written out in base32hex, without padding.
//!
//! Decoding reverses every step and verifies the checksum. Mapping payment orders or invoices to
//! field lists, and drawing the QR code itself, are left to the caller.
//!
//! ```
//! use bysquare_pack::{decode, encode, DocumentType};
//!
//! let fields = ["", "1", "1", "25.00", "EUR", "20240101"];
//! let code = encode(DocumentType::PaymentOrder, &fields).unwrap();
//! let doc = decode(&code).unwrap();
//! assert_eq!(doc.tag, DocumentType::PaymentOrder);
//! assert_eq!(doc.fields, fields);
//! ```

pub mod base32hex;
pub mod checksum;
mod codec;
pub mod compress;
mod document_type;
pub mod envelope;
mod error;
pub mod fields;
pub mod spec;

pub use codec::{decode, encode, Codec, Document, MIN_CODE_LEN};
pub use compress::{Compress, CompressionError};
pub use document_type::DocumentType;
pub use envelope::{HEADER_LEN, MAX_PAYLOAD_LEN};
pub use error::{Error, Result};
