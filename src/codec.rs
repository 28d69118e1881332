//! The full field list to code chain, and back.
//!
//! Encoding joins the fields, puts a checksum in front, wraps the result in an envelope and
//! writes it out as base32hex. Decoding runs the same steps in reverse and stops at the first one
//! that fails; nothing is returned unless every step, checksum included, succeeded.

use crate::compress::Compress;
use crate::document_type::DocumentType;
use crate::error::{Error, Result};
use crate::{base32hex, checksum, envelope, fields};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Fewest symbols that can carry a complete envelope header.
pub const MIN_CODE_LEN: usize = 7;

/// A decoded code: the document type tag and its ordered fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tag: DocumentType,
    pub fields: Vec<String>,
}

impl Document {
    pub fn new<T: Into<DocumentType>>(tag: T, fields: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            fields,
        }
    }

    /// Encode this document with the default compression settings.
    pub fn encode(&self) -> Result<String> {
        encode(self.tag, &self.fields)
    }

    /// Decode a code into a document.
    pub fn decode(code: &str) -> Result<Self> {
        decode(code)
    }
}

/// Encoder/decoder pair. Holds only encoder settings; every call is independent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codec {
    #[serde(default)]
    compress: Compress,
}

impl Codec {
    pub fn new(compress: Compress) -> Self {
        Self { compress }
    }

    pub fn compress(&self) -> &Compress {
        &self.compress
    }

    /// Encode a field list under the given document type tag.
    ///
    /// Tabs inside fields are turned into spaces. Fails only if the checksum and joined fields
    /// together exceed 65535 bytes.
    pub fn encode<T, S>(&self, tag: T, fields: &[S]) -> Result<String>
    where
        T: Into<DocumentType>,
        S: AsRef<str>,
    {
        let tag = tag.into();
        let joined = fields::join(fields);
        let payload_len = checksum::CHECKSUM_LEN + joined.len();
        if payload_len > envelope::MAX_PAYLOAD_LEN {
            return Err(Error::FieldsTooLarge {
                max: envelope::MAX_PAYLOAD_LEN,
                actual: payload_len,
            });
        }
        let payload = checksum::seal(&joined);
        let raw = envelope::encode_with(&self.compress, tag.to_u8(), &payload)?;
        let code = base32hex::encode(&raw);
        trace!(
            %tag,
            fields = fields.len(),
            payload = payload.len(),
            envelope = raw.len(),
            code = code.len(),
            "encoded document"
        );
        Ok(code)
    }

    /// Decode a code back into its document type tag and fields.
    pub fn decode(&self, code: &str) -> Result<Document> {
        let raw = base32hex::decode(code).map_err(|e| match e {
            // Too short for a header, whatever the alignment
            Error::InvalidLength { symbols } if symbols < MIN_CODE_LEN => {
                Error::TruncatedEnvelope {
                    actual: symbols * 5 / 8,
                }
            }
            e => e,
        });
        let raw = raw.map_err(|e| {
            debug!(len = code.len(), error = %e, "code rejected");
            e
        })?;
        let (tag, payload) = envelope::decode(&raw)?;
        let joined = checksum::open(&payload).map_err(|e| {
            debug!(tag, error = %e, "payload failed integrity check");
            e
        })?;
        let fields = fields::split(joined)?;
        let tag = DocumentType::from_u8(tag);
        if !tag.is_known() {
            debug!(%tag, "passing through unrecognized document type");
        }
        trace!(%tag, fields = fields.len(), "decoded document");
        Ok(Document { tag, fields })
    }
}

/// Encode a field list with the default settings. See [`Codec::encode`].
pub fn encode<T, S>(tag: T, fields: &[S]) -> Result<String>
where
    T: Into<DocumentType>,
    S: AsRef<str>,
{
    Codec::default().encode(tag, fields)
}

/// Decode a code. See [`Codec::decode`].
pub fn decode(code: &str) -> Result<Document> {
    Codec::default().decode(code)
}
