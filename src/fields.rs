//! Canonical byte form of an ordered field list.
//!
//! Fields are joined with a single tab. A tab inside a field can't be represented, so it becomes a
//! space before joining. There is no other escaping.

use crate::error::{Error, Result};

/// Separator placed between fields.
pub const SEPARATOR: u8 = b'\t';

/// Replace every tab in a field with a space.
pub fn normalize(field: &str) -> String {
    field.replace('\t', " ")
}

/// Join fields into their canonical UTF-8 form.
pub fn join<S: AsRef<str>>(fields: &[S]) -> Vec<u8> {
    let len = fields.iter().map(|f| f.as_ref().len() + 1).sum::<usize>();
    let mut buf = Vec::with_capacity(len);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.push(SEPARATOR);
        }
        // Swap tabs byte-wise; a tab never appears inside a multi-byte UTF-8 sequence.
        buf.extend(field.as_ref().bytes().map(|b| if b == SEPARATOR { b' ' } else { b }));
    }
    buf
}

/// Split a joined byte string back into fields. Always yields one more field than there are
/// separators, so an empty input is a single empty field.
pub fn split(buf: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(buf)
        .map_err(|e| Error::CorruptPayload(format!("fields are not valid UTF-8: {}", e)))?;
    let mut fields = Vec::with_capacity(bytecount::count(buf, SEPARATOR) + 1);
    fields.extend(text.split(SEPARATOR as char).map(String::from));
    Ok(fields)
}
