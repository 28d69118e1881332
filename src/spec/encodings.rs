/*!

Encoding format used for BySquare codes.

All layers are fixed. There is no version negotiation inside the code, and the 
compression parameters are not stored anywhere: a reader must already know them.

# Fields

The document's fields are ordered text values. Their meaning is set by the 
schema selected with the document type tag, and is outside of this crate. To 
serialize them:

1. Every tab character (`0x09`) inside a field is replaced with a space (`0x20`).
2. The fields are joined with a single tab between each pair.
3. The joined string is encoded as UTF-8.

Reading splits on every tab byte, so `n` tabs always give `n + 1` fields. An 
empty field list and a list with one empty field serialize identically.

# Payload

```text
+----------+----------+----------+----------+===============+
| CCCCCCCC | CCCCCCCC | CCCCCCCC | CCCCCCCC | Joined fields |
+----------+----------+----------+----------+===============+

- CCCCCCCC_CCCCCCCC_CCCCCCCC_CCCCCCCC is the 32-bit little-endian CRC-32 
    (IEEE polynomial, reflected) of the joined fields only.
```

The payload may not exceed 65535 bytes, checksum included.

# Compression

The payload is compressed as a raw LZMA1 stream: no `.lzma` or `.xz` header, no 
uncompressed size, and no end marker is required. The parameters are:

| Parameter               | Value  |
| --                      | --     |
| Literal context bits    | 3      |
| Literal position bits   | 0      |
| Position bits           | 2      |
| Dictionary size         | 131072 |

Encoders may choose any match finder or effort setting. Decoders stop once they 
have produced the number of bytes given in the envelope, ignoring any further 
compressed data (typically an end-of-payload marker).

# Envelope

```text
+----------+----------+----------+----------+=================+
| TTTTTTTT | RRRRRRRR | LLLLLLLL | LLLLLLLL | Compressed body |
+----------+----------+----------+----------+=================+

- TTTTTTTT is the document type tag
- RRRRRRRR is reserved, written as 0 and ignored on read
- LLLLLLLL_LLLLLLLL is the 16-bit little-endian length of the payload before 
    compression
```

Known document type tags:

| Tag    | Document      |
| --     | --            |
| `0x00` | Payment order |
| `0x10` | Invoice       |

Other tags are passed through untouched.

# Text

The envelope is written using the base32hex alphabet from RFC 4648, 
`0123456789ABCDEFGHIJKLMNOPQRSTUV`, with all padding removed. Decoders accept 
either case. Since padding is stripped, the number of symbols left after the 
last full group of 8 must be 0, 2, 4, 5, or 7; any other count can't have come 
from whole bytes. Bits past the last whole byte are ignored.

# Decoding Order

A reader checks, in order, and stops at the first failure:

1. Every character is in the alphabet.
2. The code holds at least 7 symbols (enough for the envelope header).
3. The symbol count ends on a byte boundary.
4. The compressed body expands to the full promised length.
5. The payload checksum matches the joined fields.
6. The joined fields are valid UTF-8.

*/
