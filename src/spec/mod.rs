/*!

The format specifications for BySquare codes.

A BySquare code is a chain of simple transforms over an ordered list of text 
fields. Each layer is described on its own page:

- [Encoding Codes](./encodings/index.html)

*/

pub mod encodings;
