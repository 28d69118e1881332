#![no_main]
use libfuzzer_sys::fuzz_target;
use bysquare_pack::{decode, encode};

fuzz_target!(|data: &[u8]| {
    let Some((&tag, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let fields: Vec<&str> = text.split('\t').collect();
    let Ok(code) = encode(tag, &fields) else {
        return;
    };
    let doc = decode(&code).expect("freshly encoded code must decode");
    assert_eq!(u8::from(doc.tag), tag);
    assert_eq!(doc.fields, fields);
});
