#![allow(missing_docs)]

use strkit::{Decoded, Error, SboString, decode_escape, parse_escaped, parse_float, parse_int};

#[test]
fn set_then_append_builds_hello_world() {
    let mut s = SboString::new();
    s.set("hello").unwrap();
    s.append(" world").unwrap();
    assert_eq!(s, "hello world");
    assert_eq!(s.len(), 11);
    assert_eq!(s.as_c_str().to_bytes(), b"hello world");
}

#[test]
fn auto_radix_hex() {
    assert_eq!(parse_int::<i32>("0x1A", 0), Ok(26));
}

#[test]
fn u32_overflow_is_out_of_range() {
    assert_eq!(parse_int::<u32>("4294967296", 10), Err(Error::OutOfRange));
}

#[test]
fn leading_whitespace_is_malformed() {
    assert_eq!(parse_int::<i32>(" 5", 10), Err(Error::MalformedInput));
}

#[test]
fn whitespace_is_a_valid_character() {
    assert_eq!(parse_escaped::<u8>(" "), Ok(b' '));
    assert_eq!(parse_escaped::<u8>("\t"), Ok(b'\t'));
    assert_eq!(parse_int::<u8>(" ", 10), Err(Error::MalformedInput));
}

#[test]
fn overflow_wins_over_trailing_junk() {
    assert_eq!(parse_int::<u32>("4294967296x", 10), Err(Error::OutOfRange));
    assert_eq!(parse_float::<f64>("1e400x"), Err(Error::OutOfRange));
}

#[test]
fn hex_float_literal() {
    assert_eq!(parse_float::<f64>("0x1p3"), Ok(8.0));
}

#[test]
fn hex_escape_decodes_one_byte() {
    assert_eq!(parse_escaped::<u8>("\\x41"), Ok(b'A'));
    assert_eq!(decode_escape(b"\\x41"), Decoded::Byte { value: b'A', len: 4 });
}

#[test]
fn thousand_appends_reach_power_of_two_capacity() {
    let mut s = SboString::new();
    for _ in 0..1000 {
        s.append("a").unwrap();
    }
    assert_eq!(s.len(), 1000);
    assert_eq!(s.capacity(), 1024);
}

#[test]
fn minus_zero_is_the_only_negative_unsigned() {
    assert_eq!(parse_int::<u32>("-0", 10), Ok(0));
    assert_eq!(parse_int::<u32>("-1", 10), Err(Error::OutOfRange));
}
