#![no_main]
use std::cell::RefCell;

use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use strkit::{Error, parse_escaped, parse_float, parse_int};

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Fragments the scanners branch on.
static TOKEN_TABLE: &[&[u8]] = &[
    b"0", b"0x", b"0X", b"-", b"+", b"-0", b" ", b"\t", b"\0", b"\\", b"\\x", b"\\0",
    b".", b"e", b"E-", b"inf", b"nan", b"nan(", b"p-", b"0x1.", b"9999999999999999999999", b"ff", b"z",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Splices a fragment from `TOKEN_TABLE` at a random position after the
/// radix byte, or defers to libFuzzer's own mutation.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < 1 || seed % 4 != 0 {
        return fuzzer_mutate(data, size, max_size);
    }

    let fragment = with_rng(|rng| TOKEN_TABLE[rng.random_range(0..TOKEN_TABLE.len())]);
    if size + fragment.len() > max_size {
        return fuzzer_mutate(data, size, max_size);
    }

    let at = with_rng(|rng| rng.random_range(1..=size));
    data.copy_within(at..size, at + fragment.len());
    data[at..at + fragment.len()].copy_from_slice(fragment);
    size + fragment.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn check_int(text: &[u8], radix: u32) {
    let ours = parse_int::<i64>(text, radix);
    if let Err(e) = ours {
        assert!(
            matches!(e, Error::MalformedInput | Error::OutOfRange | Error::InvalidRadix(_)),
            "unexpected error {e:?}"
        );
    }

    let Ok(token) = std::str::from_utf8(text) else {
        return;
    };
    if !(2..=36).contains(&radix) {
        return;
    }
    match i64::from_str_radix(token, radix) {
        Ok(value) => assert_eq!(ours, Ok(value), "token {token:?} radix {radix}"),
        Err(_) if radix == 16 || token.ends_with('\0') => {}
        Err(_) => assert!(ours.is_err(), "token {token:?} radix {radix} gave {ours:?}"),
    }

    if let Ok(value) = parse_int::<u64>(text, radix) {
        let token = token.strip_suffix('\0').unwrap_or(token);
        assert!(!token.starts_with('-') || (token == "-0" && value == 0));
    }
}

fn check_float(text: &[u8]) {
    let Ok(ours) = parse_float::<f64>(text) else {
        return;
    };
    let token = std::str::from_utf8(text).expect("accepted floats are ASCII");
    let token = token.strip_suffix('\0').unwrap_or(token);
    let unsigned = token.trim_start_matches(['+', '-']);
    if unsigned.starts_with("0x") || unsigned.starts_with("0X") || token.ends_with(')') {
        return;
    }
    let core: f64 = token.parse().expect("core rejects an accepted float");
    assert!(ours.to_bits() == core.to_bits() || (ours.is_nan() && core.is_nan()));
}

fn check_escaped(text: &[u8]) {
    if let Ok(byte) = parse_escaped::<u8>(text) {
        let token = text.strip_suffix(b"\0").unwrap_or(text);
        if token.len() == 1 {
            assert_eq!(byte, token[0]);
        } else {
            assert_eq!(token[0], b'\\');
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, text)) = data.split_first() else {
        return;
    };
    let radix = u32::from(selector % 40);

    check_int(text, radix);
    check_float(text);
    check_escaped(text);
});
