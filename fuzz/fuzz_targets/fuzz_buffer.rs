#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strkit::{SboString, printf, streamf};

#[derive(Debug, Arbitrary)]
enum Op {
    Set(Vec<u8>),
    Append(Vec<u8>),
    Push(u8),
    Concat(Vec<u8>),
    Clear,
    Reserve(u16),
    ResizeToFit,
    Printf(i64, String),
    Streamf(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut s = SboString::new();
    let mut model: Vec<u8> = Vec::new();

    for op in ops {
        let before = s.capacity();
        match op {
            Op::Set(bytes) => {
                s.set(&bytes).unwrap();
                model = bytes;
            }
            Op::Append(bytes) => {
                s.append(&bytes).unwrap();
                model.extend_from_slice(&bytes);
            }
            Op::Push(byte) => {
                s.push(byte).unwrap();
                model.push(byte);
            }
            Op::Concat(bytes) => {
                let joined = s.concat(&bytes).unwrap();
                joined.assert_invariants();
                let mut expected = model.clone();
                expected.extend_from_slice(&bytes);
                assert_eq!(joined.as_bytes(), expected.as_slice());
            }
            Op::Clear => {
                s.clear();
                model.clear();
                assert_eq!(s.capacity(), before);
            }
            Op::Reserve(size) => {
                let size = usize::from(size);
                s.reserve(size).unwrap();
                if s.capacity() < before {
                    model.truncate(s.capacity() - 1);
                } else {
                    assert!(s.capacity() >= size);
                }
            }
            Op::ResizeToFit => {
                s.resize_to_fit().unwrap();
                assert_eq!(s.capacity(), (model.len() + 1).max(strkit::MIN_INLINE_CAPACITY));
            }
            Op::Printf(n, text) => {
                let expected = format!("{n}/{text}");
                assert_eq!(printf!(s, "{n}/{text}").unwrap(), expected.len());
                model = expected.into_bytes();
            }
            Op::Streamf(text) => {
                assert_eq!(streamf!(s, "{text}").unwrap(), text.len());
                model.extend_from_slice(text.as_bytes());
            }
        }

        s.assert_invariants();
        assert_eq!(s.as_bytes(), model.as_slice());
    }
});
