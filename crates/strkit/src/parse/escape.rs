//! Single-character escape decoding.

/// What [`decode_escape`] found at the head of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// The input is empty.
    End,
    /// A backslash that does not start a complete escape: `\x` without a hex
    /// digit, or a backslash at the end of the input. Nothing is consumed.
    Unrecognized,
    /// A byte, decoded from `len` input bytes.
    Byte {
        /// The decoded byte.
        value: u8,
        /// Input bytes consumed.
        len: usize,
    },
    /// A hex or octal escape whose value exceeds 255. The value clamps to
    /// 255 and every digit is consumed.
    Clamped {
        /// Input bytes consumed.
        len: usize,
    },
}

impl Decoded {
    /// The decoded byte, with [`Decoded::Clamped`] reading as 255.
    #[must_use]
    pub fn value(self) -> Option<u8> {
        match self {
            Decoded::Byte { value, .. } => Some(value),
            Decoded::Clamped { .. } => Some(u8::MAX),
            Decoded::End | Decoded::Unrecognized => None,
        }
    }

    /// Input bytes consumed.
    #[must_use]
    pub fn consumed(self) -> usize {
        match self {
            Decoded::Byte { len, .. } | Decoded::Clamped { len } => len,
            Decoded::End | Decoded::Unrecognized => 0,
        }
    }
}

/// Greedily reads digits of `radix` from the start of `text`, saturating
/// the accumulated value. Returns the value and the digit count.
fn number(text: &[u8], radix: u32) -> (u32, usize) {
    text.iter()
        .map_while(|&b| char::from(b).to_digit(radix))
        .fold((0u32, 0), |(value, count), d| {
            (value.saturating_mul(radix).saturating_add(d), count + 1)
        })
}

fn numeric(value: u32, len: usize) -> Decoded {
    match u8::try_from(value) {
        Ok(value) => Decoded::Byte { value, len },
        Err(_) => Decoded::Clamped { len },
    }
}

/// Decodes one possibly escaped byte from the head of `text`.
///
/// Recognized escapes are `\a \b \f \n \r \t \v \\`, `\x` followed by hex
/// digits, and `\` followed by octal digits. A backslash before any other
/// byte yields that byte.
///
/// ```rust
/// use strkit::{Decoded, decode_escape};
///
/// assert_eq!(decode_escape(b"\\x41;"), Decoded::Byte { value: b'A', len: 4 });
/// assert_eq!(decode_escape(b"\\101!"), Decoded::Byte { value: b'A', len: 4 });
/// assert_eq!(decode_escape(b"\\q"), Decoded::Byte { value: b'q', len: 2 });
/// ```
#[must_use]
pub fn decode_escape(text: &[u8]) -> Decoded {
    let Some((&first, rest)) = text.split_first() else {
        return Decoded::End;
    };
    if first != b'\\' {
        return Decoded::Byte {
            value: first,
            len: 1,
        };
    }

    let Some(&kind) = rest.first() else {
        return Decoded::Unrecognized;
    };
    let simple = |value| Decoded::Byte { value, len: 2 };
    match kind {
        b'a' => simple(0x07),
        b'b' => simple(0x08),
        b'f' => simple(0x0c),
        b'n' => simple(b'\n'),
        b'r' => simple(b'\r'),
        b't' => simple(b'\t'),
        b'v' => simple(0x0b),
        b'x' => match number(&rest[1..], 16) {
            (_, 0) => Decoded::Unrecognized,
            (value, count) => numeric(value, 2 + count),
        },
        b'0'..=b'7' => {
            let (value, count) = number(rest, 8);
            numeric(value, 1 + count)
        }
        other => simple(other),
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String};
    use core::fmt::Write;

    use bstr::BStr;

    use super::{Decoded, decode_escape};

    #[test]
    fn decoder_table() {
        let inputs: [&[u8]; 20] = [
            b"",
            b"A",
            b"AB",
            b"\\",
            b"\\a",
            b"\\b",
            b"\\f",
            b"\\n",
            b"\\r",
            b"\\t",
            b"\\v",
            b"\\\\",
            b"\\\"",
            b"\\x41",
            b"\\xg",
            b"\\x0000041",
            b"\\x100",
            b"\\0",
            b"\\377",
            b"\\400",
        ];
        let mut table = String::new();
        for input in inputs {
            let shown = format!("{:?}", BStr::new(input));
            writeln!(table, "{shown:<12} {:?}", decode_escape(input)).unwrap();
        }
        insta::assert_snapshot!(table.trim_end(), @r#"
        ""           End
        "A"          Byte { value: 65, len: 1 }
        "AB"         Byte { value: 65, len: 1 }
        "\\"         Unrecognized
        "\\a"        Byte { value: 7, len: 2 }
        "\\b"        Byte { value: 8, len: 2 }
        "\\f"        Byte { value: 12, len: 2 }
        "\\n"        Byte { value: 10, len: 2 }
        "\\r"        Byte { value: 13, len: 2 }
        "\\t"        Byte { value: 9, len: 2 }
        "\\v"        Byte { value: 11, len: 2 }
        "\\\\"       Byte { value: 92, len: 2 }
        "\\\""       Byte { value: 34, len: 2 }
        "\\x41"      Byte { value: 65, len: 4 }
        "\\xg"       Unrecognized
        "\\x0000041" Byte { value: 65, len: 9 }
        "\\x100"     Clamped { len: 5 }
        "\\0"        Byte { value: 0, len: 2 }
        "\\377"      Byte { value: 255, len: 4 }
        "\\400"      Clamped { len: 4 }
        "#);
    }

    #[test]
    fn octal_is_greedy_and_stops_at_eight() {
        assert_eq!(decode_escape(b"\\1238"), Decoded::Byte { value: 0o123, len: 4 });
        assert_eq!(decode_escape(b"\\8"), Decoded::Byte { value: b'8', len: 2 });
    }

    #[test]
    fn huge_values_saturate() {
        let d = decode_escape(b"\\xffffffffffffffffffffffff");
        assert_eq!(d, Decoded::Clamped { len: 26 });
        assert_eq!(d.value(), Some(u8::MAX));
        assert_eq!(d.consumed(), 26);
    }

    #[test]
    fn accessors() {
        assert_eq!(Decoded::End.value(), None);
        assert_eq!(Decoded::Unrecognized.consumed(), 0);
        assert_eq!(decode_escape(b"\\n").value(), Some(b'\n'));
    }
}
