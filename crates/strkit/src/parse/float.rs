//! Prefix floating-point parsing.
//!
//! The scanner finds the longest prefix `strtod` would accept: a sign, then
//! decimal digits with an optional fraction and exponent, or a `0x` mantissa
//! with an optional `p` binary exponent, or one of `inf`, `infinity`, `nan`
//! and `nan(chars)` in any case. Decimal and special literals go to `core`'s
//! parser. Hexadecimal literals are exact in binary, so they are rounded to
//! nearest-even here.

use core::str::FromStr;

use crate::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// Floating-point types the parsers can produce.
pub trait Float: Copy + FromStr + sealed::Sealed {
    /// Positive zero.
    const ZERO: Self;
    /// Significand precision in bits, counting the implicit leading bit.
    const MANTISSA_DIGITS: u32;
    /// One more than the largest binary exponent of a finite value.
    const MAX_EXP: i32;

    /// Builds a value from a sign and the IEEE 754 bit pattern of its
    /// magnitude.
    fn from_ieee(negative: bool, magnitude: u64) -> Self;

    /// Whether the value is positive or negative infinity.
    fn is_infinite(self) -> bool;
    /// Whether the value is positive or negative zero.
    fn is_zero(self) -> bool;
}

macro_rules! impl_float {
    ($($ty:ident: $bits:ty),+) => {$(
        impl sealed::Sealed for $ty {}

        impl Float for $ty {
            const ZERO: Self = 0.0;
            const MANTISSA_DIGITS: u32 = $ty::MANTISSA_DIGITS;
            const MAX_EXP: i32 = $ty::MAX_EXP;

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn from_ieee(negative: bool, magnitude: u64) -> Self {
                let sign = u64::from(negative) << (<$bits>::BITS - 1);
                <$ty>::from_bits((sign | magnitude) as $bits)
            }

            #[inline]
            fn is_infinite(self) -> bool {
                <$ty>::is_infinite(self)
            }

            #[inline]
            fn is_zero(self) -> bool {
                self == 0.0
            }
        }
    )+};
}

impl_float!(f32: u32, f64: u64);

/// Outcome of a floating-point prefix parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPrefix<T> {
    /// The value; infinite on overflow and zero on underflow.
    pub value: T,
    /// Bytes consumed. Zero when no number was found.
    pub end: usize,
    /// A finite literal overflowed to infinity or a nonzero literal
    /// underflowed to zero.
    pub out_of_range: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Number { nonzero: bool },
    /// `inf`, `infinity` or `nan`, ending at `word_end`.
    Special { word_end: usize },
    /// `mantissa * 2^exp`, plus less than one unit when `sticky`.
    Hex {
        negative: bool,
        mantissa: u64,
        sticky: bool,
        exp: i64,
    },
}

struct Token {
    start: usize,
    end: usize,
    literal: Literal,
}

fn digits(text: &[u8], from: usize) -> usize {
    text[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn special_len(text: &[u8]) -> usize {
    const WORDS: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];
    WORDS
        .iter()
        .find(|word| {
            text.get(..word.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(word))
        })
        .map_or(0, |word| word.len())
}

/// Length of a `(n-char-sequence)` payload at the start of `text`, or zero.
fn nan_payload_len(text: &[u8]) -> usize {
    if text.first() != Some(&b'(') {
        return 0;
    }
    let chars = text[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if text.get(1 + chars) == Some(&b')') { chars + 2 } else { 0 }
}

/// Largest binary exponent magnitude kept while scanning. Anything beyond
/// saturates to overflow or underflow either way.
const EXP_LIMIT: i64 = 1 << 20;

fn scan_hex(text: &[u8], from: usize, negative: bool) -> Option<(usize, Literal)> {
    let mut i = from;
    let mut mantissa = 0u64;
    let mut sticky = false;
    let mut exp = 0i64;
    let mut seen = false;
    let mut fraction = false;

    while let Some(&b) = text.get(i) {
        if b == b'.' && !fraction {
            fraction = true;
            i += 1;
            continue;
        }
        let Some(digit) = char::from(b).to_digit(16) else {
            break;
        };
        seen = true;
        if mantissa < 1 << 60 {
            mantissa = (mantissa << 4) | u64::from(digit);
            if fraction {
                exp -= 4;
            }
        } else {
            sticky |= digit != 0;
            if !fraction {
                exp += 4;
            }
        }
        i += 1;
    }
    if !seen {
        return None;
    }

    if matches!(text.get(i), Some(b'p' | b'P')) {
        let mut j = i + 1;
        let exp_negative = text.get(j) == Some(&b'-');
        if matches!(text.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(text, j);
        if exp_digits > 0 {
            let magnitude = text[j..j + exp_digits]
                .iter()
                .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(EXP_LIMIT));
            exp += if exp_negative { -magnitude } else { magnitude };
            i = j + exp_digits;
        }
    }

    Some((
        i,
        Literal::Hex {
            negative,
            mantissa,
            sticky,
            exp,
        },
    ))
}

/// Rounds `mantissa * 2^exp` (plus a sticky remainder) to the nearest `T`,
/// ties to even. Returns the value and whether it overflowed to infinity or
/// underflowed to zero.
fn compose_hex<T: Float>(negative: bool, mantissa: u64, sticky: bool, exp: i64) -> (T, bool) {
    if mantissa == 0 {
        return (T::from_ieee(negative, 0), false);
    }
    let precision = T::MANTISSA_DIGITS;
    let bias = i64::from(T::MAX_EXP) - 1;
    let min_exp = 1 - bias;
    let infinity = (u64::from(T::MAX_EXP.unsigned_abs()) * 2 - 1) << (precision - 1);

    let shift = mantissa.leading_zeros();
    let mantissa = u128::from(mantissa << shift);
    // The value is now 1.f * 2^top.
    let top = exp + 63 - i64::from(shift);
    if top > bias {
        return (T::from_ieee(negative, infinity), true);
    }

    let subnormal_shift = if top >= min_exp { 0 } else { min_exp - top };
    let drop = u32::try_from(i64::from(64 - precision) + subnormal_shift).unwrap_or(u32::MAX);
    if drop > 64 {
        return (T::from_ieee(negative, 0), true);
    }

    let mut kept = mantissa >> drop;
    let rem = mantissa & ((1 << drop) - 1);
    let half = 1 << (drop - 1);
    if rem > half || (rem == half && (sticky || kept & 1 == 1)) {
        kept += 1;
    }

    // A normal significand carries its implicit bit into the exponent field,
    // so the field is biased one lower. A carry out of rounding moves into
    // the exponent the same way.
    let field = if top >= min_exp { top + bias - 1 } else { 0 };
    let field = u64::try_from(field).unwrap_or(0);
    let kept = u64::try_from(kept).unwrap_or(u64::MAX);
    let bits = (field << (precision - 1)) + kept;

    if bits >= infinity {
        (T::from_ieee(negative, infinity), true)
    } else {
        (T::from_ieee(negative, bits), bits == 0)
    }
}

fn scan(text: &[u8]) -> Option<Token> {
    let start = text.iter().take_while(|&&b| super::radix::is_c_space(b)).count();
    let mut i = start;
    let negative = text.get(i) == Some(&b'-');
    if matches!(text.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let special = special_len(&text[i..]);
    if special > 0 {
        let word_end = i + special;
        let mut end = word_end;
        if special == 3 && text[i].eq_ignore_ascii_case(&b'n') {
            end += nan_payload_len(&text[end..]);
        }
        return Some(Token {
            start,
            end,
            literal: Literal::Special { word_end },
        });
    }

    if text.get(i) == Some(&b'0') && matches!(text.get(i + 1), Some(b'x' | b'X')) {
        if let Some((end, literal)) = scan_hex(text, i + 2, negative) {
            return Some(Token {
                start,
                end,
                literal,
            });
        }
    }

    let int_digits = digits(text, i);
    let mut nonzero = text[i..i + int_digits].iter().any(|&b| b != b'0');
    i += int_digits;

    let mut frac_digits = 0;
    if text.get(i) == Some(&b'.') {
        frac_digits = digits(text, i + 1);
        if int_digits + frac_digits > 0 {
            nonzero |= text[i + 1..i + 1 + frac_digits].iter().any(|&b| b != b'0');
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(text.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(text.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(text, j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    Some(Token {
        start,
        end: i,
        literal: Literal::Number { nonzero },
    })
}

/// Parses the longest floating-point prefix of `text`.
///
/// ```rust
/// use strkit::parse_float_prefix;
///
/// let f = parse_float_prefix::<f64>(b"2.5e3ms")?;
/// assert_eq!((f.value, f.end), (2500.0, 5));
/// # Ok::<(), strkit::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::MalformedInput`] if `core` rejects a prefix the scanner
/// accepted, which does not happen for the grammar above.
pub fn parse_float_prefix<T: Float>(text: &[u8]) -> Result<FloatPrefix<T>> {
    let Some(token) = scan(text) else {
        return Ok(FloatPrefix {
            value: T::ZERO,
            end: 0,
            out_of_range: false,
        });
    };

    let literal_end = match token.literal {
        Literal::Hex {
            negative,
            mantissa,
            sticky,
            exp,
        } => {
            let (value, out_of_range) = compose_hex::<T>(negative, mantissa, sticky, exp);
            return Ok(FloatPrefix {
                value,
                end: token.end,
                out_of_range,
            });
        }
        Literal::Special { word_end } => word_end,
        Literal::Number { .. } => token.end,
    };

    // The scanner only accepts ASCII.
    let literal = core::str::from_utf8(&text[token.start..literal_end])
        .map_err(|_| Error::MalformedInput)?;
    let value = T::from_str(literal).map_err(|_| Error::MalformedInput)?;

    let out_of_range = match token.literal {
        Literal::Number { nonzero } => value.is_infinite() || (nonzero && value.is_zero()),
        Literal::Special { .. } | Literal::Hex { .. } => false,
    };

    Ok(FloatPrefix {
        value,
        end: token.end,
        out_of_range,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::parse_float_prefix;

    #[rstest]
    #[case("1.5", 1.5, 3)]
    #[case("  -2", -2.0, 4)]
    #[case("+.25", 0.25, 4)]
    #[case("3.", 3.0, 2)]
    #[case("1e3", 1000.0, 3)]
    #[case("1E-2x", 0.01, 4)]
    #[case("1e", 1.0, 1)]
    #[case("1e+", 1.0, 1)]
    #[case("7.5.3", 7.5, 3)]
    #[case("0x10", 16.0, 4)]
    #[case("0x1p3", 8.0, 5)]
    #[case("-0X1.8P1", -3.0, 8)]
    #[case("0x.8", 0.5, 4)]
    #[case("0xA.p-2x", 2.5, 7)]
    #[case("0x1p", 1.0, 3)]
    #[case("0x1p-", 1.0, 3)]
    #[case("0x", 0.0, 1)]
    #[case("0x.p1", 0.0, 1)]
    #[case("0xg", 0.0, 1)]
    #[case(".", 0.0, 0)]
    #[case("-", 0.0, 0)]
    #[case("", 0.0, 0)]
    #[case("e5", 0.0, 0)]
    fn scans_prefix(#[case] text: &str, #[case] value: f64, #[case] end: usize) {
        let f = parse_float_prefix::<f64>(text.as_bytes()).unwrap();
        assert_eq!((f.value, f.end, f.out_of_range), (value, end, false));
    }

    #[rstest]
    #[case("inf", 3)]
    #[case("-INF", 4)]
    #[case("Infinity", 8)]
    #[case("infinit", 3)]
    fn infinity(#[case] text: &str, #[case] end: usize) {
        let f = parse_float_prefix::<f64>(text.as_bytes()).unwrap();
        assert!(f.value.is_infinite());
        assert_eq!((f.end, f.out_of_range), (end, false));
    }

    #[rstest]
    #[case("NaN", true, 3)]
    #[case("nan(tail)", true, 9)]
    #[case("-nan(0x_7f)", true, 11)]
    #[case("nan()", true, 5)]
    #[case("nan(a-b)", true, 3)]
    #[case("nan(open", true, 3)]
    #[case("inf(x)", false, 3)]
    fn nan(#[case] text: &str, #[case] is_nan: bool, #[case] end: usize) {
        let f = parse_float_prefix::<f32>(text.as_bytes()).unwrap();
        assert_eq!((f.value.is_nan(), f.end), (is_nan, end));
    }

    #[rstest]
    #[case("0x1.fffffffffffffp1023", f64::MAX)]
    #[case("0x1p-1022", f64::MIN_POSITIVE)]
    #[case("0x1p-1074", f64::from_bits(1))]
    #[case("0x1.8p-1074", f64::from_bits(2))]
    #[case("0x1p-1075", 0.0)]
    #[case("0x1.00000000000008p0", 1.0)]
    #[case("0x1.00000000000018p0", 1.0 + 2.0 * f64::EPSILON)]
    #[case("0x1.000000000000080000001p0", 1.0 + f64::EPSILON)]
    #[case("0x1.fffffffffffff8p0", 2.0)]
    #[case("0x1.00000000000008000p0", 1.0)]
    #[case("0x100000000000000000001p-80", 1.0)]
    fn hex_rounding(#[case] text: &str, #[case] expected: f64) {
        let f = parse_float_prefix::<f64>(text.as_bytes()).unwrap();
        assert_eq!(f.value.to_bits(), expected.to_bits(), "{text}");
    }

    #[test]
    fn hex_range() {
        let f = parse_float_prefix::<f64>(b"0x1p1024").unwrap();
        assert!(f.value.is_infinite() && f.out_of_range);
        let f = parse_float_prefix::<f64>(b"0x1.fffffffffffff8p1023").unwrap();
        assert!(f.value.is_infinite() && f.out_of_range);
        let f = parse_float_prefix::<f64>(b"-0x1p-1076").unwrap();
        assert!(f.value == 0.0 && f.value.is_sign_negative() && f.out_of_range);
        let f = parse_float_prefix::<f64>(b"0x0p99999999999").unwrap();
        assert!(f.value == 0.0 && !f.out_of_range);
        let f = parse_float_prefix::<f32>(b"0x1.fffffep127").unwrap();
        assert_eq!((f.value, f.out_of_range), (f32::MAX, false));
        let f = parse_float_prefix::<f32>(b"0x1p128").unwrap();
        assert!(f.value.is_infinite() && f.out_of_range);
        let f = parse_float_prefix::<f32>(b"0x1p-149").unwrap();
        assert_eq!((f.value.to_bits(), f.out_of_range), (1, false));
    }

    #[test]
    fn range() {
        let f = parse_float_prefix::<f64>(b"1e400").unwrap();
        assert!(f.value.is_infinite() && f.out_of_range);
        let f = parse_float_prefix::<f32>(b"1e39").unwrap();
        assert!(f.value.is_infinite() && f.out_of_range);
        let f = parse_float_prefix::<f64>(b"-1e-400").unwrap();
        assert!(f.value == 0.0 && f.out_of_range);
        let f = parse_float_prefix::<f64>(b"0e-400").unwrap();
        assert!(f.value == 0.0 && !f.out_of_range);
        let f = parse_float_prefix::<f64>(b"0.000e999").unwrap();
        assert!(f.value == 0.0 && !f.out_of_range);
    }
}
