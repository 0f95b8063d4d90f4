//! Prefix integer parsing at the widest width, narrowed per target type.
//!
//! The scan follows `strtol`: optional leading whitespace, one optional
//! sign, an optional `0x` prefix for radix 16 (or radix 0), then as many
//! digits as the radix allows. The magnitude is accumulated in a `u128`;
//! narrowing to the target type clamps to its bounds and flags the result.

use crate::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// Integer types the parsers can produce.
///
/// Implemented for every primitive integer. `MIN` and `MAX` are the type's
/// bounds widened to 128 bits.
pub trait Integer: Copy + sealed::Sealed {
    /// Whether the type has negative values.
    const SIGNED: bool;
    /// Smallest value.
    const MIN: i128;
    /// Largest value.
    const MAX: u128;

    /// Two's-complement truncation of `bits` to this width.
    fn truncate(bits: u128) -> Self;
}

macro_rules! impl_integer {
    ($signed:literal: $($ty:ty),+) => {$(
        impl sealed::Sealed for $ty {}

        impl Integer for $ty {
            const SIGNED: bool = $signed;
            #[allow(clippy::cast_lossless)]
            const MIN: i128 = <$ty>::MIN as i128;
            #[allow(clippy::cast_lossless)]
            const MAX: u128 = <$ty>::MAX as u128;

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn truncate(bits: u128) -> Self {
                bits as $ty
            }
        }
    )+};
}

impl_integer!(true: i8, i16, i32, i64, i128, isize);
impl_integer!(false: u8, u16, u32, u64, u128, usize);

/// Outcome of a prefix parse narrowed to `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narrowed<T> {
    /// The value, clamped to `T`'s bounds when out of range. Negative input
    /// for an unsigned type wraps, as `strtoul` does.
    pub value: T,
    /// Bytes consumed. Zero when no digits were found.
    pub end: usize,
    /// The text denotes a value outside `T`'s range.
    pub out_of_range: bool,
    /// A minus sign was consumed.
    pub negative: bool,
}

/// The accumulated result before narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wide {
    magnitude: u128,
    overflow: bool,
    negative: bool,
    end: usize,
}

/// Whether `radix` is `0` (auto-detect) or within `2..=36`.
#[inline]
#[must_use]
pub fn is_valid_radix(radix: u32) -> bool {
    radix == 0 || (2..=36).contains(&radix)
}

/// C `isspace` in the "C" locale.
#[inline]
pub(crate) fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

#[inline]
fn digit(byte: u8, radix: u32) -> Option<u32> {
    char::from(byte).to_digit(radix)
}

fn scan(text: &[u8], radix: u32) -> Wide {
    let mut i = text.iter().take_while(|&&b| is_c_space(b)).count();

    let mut negative = false;
    match text.get(i) {
        Some(b'-') => {
            negative = true;
            i += 1;
        }
        Some(b'+') => i += 1,
        _ => {}
    }

    let has_hex_prefix = text.get(i) == Some(&b'0')
        && matches!(text.get(i + 1), Some(b'x' | b'X'))
        && text.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
    let radix = match radix {
        0 | 16 if has_hex_prefix => {
            i += 2;
            16
        }
        0 if text.get(i) == Some(&b'0') => 8,
        0 => 10,
        radix => radix,
    };

    let digits_start = i;
    let mut magnitude = 0u128;
    let mut overflow = false;
    while let Some(d) = text.get(i).and_then(|&b| digit(b, radix)) {
        match magnitude
            .checked_mul(u128::from(radix))
            .and_then(|m| m.checked_add(u128::from(d)))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
        i += 1;
    }

    if i == digits_start {
        return Wide {
            magnitude: 0,
            overflow: false,
            negative: false,
            end: 0,
        };
    }

    Wide {
        magnitude,
        overflow,
        negative,
        end: i,
    }
}

fn narrow<T: Integer>(wide: Wide) -> Narrowed<T> {
    let Wide {
        magnitude,
        overflow,
        negative,
        end,
    } = wide;

    let (bits, out_of_range) = if negative && T::SIGNED {
        if overflow || magnitude > T::MIN.unsigned_abs() {
            (T::MIN.unsigned_abs().wrapping_neg(), true)
        } else {
            (magnitude.wrapping_neg(), false)
        }
    } else if overflow || magnitude > T::MAX {
        (T::MAX, true)
    } else if negative {
        (magnitude.wrapping_neg(), false)
    } else {
        (magnitude, false)
    };

    Narrowed {
        value: T::truncate(bits),
        end,
        out_of_range,
        negative,
    }
}

/// Parses the longest integer prefix of `text` in `radix`.
///
/// `radix` 0 picks 16 for a `0x`/`0X` prefix, 8 for a leading `0`, and 10
/// otherwise. Text without digits consumes nothing and yields zero. A `0x`
/// that is not followed by a hex digit consumes only the `0`.
///
/// ```rust
/// use strkit::parse_int_prefix;
///
/// let n = parse_int_prefix::<i8>(b"300 apples", 10)?;
/// assert_eq!((n.value, n.end, n.out_of_range), (i8::MAX, 3, true));
/// # Ok::<(), strkit::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::InvalidRadix`] if `radix` is neither 0 nor in `2..=36`.
pub fn parse_int_prefix<T: Integer>(text: &[u8], radix: u32) -> Result<Narrowed<T>> {
    if !is_valid_radix(radix) {
        return Err(Error::InvalidRadix(radix));
    }
    Ok(narrow(scan(text, radix)))
}
