//! Strict text-to-value conversion.
//!
//! The `parse_*` functions accept a whole token or nothing:
//!
//! - The token may end in a single NUL byte, which is ignored.
//! - Empty input and an unconsumed suffix are [`Error::MalformedInput`].
//!   Numeric tokens may not start with whitespace either; a character token
//!   may be a space.
//! - A radix other than 0 or `2..=36` is [`Error::InvalidRadix`], whatever
//!   the text.
//! - A value that does not fit the target is [`Error::OutOfRange`]. For
//!   unsigned targets that includes every negative token except the literal
//!   `-0`. A number that overflows is out of range even when junk follows.
//!
//! The `*_into` variants model callers that may hand over a missing input or
//! output: either one being `None` is [`Error::NullArgument`]. On any error
//! the output is left untouched.
//!
//! The lenient prefix parsers underneath ([`parse_int_prefix`],
//! [`parse_float_prefix`], [`decode_escape`]) are public as well.

mod escape;
mod float;
mod radix;

pub use escape::{Decoded, decode_escape};
pub use float::{Float, FloatPrefix, parse_float_prefix};
pub use radix::{Integer, Narrowed, is_valid_radix, parse_int_prefix};

use crate::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// Byte-sized types that [`parse_escaped`] can produce.
pub trait EscapedByte: Copy + sealed::Sealed {
    /// Reinterprets a decoded byte.
    fn from_byte(byte: u8) -> Self;
}

impl sealed::Sealed for u8 {}
impl sealed::Sealed for i8 {}

impl EscapedByte for u8 {
    #[inline]
    fn from_byte(byte: u8) -> Self {
        byte
    }
}

impl EscapedByte for i8 {
    #[inline]
    fn from_byte(byte: u8) -> Self {
        i8::from_ne_bytes([byte])
    }
}

/// Strips the optional terminator and rejects an empty token.
fn token(text: &[u8]) -> Result<&[u8]> {
    let text = text.strip_suffix(b"\0").unwrap_or(text);
    if text.is_empty() { Err(Error::MalformedInput) } else { Ok(text) }
}

/// [`token`], also rejecting leading whitespace the numeric prefix parsers
/// would skip.
fn numeric_token(text: &[u8]) -> Result<&[u8]> {
    let text = token(text)?;
    if radix::is_c_space(text[0]) { Err(Error::MalformedInput) } else { Ok(text) }
}

fn fully_consumed(end: usize, text: &[u8]) -> Result<()> {
    if end == text.len() {
        Ok(())
    } else {
        Err(Error::MalformedInput)
    }
}

/// Parses a complete integer token in `radix`.
///
/// ```rust
/// use strkit::{Error, parse_int};
///
/// assert_eq!(parse_int::<i32>("0x1A", 0), Ok(26));
/// assert_eq!(parse_int::<u8>("-0", 10), Ok(0));
/// assert_eq!(parse_int::<u8>("256", 10), Err(Error::OutOfRange));
/// assert_eq!(parse_int::<i32>("12 ", 10), Err(Error::MalformedInput));
/// assert_eq!(parse_int::<u8>("300x", 10), Err(Error::OutOfRange));
/// ```
///
/// # Errors
///
/// Checked in this order:
///
/// 1. [`Error::MalformedInput`] for empty input or leading whitespace.
/// 2. [`Error::InvalidRadix`].
/// 3. [`Error::OutOfRange`] if the digits overflow the target.
/// 4. [`Error::MalformedInput`] for an unconsumed suffix.
/// 5. [`Error::OutOfRange`] for a negative value and an unsigned target.
pub fn parse_int<T: Integer>(text: impl AsRef<[u8]>, radix: u32) -> Result<T> {
    let text = numeric_token(text.as_ref())?;
    let parsed = parse_int_prefix::<T>(text, radix)?;
    if parsed.out_of_range {
        return Err(Error::OutOfRange);
    }
    fully_consumed(parsed.end, text)?;

    if !T::SIGNED && parsed.negative && text != b"-0" {
        return Err(Error::OutOfRange);
    }
    Ok(parsed.value)
}

/// Parses a complete floating-point token.
///
/// Decimal notation with an optional exponent, hexadecimal notation with an
/// optional `p` exponent, and `inf`, `infinity`, `nan` or `nan(chars)` in
/// any case are accepted. A finite literal that overflows, or a nonzero
/// literal that underflows to zero, is out of range.
///
/// ```rust
/// use strkit::{Error, parse_float};
///
/// assert_eq!(parse_float::<f64>("0x1.8p1"), Ok(3.0));
/// assert_eq!(parse_float::<f32>("1e39"), Err(Error::OutOfRange));
/// assert_eq!(parse_float::<f64>("1.5kg"), Err(Error::MalformedInput));
/// ```
///
/// # Errors
///
/// [`Error::MalformedInput`] for empty input or leading whitespace, then
/// [`Error::OutOfRange`] for overflow or underflow, then
/// [`Error::MalformedInput`] for an unconsumed suffix.
pub fn parse_float<T: Float>(text: impl AsRef<[u8]>) -> Result<T> {
    let text = numeric_token(text.as_ref())?;
    let parsed = parse_float_prefix::<T>(text)?;
    if parsed.out_of_range {
        return Err(Error::OutOfRange);
    }
    fully_consumed(parsed.end, text)?;
    Ok(parsed.value)
}

/// Parses exactly one possibly escaped character. Any single byte,
/// whitespace included, stands for itself.
///
/// ```rust
/// use strkit::{Error, parse_escaped};
///
/// assert_eq!(parse_escaped::<u8>("\\x41"), Ok(b'A'));
/// assert_eq!(parse_escaped::<i8>("\\377"), Ok(-1));
/// assert_eq!(parse_escaped::<u8>(" "), Ok(b' '));
/// assert_eq!(parse_escaped::<u8>("ab"), Err(Error::MalformedInput));
/// ```
///
/// # Errors
///
/// [`Error::MalformedInput`] for empty input, an unrecognized escape or
/// trailing bytes; [`Error::OutOfRange`] for a numeric escape above 255.
pub fn parse_escaped<T: EscapedByte>(text: impl AsRef<[u8]>) -> Result<T> {
    let text = token(text.as_ref())?;
    match decode_escape(text) {
        Decoded::End | Decoded::Unrecognized => Err(Error::MalformedInput),
        Decoded::Byte { value, len } => {
            fully_consumed(len, text)?;
            Ok(T::from_byte(value))
        }
        Decoded::Clamped { len } => {
            fully_consumed(len, text)?;
            Err(Error::OutOfRange)
        }
    }
}

/// [`parse_int`] with optional input and output.
///
/// # Errors
///
/// [`Error::NullArgument`] if either argument is `None`, otherwise as
/// [`parse_int`]. `out` is only written on success.
pub fn parse_int_into<T: Integer>(text: Option<&[u8]>, radix: u32, out: Option<&mut T>) -> Result<()> {
    let (Some(text), Some(out)) = (text, out) else {
        return Err(Error::NullArgument);
    };
    *out = parse_int(text, radix)?;
    Ok(())
}

/// [`parse_float`] with optional input and output.
///
/// # Errors
///
/// [`Error::NullArgument`] if either argument is `None`, otherwise as
/// [`parse_float`]. `out` is only written on success.
pub fn parse_float_into<T: Float>(text: Option<&[u8]>, out: Option<&mut T>) -> Result<()> {
    let (Some(text), Some(out)) = (text, out) else {
        return Err(Error::NullArgument);
    };
    *out = parse_float(text)?;
    Ok(())
}

/// [`parse_escaped`] with optional input and output.
///
/// # Errors
///
/// [`Error::NullArgument`] if either argument is `None`, otherwise as
/// [`parse_escaped`]. `out` is only written on success.
pub fn parse_escaped_into<T: EscapedByte>(text: Option<&[u8]>, out: Option<&mut T>) -> Result<()> {
    let (Some(text), Some(out)) = (text, out) else {
        return Err(Error::NullArgument);
    };
    *out = parse_escaped(text)?;
    Ok(())
}
