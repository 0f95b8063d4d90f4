//! Small-buffer-optimized strings and strict text-to-number conversion.
//!
//! Two independent halves share one error type:
//!
//! - [`SboString`], a NUL-terminated byte string that keeps short content
//!   inline, grows by doubling, and supports `printf`-style formatted writes
//!   without truncation.
//! - The `parse_*` functions, which convert a complete token into an integer,
//!   a float, or a single possibly escaped character, and report failure as
//!   exactly one [`Error`] variant.
//!
//! ```rust
//! use strkit::{Error, SboString, parse_int, streamf};
//!
//! let mut line = SboString::new();
//! for token in ["17", "0x2a", "-0"] {
//!     let n: u32 = parse_int(token, 0)?;
//!     streamf!(line, "{n} ")?;
//! }
//! assert_eq!(line, "17 42 0 ");
//! assert_eq!(parse_int::<u32>("-1", 0), Err(Error::OutOfRange));
//! # Ok::<(), Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod parse;
mod string;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use parse::{
    Decoded, EscapedByte, Float, FloatPrefix, Integer, Narrowed, decode_escape, is_valid_radix,
    parse_escaped, parse_escaped_into, parse_float, parse_float_into, parse_float_prefix,
    parse_int, parse_int_into, parse_int_prefix,
};
pub use string::{MIN_INLINE_CAPACITY, SboString};

/// Replaces the content of an [`SboString`] with formatted output.
///
/// Expands to [`SboString::printf`] with the arguments captured by
/// [`format_args!`]. Returns the number of bytes written.
///
/// ```rust
/// use strkit::{SboString, printf};
///
/// let mut s = SboString::from_bytes("discarded")?;
/// assert_eq!(printf!(s, "{:>6}", 3.5)?, 6);
/// assert_eq!(s, "   3.5");
/// # Ok::<(), strkit::Error>(())
/// ```
#[macro_export]
macro_rules! printf {
    ($buf:expr, $($arg:tt)*) => {
        $buf.printf(::core::format_args!($($arg)*))
    };
}

/// Appends formatted output to an [`SboString`].
///
/// Expands to [`SboString::streamf`]. Returns the number of bytes appended.
///
/// ```rust
/// use strkit::{SboString, streamf};
///
/// let mut s = SboString::from_bytes("x=")?;
/// streamf!(s, "{}", 1)?;
/// streamf!(s, ", y={}", 2)?;
/// assert_eq!(s, "x=1, y=2");
/// # Ok::<(), strkit::Error>(())
/// ```
#[macro_export]
macro_rules! streamf {
    ($buf:expr, $($arg:tt)*) => {
        $buf.streamf(::core::format_args!($($arg)*))
    };
}
