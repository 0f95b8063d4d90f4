//! Bounded formatting, the `vsnprintf` of this crate.

use core::fmt::{self, Write};

/// Result of one formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pass {
    /// Bytes the complete output needs, whether or not they fit.
    pub required: usize,
    /// The output length overflowed `usize`.
    pub overflowed: bool,
}

/// A `fmt::Write` sink that copies as much output as fits into `dst` and
/// keeps counting past the end.
struct Bounded<'a> {
    dst: &'a mut [u8],
    required: usize,
    overflowed: bool,
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if let Some(room) = self.dst.get_mut(self.required..) {
            let n = room.len().min(bytes.len());
            room[..n].copy_from_slice(&bytes[..n]);
        }
        match self.required.checked_add(bytes.len()) {
            Some(required) => self.required = required,
            None => {
                self.overflowed = true;
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

/// Formats `args` into `dst`, truncating whatever does not fit.
///
/// Returns `Err` only when a formatting trait implementation fails. Size
/// overflow stops formatting early and is reported through
/// [`Pass::overflowed`].
pub(crate) fn format_into(dst: &mut [u8], args: fmt::Arguments<'_>) -> Result<Pass, fmt::Error> {
    let mut sink = Bounded {
        dst,
        required: 0,
        overflowed: false,
    };
    match sink.write_fmt(args) {
        Ok(()) => {}
        Err(_) if sink.overflowed => {}
        Err(e) => return Err(e),
    }
    Ok(Pass {
        required: sink.required,
        overflowed: sink.overflowed,
    })
}
