//! Capacity policy for [`SboString`](super::SboString).
//!
//! Growth doubles the current capacity until the request fits. Doubling is
//! checked: when `size * 2` would overflow, the next size is `usize::MAX`,
//! which is always large enough because the request is itself a `usize`.
//!
//! Shrinking is only reachable through `reserve` with the `shrink` feature.
//! It triggers when the request drops below a quarter of the capacity and
//! halves the capacity as long as the half still holds the request.

use super::MIN_INLINE_CAPACITY;
use crate::{Error, Result};

/// Smallest capacity reachable by doubling `current` that holds `min_size`
/// bytes.
pub(crate) fn grow_capacity(current: usize, min_size: usize) -> usize {
    let mut size = current.max(MIN_INLINE_CAPACITY);
    while size < min_size {
        size = size.checked_mul(2).unwrap_or(usize::MAX);
    }
    size
}

/// The capacity `reserve(min_size)` shrinks to, or `None` when the request
/// is not small enough to be worth a reallocation.
#[cfg_attr(not(any(test, feature = "shrink")), expect(dead_code))]
pub(crate) fn shrink_capacity(current: usize, min_size: usize) -> Option<usize> {
    if min_size >= current >> 2 {
        return None;
    }

    let mut size = current >> 1;
    while size > MIN_INLINE_CAPACITY && size >> 1 >= min_size {
        size >>= 1;
    }
    Some(size.max(MIN_INLINE_CAPACITY))
}

/// Length of `len` bytes followed by `extra` bytes, provided the result and
/// its terminator still fit in a `usize`.
pub(crate) fn joined_len(len: usize, extra: usize) -> Result<usize> {
    // `len + 1` cannot overflow: the terminator already occupies a byte.
    if usize::MAX - (len + 1) < extra {
        return Err(Error::OutOfRange);
    }
    Ok(len + extra)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{grow_capacity, joined_len, shrink_capacity};
    use crate::Error;

    #[rstest]
    #[case(16, 1, 16)]
    #[case(16, 16, 16)]
    #[case(16, 17, 32)]
    #[case(16, 1001, 1024)]
    #[case(21, 22, 42)]
    #[case(21, 100, 168)]
    fn grow_doubles(#[case] current: usize, #[case] min: usize, #[case] expected: usize) {
        assert_eq!(grow_capacity(current, min), expected);
    }

    #[test]
    fn grow_clamps_instead_of_overflowing() {
        let half = usize::MAX / 2 + 1;
        assert_eq!(grow_capacity(half, half + 1), usize::MAX);
        assert_eq!(grow_capacity(16, usize::MAX), usize::MAX);
        assert_eq!(grow_capacity(3 << (usize::BITS - 3), usize::MAX - 1), usize::MAX);
    }

    #[rstest]
    #[case(1024, 256, None)]
    #[case(1024, 255, Some(256))]
    #[case(1024, 100, Some(128))]
    #[case(1024, 0, Some(16))]
    #[case(64, 15, Some(16))]
    #[case(16, 0, Some(16))]
    #[case(16, 4, None)]
    fn shrink_halves(#[case] current: usize, #[case] min: usize, #[case] expected: Option<usize>) {
        assert_eq!(shrink_capacity(current, min), expected);
    }

    #[test]
    fn joined_len_guards_overflow() {
        assert_eq!(joined_len(5, 6), Ok(11));
        assert_eq!(joined_len(0, usize::MAX - 1), Ok(usize::MAX - 1));
        assert_eq!(joined_len(0, usize::MAX), Err(Error::OutOfRange));
        assert_eq!(joined_len(10, usize::MAX - 10), Err(Error::OutOfRange));
        assert_eq!(joined_len(usize::MAX - 1, 1), Err(Error::OutOfRange));
    }
}
