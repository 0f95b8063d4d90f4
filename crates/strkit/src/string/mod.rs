//! A growable byte string with small-buffer optimization.
//!
//! Overview
//! - [`SboString`] keeps short strings in a 16 byte inline array and moves to
//!   a heap allocation once the content and its terminator no longer fit.
//! - The content is always followed by a NUL byte, so the buffer can be
//!   handed to C as-is through [`SboString::as_c_str`] or
//!   [`SboString::as_bytes_with_nul`]. Callers are expected to keep the
//!   content free of interior NULs; the buffer itself stores bytes verbatim.
//!
//! Capacity
//! - `capacity >= len + 1` and `capacity >= MIN_INLINE_CAPACITY` always hold.
//! - Growth doubles from the current capacity (see `growth`), which keeps
//!   appends amortized O(1). Nothing shrinks the buffer implicitly;
//!   [`SboString::resize_to_fit`] and, with the `shrink` feature,
//!   [`SboString::reserve`] are the only ways down.
//!
//! Failure
//! - Allocation goes through `Vec::try_reserve_exact`, so running out of
//!   memory is an [`Error::AllocationFailure`] instead of an abort. A failed
//!   operation leaves the buffer as it was, with two documented exceptions in
//!   [`SboString::printf`] and [`SboString::reserve`].

mod format;
mod growth;
#[cfg(feature = "serde")]
mod serde_impl;

use alloc::{boxed::Box, vec::Vec};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    ffi::CStr,
    fmt,
    hash::{Hash, Hasher},
};

use bstr::{BStr, ByteSlice};

use crate::{Error, Result};

/// Size of the inline buffer, and therefore the smallest capacity a
/// [`SboString`] can have. Content of up to 15 bytes never allocates.
pub const MIN_INLINE_CAPACITY: usize = 16;

#[derive(Clone)]
enum Storage {
    Inline([u8; MIN_INLINE_CAPACITY]),
    Heap(Box<[u8]>),
}

impl Storage {
    const fn inline() -> Self {
        Storage::Inline([0; MIN_INLINE_CAPACITY])
    }

    /// Zeroed storage of exactly `size` bytes, inline when it fits.
    fn with_size(size: usize) -> Result<Self> {
        if size <= MIN_INLINE_CAPACITY {
            return Ok(Self::inline());
        }

        let mut bytes = Vec::new();
        if let Err(e) = bytes.try_reserve_exact(size) {
            log::debug!("string buffer allocation of {size} bytes failed: {e}");
            return Err(Error::AllocationFailure(size));
        }
        bytes.resize(size, 0);
        Ok(Storage::Heap(bytes.into_boxed_slice()))
    }

    #[inline]
    fn capacity(&self) -> usize {
        match self {
            Storage::Inline(_) => MIN_INLINE_CAPACITY,
            Storage::Heap(bytes) => bytes.len(),
        }
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Inline(bytes) => bytes,
            Storage::Heap(bytes) => bytes,
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Inline(bytes) => bytes,
            Storage::Heap(bytes) => bytes,
        }
    }
}

/// A NUL-terminated, growable byte string that stores short content inline.
///
/// ```rust
/// use strkit::{SboString, printf};
///
/// let mut s = SboString::new();
/// s.set("hello")?;
/// s.append(" world")?;
/// assert_eq!(s, "hello world");
/// assert!(s.is_inline());
///
/// printf!(s, "{}-{:04}", "id", 42)?;
/// assert_eq!(s.as_c_str(), c"id-0042");
/// # Ok::<(), strkit::Error>(())
/// ```
#[derive(Clone)]
pub struct SboString {
    len: usize,
    storage: Storage,
}

impl SboString {
    /// Creates an empty string using inline storage. Never allocates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            len: 0,
            storage: Storage::inline(),
        }
    }

    /// Creates a string holding a copy of `src`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if `src` does not fit inline and the
    /// heap buffer cannot be allocated.
    pub fn from_bytes(src: impl AsRef<[u8]>) -> Result<Self> {
        let mut s = Self::new();
        s.set(src)?;
        Ok(s)
    }

    /// Creates a string of `count` copies of `byte`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `count` is `usize::MAX` (no room for the
    /// terminator), [`Error::AllocationFailure`] if the buffer cannot be
    /// allocated.
    pub fn from_repeated(byte: u8, count: usize) -> Result<Self> {
        if count == usize::MAX {
            return Err(Error::OutOfRange);
        }

        let mut s = Self::new();
        s.ensure(count + 1)?;
        s.storage.bytes_mut()[..count].fill(byte);
        s.set_len(count);
        Ok(s)
    }

    /// Fallible counterpart of [`Clone::clone`]. The copy gets the smallest
    /// capacity that holds the content rather than the source's capacity.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_bytes(self.as_bytes())
    }

    /// Number of content bytes, excluding the terminator.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the content is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Usable storage size in bytes, terminator included.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Whether the content currently lives in the inline buffer.
    #[inline]
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline(_))
    }

    /// The content, without the terminator.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.len]
    }

    /// The content followed by its NUL terminator.
    #[inline]
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage.bytes()[..=self.len]
    }

    /// The content as a byte string.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// The content as a C string. If the content holds an interior NUL the
    /// C view ends there.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// Ensures the capacity is at least `min_size`.
    ///
    /// Growth doubles the current capacity until `min_size` fits. With the
    /// `shrink` feature, a `min_size` below a quarter of the capacity
    /// reallocates to the smallest power-of-two fraction of the capacity
    /// that still holds `min_size` (never below [`MIN_INLINE_CAPACITY`]).
    /// Shrinking keeps at most `capacity - 1` bytes of content.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the new buffer cannot be allocated;
    /// the string is left unchanged.
    pub fn reserve(&mut self, min_size: usize) -> Result<()> {
        let current = self.capacity();
        if min_size > current {
            return self.realloc_exact(growth::grow_capacity(current, min_size));
        }

        #[cfg(feature = "shrink")]
        if let Some(size) = growth::shrink_capacity(current, min_size) {
            return self.realloc_exact(size);
        }

        Ok(())
    }

    /// Shrinks the capacity to exactly `len + 1`, or to
    /// [`MIN_INLINE_CAPACITY`] if that is larger. Content that fits inline
    /// moves back into the inline buffer.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the smaller buffer cannot be
    /// allocated; the string is left unchanged.
    pub fn resize_to_fit(&mut self) -> Result<()> {
        self.realloc_exact(self.len + 1)
    }

    /// Empties the string. The capacity is kept.
    pub fn clear(&mut self) {
        self.set_len(0);
    }

    /// Replaces the content with `src`. Grows if needed, never shrinks.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`]; the string is left unchanged.
    pub fn set(&mut self, src: impl AsRef<[u8]>) -> Result<()> {
        let src = src.as_ref();
        self.ensure(src.len() + 1)?;
        self.storage.bytes_mut()[..src.len()].copy_from_slice(src);
        self.set_len(src.len());
        Ok(())
    }

    /// Appends `src` to the content.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the combined length and terminator would not
    /// fit in a `usize`, [`Error::AllocationFailure`] if the buffer cannot
    /// grow. In both cases the string is left unchanged.
    pub fn append(&mut self, src: impl AsRef<[u8]>) -> Result<()> {
        let src = src.as_ref();
        let len = growth::joined_len(self.len, src.len())?;
        self.ensure(len + 1)?;
        self.storage.bytes_mut()[self.len..len].copy_from_slice(src);
        self.set_len(len);
        Ok(())
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Same as [`SboString::append`].
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.append([byte])
    }

    /// Returns a new string holding this content followed by `src`. Neither
    /// operand changes.
    ///
    /// # Errors
    ///
    /// Same as [`SboString::append`].
    pub fn concat(&self, src: impl AsRef<[u8]>) -> Result<SboString> {
        let src = src.as_ref();
        let len = growth::joined_len(self.len, src.len())?;

        let mut joined = SboString::new();
        joined.ensure(len + 1)?;
        let bytes = joined.storage.bytes_mut();
        bytes[..self.len].copy_from_slice(self.as_bytes());
        bytes[self.len..len].copy_from_slice(src);
        joined.set_len(len);
        Ok(joined)
    }

    /// Replaces the content with formatted output, growing as needed, and
    /// returns the number of bytes written. See also [`printf!`](crate::printf).
    ///
    /// The output is first formatted into the current capacity. If it does
    /// not fit, the buffer grows to hold it and the arguments are formatted a
    /// second time.
    ///
    /// # Errors
    ///
    /// - [`Error::AllocationFailure`] if the buffer cannot grow.
    /// - [`Error::Format`] if a formatting trait implementation fails.
    /// - [`Error::OutOfRange`] if the output length overflows `usize`.
    /// - [`Error::InternalInconsistency`] if the two formatting passes produce
    ///   different sizes.
    ///
    /// The first pass overwrites the old content, so on any error the string
    /// is left empty.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        let written = self.write_formatted(0, args);
        if written.is_err() {
            self.clear();
        }
        written
    }

    /// Appends formatted output, growing as needed, and returns the number of
    /// bytes appended. See also [`streamf!`](crate::streamf).
    ///
    /// # Errors
    ///
    /// Same as [`SboString::printf`], except that on error the string keeps
    /// its previous content.
    pub fn streamf(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        let start = self.len;
        let written = self.write_formatted(start, args);
        if written.is_err() {
            self.set_len(start);
        }
        written
    }

    /// Checks the structural invariants, panicking on violation.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity >= MIN_INLINE_CAPACITY, "capacity {capacity} below inline size");
        assert!(self.len < capacity, "len {} leaves no room for the terminator", self.len);
        assert_eq!(self.storage.bytes()[self.len], 0, "content is not terminated");
        assert_eq!(self.is_inline(), capacity == MIN_INLINE_CAPACITY);
    }

    /// Formats `args` at byte offset `offset`, which must be at most `len`.
    fn write_formatted(&mut self, offset: usize, args: fmt::Arguments<'_>) -> Result<usize> {
        let room = self.capacity() - offset - 1;
        let first = format::format_into(&mut self.storage.bytes_mut()[offset..offset + room], args)?;
        if first.overflowed {
            return Err(Error::OutOfRange);
        }
        let len = growth::joined_len(offset, first.required)?;

        if first.required > room {
            // The first pass left a truncated tail behind; cut it off before
            // growing so only the `offset` bytes in front are carried over.
            self.set_len(offset);
            self.ensure(len + 1)?;

            let room = self.capacity() - offset - 1;
            let second =
                format::format_into(&mut self.storage.bytes_mut()[offset..offset + room], args)?;
            if second.overflowed || second.required != first.required {
                log::error!(
                    "formatted size changed between passes: was {}, is {}",
                    first.required,
                    second.required
                );
                return Err(Error::InternalInconsistency(
                    "formatted size changed between passes",
                ));
            }
        }

        self.set_len(len);
        Ok(first.required)
    }

    /// Grows (never shrinks) so the capacity is at least `min_size`.
    fn ensure(&mut self, min_size: usize) -> Result<()> {
        let current = self.capacity();
        if min_size > current {
            self.realloc_exact(growth::grow_capacity(current, min_size))?;
        }
        Ok(())
    }

    /// Moves to storage of exactly `size` bytes (at least the inline size),
    /// carrying over as much content as fits.
    fn realloc_exact(&mut self, size: usize) -> Result<()> {
        let size = size.max(MIN_INLINE_CAPACITY);
        if size == self.capacity() {
            return Ok(());
        }

        let mut storage = Storage::with_size(size)?;
        let keep = self.len.min(size - 1);
        storage.bytes_mut()[..keep].copy_from_slice(&self.storage.bytes()[..keep]);
        self.storage = storage;
        self.set_len(keep);
        Ok(())
    }

    #[inline]
    fn set_len(&mut self, len: usize) {
        self.storage.bytes_mut()[len] = 0;
        self.len = len;
    }
}

impl Default for SboString {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SboString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for SboString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Write for SboString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map_err(|_| fmt::Error)
    }
}

impl AsRef<[u8]> for SboString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<BStr> for SboString {
    fn as_ref(&self) -> &BStr {
        self.as_bstr()
    }
}

impl Borrow<[u8]> for SboString {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&str> for SboString {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self> {
        Self::from_bytes(src)
    }
}

impl TryFrom<&[u8]> for SboString {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self> {
        Self::from_bytes(src)
    }
}

impl PartialEq for SboString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SboString {}

impl PartialEq<[u8]> for SboString {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for SboString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for SboString {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for SboString {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for SboString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SboString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for SboString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}
