use thiserror::Error;

/// Result alias used by every fallible operation in this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The closed set of failures reported by the string buffer and the
/// parsers.
///
/// Every operation reports failure to its immediate caller through this
/// type. Composed operations (for example `append` growing the buffer)
/// propagate the first failure unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// A required input or output argument was absent.
    #[error("required argument is missing")]
    NullArgument,
    /// The text does not fully parse as the requested token: it is empty,
    /// starts with whitespace, has an unconsumed suffix, or holds an escape
    /// that decodes to nothing.
    #[error("malformed input")]
    MalformedInput,
    /// The value parsed but does not fit the target type, or a size
    /// computation would overflow `usize`.
    #[error("value out of range")]
    OutOfRange,
    /// The radix is neither `0` nor in `2..=36`.
    #[error("invalid radix {0}")]
    InvalidRadix(u32),
    /// The allocator could not provide a buffer of the given size in bytes.
    #[error("failed to allocate {0} bytes")]
    AllocationFailure(usize),
    /// A condition that should never happen, such as the two passes of a
    /// formatted write disagreeing on the output size.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(&'static str),
    /// A `Display` or `Debug` implementation failed during a formatted
    /// write.
    #[error("formatter error")]
    Format,
}

impl Error {
    /// Returns `true` for errors caused by the caller's input rather than by
    /// resource exhaustion or an internal fault.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::NullArgument | Error::MalformedInput | Error::OutOfRange | Error::InvalidRadix(_)
        )
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}
