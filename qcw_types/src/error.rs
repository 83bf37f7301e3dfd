use crate::defines::SectionKind;
use thiserror::Error;

/// Classified decode and encode failures.
///
/// These travel inside [`anyhow::Error`]. Use [`format_error`] to recover one.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormatError {
    #[error("{what}: expected header type 0x{expected:02x}, found 0x{found:02x}")]
    HeaderMismatch {
        what: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("{what}: declared payload of {declared} bytes, decoded {computed}")]
    SizeMismatch {
        what: &'static str,
        declared: usize,
        computed: usize,
    },

    #[error("unknown {what} code 0x{code:x}")]
    UnknownCode { what: &'static str, code: u32 },

    #[error("unknown time period {0:?}")]
    UnknownTimePeriod(String),

    #[error("short read: {what} needs {expected} bytes")]
    ShortRead { what: &'static str, expected: usize },

    #[error("symbol {0:?} already exists in this line group")]
    DuplicateSymbol(String),

    #[error("file magic 0x{found:04x} does not match 0x{expected:04x}")]
    BadMagic { expected: u16, found: u16 },

    #[error("{what}: count {declared} does not match {actual} entries")]
    CountMismatch {
        what: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("expected a zero terminator after {what}, found {found}")]
    BadTerminator { what: &'static str, found: u32 },

    #[error("string length field {declared} disagrees with its {actual}-byte body")]
    StringLength { declared: usize, actual: usize },

    #[error("string body does not end in NUL")]
    UnterminatedString,

    #[error("{what} of {len} bytes does not fit its length field")]
    TooLong { what: &'static str, len: usize },

    #[error("{0:?} has characters outside the single-byte range")]
    Unencodable(String),

    #[error("section {kind} at index {index} has no known layout and is not the last section")]
    UnknownSectionLayout { kind: SectionKind, index: usize },

    #[error("section {index} is a {actual} section but is described as {described}")]
    SectionKindMismatch {
        index: usize,
        described: SectionKind,
        actual: SectionKind,
    },

    #[error("malformed chart title {0:?}")]
    MalformedTitle(String),

    #[error("time out of range: {0}")]
    TimeOutOfRange(String),
}

/// The first [`FormatError`] in the chain of `err`, if any.
pub fn format_error(err: &anyhow::Error) -> Option<&FormatError> {
    err.downcast_ref::<FormatError>()
        .or_else(|| err.chain().find_map(|e| e.downcast_ref::<FormatError>()))
}
