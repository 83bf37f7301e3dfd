use crate::error::FormatError;
use anyhow::Result;
use std::io::{BufRead, ErrorKind, Read};

/// Like [`Read::read_exact`], but an early EOF becomes [`FormatError::ShortRead`].
pub fn read_exact(r: &mut impl Read, buf: &mut [u8], what: &'static str) -> Result<()> {
    match r.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FormatError::ShortRead {
            what,
            expected: buf.len(),
        }
        .into()),
        Err(e) => Err(e.into()),
    }
}

/// Reads `len` bytes. The buffer grows with what the reader yields, so a
/// corrupt length cannot commit a large allocation up front.
pub fn read_vec(r: &mut impl Read, len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = vec![];
    r.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(FormatError::ShortRead {
            what,
            expected: len,
        }
        .into());
    }
    Ok(buf)
}

pub fn read_u8(r: &mut impl Read, what: &'static str) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(r, &mut buf, what)?;
    Ok(buf[0])
}

/// The next byte, without consuming it. `None` at EOF.
pub fn peek_u8(r: &mut impl BufRead) -> Result<Option<u8>> {
    let buf = r.fill_buf()?;
    Ok(buf.first().copied())
}
