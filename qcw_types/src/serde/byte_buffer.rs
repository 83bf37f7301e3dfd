use crate::error::FormatError;
use crate::io_utils;
use crate::serde::{Deser, HeaderType, HeaderTypeInt, Ser, WriteLen};
use anyhow::Result;
use derive_more::{Deref, From, Into};
use std::io::{Read, Write};

/// Length-prefixed raw bytes.
#[derive(From, Into, Deref, PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct QByteBuffer(Vec<u8>);

impl QByteBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// The header type a body of `body_len` bytes is written with.
    pub fn header_type_for(body_len: usize) -> HeaderType {
        if 0 < body_len && body_len <= u8::MAX as usize {
            HeaderType::ByteBuffer8
        } else {
            HeaderType::ByteBuffer16
        }
    }

    /// Encoded size of a buffer holding `body_len` bytes.
    pub fn size_for(body_len: usize) -> usize {
        let len_width = match Self::header_type_for(body_len) {
            HeaderType::ByteBuffer8 => 1,
            _ => 2,
        };
        1 + len_width + body_len
    }

    /// Decodes the remainder of a buffer whose header type was already consumed.
    pub fn deser_after_header<R: Read>(
        r: &mut R,
        header_type: HeaderType,
    ) -> Result<(usize, Self)> {
        let mut r_len = 0;

        /* body_len */
        let body_len = match header_type {
            HeaderType::ByteBuffer8 => {
                r_len += 1;
                io_utils::read_u8(r, "QByteBuffer length")? as usize
            }
            HeaderType::ByteBuffer16 => {
                let mut buf = [0u8; 2];
                io_utils::read_exact(r, &mut buf, "QByteBuffer length")?;
                r_len += buf.len();
                u16::from_le_bytes(buf) as usize
            }
            _ => {
                return Err(FormatError::HeaderMismatch {
                    what: "QByteBuffer",
                    expected: HeaderType::ByteBuffer16.into(),
                    found: header_type.into(),
                }
                .into())
            }
        };

        let canonical = Self::header_type_for(body_len);
        if canonical != header_type {
            return Err(FormatError::HeaderMismatch {
                what: "QByteBuffer length width",
                expected: canonical.into(),
                found: header_type.into(),
            }
            .into());
        }

        /* body */
        let body = io_utils::read_vec(r, body_len, "QByteBuffer body")?;
        r_len += body.len();

        Ok((r_len, Self(body)))
    }
}

impl Ser for QByteBuffer {
    fn size(&self) -> usize {
        Self::size_for(self.0.len())
    }

    fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        let body_len = self.0.len();
        let body_len_int = u16::try_from(body_len).map_err(|_| FormatError::TooLong {
            what: "QByteBuffer",
            len: body_len,
        })?;
        let header_type = Self::header_type_for(body_len);

        let mut w_len = 0;
        w.write_all(&[HeaderTypeInt::from(header_type)])?;
        w_len += 1;
        match header_type {
            HeaderType::ByteBuffer8 => {
                w.write_all(&[body_len_int as u8])?;
                w_len += 1;
            }
            _ => {
                w.write_all(&body_len_int.to_le_bytes())?;
                w_len += 2;
            }
        }
        w.write_all(&self.0)?;
        w_len += body_len;
        Ok(WriteLen::new_manual(w_len))
    }
}

impl Deser for QByteBuffer {
    fn deser<R: Read>(r: &mut R) -> Result<(usize, Self)> {
        let header_type = HeaderType::try_from(io_utils::read_u8(r, "QByteBuffer")?)?;
        let (r_len, moi) = Self::deser_after_header(r, header_type)?;
        Ok((1 + r_len, moi))
    }
}
