use crate::error::FormatError;
use crate::io_utils;
use anyhow::Result;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::io::Read;

pub type HeaderTypeInt = u8;

#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum HeaderType {
    Byte = 0x00,
    Word = 0x01,
    Dword = 0x02,
    Qword = 0x04,
    ByteBuffer8 = 0x08,
    ByteBuffer16 = 0x10,
    Record = 0xB8,
}

impl From<HeaderType> for HeaderTypeInt {
    fn from(ht: HeaderType) -> HeaderTypeInt {
        ht as HeaderTypeInt
    }
}

impl TryFrom<HeaderTypeInt> for HeaderType {
    type Error = anyhow::Error;
    fn try_from(int: HeaderTypeInt) -> Result<Self> {
        HeaderType::from_u8(int).ok_or_else(|| {
            FormatError::UnknownCode {
                what: "header type",
                code: int as u32,
            }
            .into()
        })
    }
}

impl HeaderType {
    /// Reads one tag byte and fails unless it is `self`.
    pub fn expect_from(self, r: &mut impl Read, what: &'static str) -> Result<usize> {
        let found = io_utils::read_u8(r, what)?;
        if found != HeaderTypeInt::from(self) {
            return Err(FormatError::HeaderMismatch {
                what,
                expected: self.into(),
                found,
            }
            .into());
        }
        Ok(1)
    }
}
