use crate::error::FormatError;
use crate::io_utils;
use crate::serde::{Deser, HeaderType, HeaderTypeInt, Ser, WriteLen};
use anyhow::Result;
use derive_more::{Deref, From, Into};
use std::io::{Read, Write};
use std::mem;

macro_rules! scalar {
    ($(#[$meta:meta])* $name:ident, $int:ty, $header_type:expr) => {
        $(#[$meta])*
        #[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
        pub struct $name(pub $int);

        impl $name {
            pub const HEADER_TYPE: HeaderType = $header_type;
            pub const SIZE: usize = 1 + mem::size_of::<$int>();
        }

        impl Ser for $name {
            fn size(&self) -> usize {
                Self::SIZE
            }
            fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
                w.write_all(&[HeaderTypeInt::from(Self::HEADER_TYPE)])?;
                w.write_all(&self.0.to_le_bytes())?;
                Ok(WriteLen::new_manual(Self::SIZE))
            }
        }

        impl Deser for $name {
            fn deser<R: Read>(r: &mut R) -> Result<(usize, Self)> {
                let mut r_len = Self::HEADER_TYPE.expect_from(r, stringify!($name))?;
                let mut buf = [0u8; mem::size_of::<$int>()];
                io_utils::read_exact(r, &mut buf, stringify!($name))?;
                r_len += buf.len();
                Ok((r_len, Self(<$int>::from_le_bytes(buf))))
            }
        }
    };
}

scalar!(
    /// 1-byte scalar.
    QByte,
    u8,
    HeaderType::Byte
);
scalar!(
    /// 2-byte scalar.
    QWord,
    u16,
    HeaderType::Word
);
scalar!(
    /// 4-byte scalar. Also carries enumerated codes and packed timestamps.
    QDword,
    u32,
    HeaderType::Dword
);
scalar!(
    /// 8-byte scalar. Also carries doubles by bit pattern.
    QQword,
    u64,
    HeaderType::Qword
);

impl QQword {
    pub fn from_f64(f: f64) -> Self {
        Self(f.to_bits())
    }
    pub fn as_f64(&self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl QDword {
    /// Reads a dword that must be zero, as placed between variable-length runs.
    pub fn deser_terminator<R: Read>(r: &mut R, what: &'static str) -> Result<usize> {
        let (r_len, term) = Self::deser(r)?;
        if term.0 != 0 {
            return Err(FormatError::BadTerminator {
                what,
                found: term.0,
            }
            .into());
        }
        Ok(r_len)
    }
}
