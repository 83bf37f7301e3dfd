use anyhow::Result;
use derive_more::Deref;
use std::io::{Read, Write};

/// Number of bytes written by one `ser` call.
#[derive(Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(len: usize) -> Self {
        Self(len)
    }
}

pub trait Ser {
    /// Encoded length in bytes. Always equals what [`Ser::ser`] writes.
    fn size(&self) -> usize;

    fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen>;

    fn ser_solo(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.size());
        self.ser(&mut buf)?;
        Ok(buf)
    }
}

pub trait Deser: Sized {
    /// Returns the count of bytes consumed alongside the value.
    fn deser<R: Read>(r: &mut R) -> Result<(usize, Self)>;

    /// Decodes a value and adds its length to `r_len`.
    fn deser_tally<R: Read>(r: &mut R, r_len: &mut usize) -> Result<Self> {
        let (delta_r_len, moi) = Self::deser(r)?;
        *r_len += delta_r_len;
        Ok(moi)
    }

    fn deser_solo(buf: &[u8]) -> Result<Self> {
        let mut r = buf;
        let (_r_len, moi) = Self::deser(&mut r)?;
        Ok(moi)
    }
}

/// An absent value takes no space and writes nothing.
impl<T: Ser> Ser for Option<T> {
    fn size(&self) -> usize {
        self.as_ref().map_or(0, |t| t.size())
    }
    fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        match self {
            None => Ok(WriteLen::new_manual(0)),
            Some(t) => t.ser(w),
        }
    }
}
