use crate::error::FormatError;
use crate::io_utils;
use crate::serde::{HeaderType, HeaderTypeInt, WriteLen};
use anyhow::Result;
use derive_more::Deref;
use std::any;
use std::io::{BufRead, Read, Write};
use std::mem;

/// The `header_type` and `payload_len` in front of every record payload.
#[derive(Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RecordHeader(u32);

impl RecordHeader {
    pub const SIZE: usize = 1 + mem::size_of::<u32>();

    pub fn from_payload_len(len: usize) -> Result<Self> {
        let int = u32::try_from(len).map_err(|_| FormatError::TooLong {
            what: "Record payload",
            len,
        })?;
        Ok(Self(int))
    }

    pub fn payload_len(&self) -> usize {
        self.0 as usize
    }

    pub fn deser(r: &mut impl Read, what: &'static str) -> Result<(usize, Self)> {
        let mut r_len = HeaderType::Record.expect_from(r, what)?;
        let mut buf = [0u8; mem::size_of::<u32>()];
        io_utils::read_exact(r, &mut buf, what)?;
        r_len += buf.len();
        Ok((r_len, Self(u32::from_le_bytes(buf))))
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        w.write_all(&[HeaderTypeInt::from(HeaderType::Record)])?;
        w.write_all(&self.0.to_le_bytes())?;
        Ok(WriteLen::new_manual(Self::SIZE))
    }

    /// Fails unless `computed` matches the declared payload length.
    pub fn verify(&self, what: &'static str, computed: usize) -> Result<()> {
        if computed != self.payload_len() {
            return Err(FormatError::SizeMismatch {
                what,
                declared: self.payload_len(),
                computed,
            }
            .into());
        }
        Ok(())
    }
}

/// A value framed as a record: a [`RecordHeader`] followed by its payload.
///
/// Implementors describe the payload only.
/// The framing and the size integrity check come with the provided methods.
///
/// `Ctx` carries whatever outside knowledge decides the payload layout.
/// Records whose layout is self-contained use `()`.
pub trait Record: Sized {
    type Ctx: Copy;

    fn payload_size(&self, ctx: Self::Ctx) -> usize;

    /// Decodes the payload. `header` is available for layouts whose tail
    /// is only implied by the declared length.
    fn deser_payload<R: BufRead>(
        r: &mut R,
        header: &RecordHeader,
        ctx: Self::Ctx,
    ) -> Result<(usize, Self)>;

    fn ser_payload<W: Write>(&self, w: &mut W, ctx: Self::Ctx) -> Result<WriteLen>;

    fn size(&self, ctx: Self::Ctx) -> usize {
        RecordHeader::SIZE + self.payload_size(ctx)
    }

    fn deser<R: BufRead>(r: &mut R, ctx: Self::Ctx) -> Result<(usize, Self)> {
        let what = short_type_name::<Self>();
        let (mut r_len, header) = RecordHeader::deser(r, what)?;
        tracing::trace!(record = what, declared = header.payload_len(), "decoding");

        let (payload_r_len, moi) = Self::deser_payload(r, &header, ctx)?;
        r_len += payload_r_len;

        header.verify(what, payload_r_len)?;
        header.verify(what, moi.payload_size(ctx))?;

        Ok((r_len, moi))
    }

    /// Decodes a record and adds its length to `r_len`.
    fn deser_tally<R: BufRead>(r: &mut R, ctx: Self::Ctx, r_len: &mut usize) -> Result<Self> {
        let (delta_r_len, moi) = Self::deser(r, ctx)?;
        *r_len += delta_r_len;
        Ok(moi)
    }

    fn ser<W: Write>(&self, w: &mut W, ctx: Self::Ctx) -> Result<WriteLen> {
        let header = RecordHeader::from_payload_len(self.payload_size(ctx))?;
        let mut w_len = 0;
        w_len += *header.ser(w)?;
        w_len += *self.ser_payload(w, ctx)?;
        Ok(WriteLen::new_manual(w_len))
    }

    fn ser_solo(&self, ctx: Self::Ctx) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.size(ctx));
        self.ser(&mut buf, ctx)?;
        Ok(buf)
    }

    fn deser_solo(buf: &[u8], ctx: Self::Ctx) -> Result<Self> {
        let mut r = buf;
        let (_r_len, moi) = Self::deser(&mut r, ctx)?;
        Ok(moi)
    }
}

pub fn short_type_name<T>() -> &'static str {
    let full = any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
