use crate::io_utils;
use crate::serde::{Record, RecordHeader, WriteLen};
use anyhow::Result;
use derive_more::{Deref, DerefMut, From, Into};
use std::io::{BufRead, Write};

/// A record whose payload is kept as raw bytes and written back unchanged.
#[derive(From, Into, Deref, DerefMut, PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct OpaqueRecord(Vec<u8>);

impl OpaqueRecord {
    pub fn new(payload: Vec<u8>) -> Self {
        Self(payload)
    }
    pub fn payload(&self) -> &[u8] {
        &self.0
    }
}

impl Record for OpaqueRecord {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.0.len()
    }

    fn deser_payload<R: BufRead>(r: &mut R, header: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let payload = io_utils::read_vec(r, header.payload_len(), "OpaqueRecord payload")?;
        Ok((payload.len(), Self(payload)))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        w.write_all(&self.0)?;
        Ok(WriteLen::new_manual(self.0.len()))
    }
}
