use anyhow::Result;
use qcw_types::serde::{Deser, QWord, Record, RecordHeader, Ser, WriteLen};
use std::io::{BufRead, Write};

#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct SectionNumber {
    pub count: QWord,
}

impl SectionNumber {
    pub fn new(count: usize) -> Result<Self> {
        Ok(Self {
            count: QWord(u16::try_from(count)?),
        })
    }
}

impl Record for SectionNumber {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.count.size()
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let (r_len, count) = QWord::deser(r)?;
        Ok((r_len, Self { count }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        self.count.ser(w)
    }
}
