use anyhow::Result;
use qcw_types::defines::SectionKind;
use qcw_types::serde::{Deser, QByteBuffer, QWord, Record, RecordHeader, Ser, WriteLen};
use std::io::{BufRead, Write};

/// Describes one section: its kind, and metadata nobody has decoded yet.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct SectionHeaderInfo {
    pub kind: SectionKind,
    pub metadata: QByteBuffer,
}

impl Record for SectionHeaderInfo {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        QWord::SIZE + self.metadata.size()
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;
        let kind = SectionKind::try_from(*QWord::deser_tally(r, &mut r_len)?)?;
        let metadata = QByteBuffer::deser_tally(r, &mut r_len)?;
        Ok((r_len, Self { kind, metadata }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *QWord(self.kind.into()).ser(w)?;
        w_len += *self.metadata.ser(w)?;
        Ok(WriteLen::new_manual(w_len))
    }
}

/// One [`SectionHeaderInfo`] per section, in section order.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct SectionHeader {
    pub infos: Vec<SectionHeaderInfo>,
}

impl SectionHeader {
    pub fn kinds(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.infos.iter().map(|info| info.kind)
    }
}

impl Record for SectionHeader {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.infos.iter().map(|info| info.size(())).sum()
    }

    /// The infos carry no count of their own; they fill the declared payload.
    fn deser_payload<R: BufRead>(r: &mut R, header: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;
        let mut infos = vec![];
        while r_len < header.payload_len() {
            infos.push(SectionHeaderInfo::deser_tally(r, (), &mut r_len)?);
        }
        Ok((r_len, Self { infos }))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        for info in &self.infos {
            w_len += *info.ser(w, ())?;
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
