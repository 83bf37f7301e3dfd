use anyhow::Result;
use qcw_types::serde::{Deser, QDword, Record, RecordHeader, Ser, WriteLen};
use std::io::{BufRead, Write};

/// Screen share of one pane.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct StudyLayout {
    pub unknown: QDword,
    pub vertical_pct: QDword,
}

impl Record for StudyLayout {
    type Ctx = ();

    fn payload_size(&self, _: ()) -> usize {
        self.unknown.size() + self.vertical_pct.size()
    }

    fn deser_payload<R: BufRead>(r: &mut R, _: &RecordHeader, _: ()) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let (delta_r_len, unknown) = QDword::deser(r)?;
        r_len += delta_r_len;

        let (delta_r_len, vertical_pct) = QDword::deser(r)?;
        r_len += delta_r_len;

        Ok((
            r_len,
            Self {
                unknown,
                vertical_pct,
            },
        ))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, _: ()) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *self.unknown.ser(w)?;
        w_len += *self.vertical_pct.ser(w)?;
        Ok(WriteLen::new_manual(w_len))
    }
}
