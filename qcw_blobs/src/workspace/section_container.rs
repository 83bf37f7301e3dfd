use crate::workspace::{Section, SectionExtent};
use crate::ParseContext;
use anyhow::{Context, Result};
use qcw_types::defines::SectionKind;
use qcw_types::serde::{short_type_name, RecordHeader, WriteLen};
use std::io::{BufRead, Write};

/// The record holding every section, in the order of the section header.
///
/// Not a [`qcw_types::serde::Record`] implementor: decoding needs the kinds
/// listed in the section header.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct SectionContainer {
    pub sections: Vec<Section>,
}

impl SectionContainer {
    pub fn size(&self, ctx: ParseContext) -> usize {
        RecordHeader::SIZE + self.payload_size(ctx)
    }

    fn payload_size(&self, ctx: ParseContext) -> usize {
        self.sections.iter().map(|sec| sec.size(ctx)).sum()
    }

    pub fn deser<R: BufRead>(
        r: &mut R,
        kinds: &[SectionKind],
        ctx: ParseContext,
    ) -> Result<(usize, Self)> {
        let what = short_type_name::<Self>();
        let (header_r_len, header) = RecordHeader::deser(r, what)?;

        let mut r_len = 0;
        let mut sections = vec![];
        for (sec_i, &kind) in kinds.iter().enumerate() {
            let extent = if sec_i + 1 == kinds.len() {
                SectionExtent::Remaining(header.payload_len().saturating_sub(r_len))
            } else {
                SectionExtent::Interior { index: sec_i }
            };
            let (delta_r_len, section) = Section::deser(r, kind, extent, ctx)
                .with_context(|| format!("section {sec_i} ({kind})"))?;
            r_len += delta_r_len;
            sections.push(section);
        }

        let moi = Self { sections };
        header.verify(what, r_len)?;
        header.verify(what, moi.payload_size(ctx))?;
        Ok((header_r_len + r_len, moi))
    }

    pub fn ser<W: Write>(&self, w: &mut W, ctx: ParseContext) -> Result<WriteLen> {
        let header = RecordHeader::from_payload_len(self.payload_size(ctx))?;
        let mut w_len = 0;
        w_len += *header.ser(w)?;
        for section in &self.sections {
            w_len += *section.ser(w, ctx)?;
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
