use crate::barchart::BarChartWrapper;
use crate::ParseContext;
use anyhow::Result;
use qcw_types::defines::SectionKind;
use qcw_types::error::FormatError;
use qcw_types::serde::{OpaqueRecord, Record, WriteLen};
use std::io::{BufRead, Write};

#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct BarChartSection {
    pub preamble: OpaqueRecord,
    pub wrapper: BarChartWrapper,
}

/// A section kept as a run of raw records.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct OpaqueSection {
    pub kind: SectionKind,
    pub records: Vec<OpaqueRecord>,
}

/// How many records make up a section of `kind`, where known.
fn opaque_record_count(kind: SectionKind) -> Option<usize> {
    match kind {
        SectionKind::QuoteSheet => Some(3),
        SectionKind::OptionsMontage => Some(6),
        _ => None,
    }
}

/// Where a section ends, when its own layout does not say.
#[derive(Clone, Copy, Debug)]
pub enum SectionExtent {
    /// The last section of its container; it owns this many remaining bytes.
    Remaining(usize),
    /// Followed by other sections.
    Interior { index: usize },
}

/// One workspace section. Sections have no framing of their own.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Section {
    BarChart(BarChartSection),
    Opaque(OpaqueSection),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::BarChart(_) => SectionKind::BarChart,
            Self::Opaque(os) => os.kind,
        }
    }

    pub fn size(&self, ctx: ParseContext) -> usize {
        match self {
            Self::BarChart(bcs) => bcs.preamble.size(()) + bcs.wrapper.size(ctx),
            Self::Opaque(os) => os.records.iter().map(|rec| rec.size(())).sum(),
        }
    }

    pub fn deser<R: BufRead>(
        r: &mut R,
        kind: SectionKind,
        extent: SectionExtent,
        ctx: ParseContext,
    ) -> Result<(usize, Self)> {
        tracing::debug!(%kind, ?extent, "decoding section");
        let mut r_len = 0;

        if kind == SectionKind::BarChart {
            let preamble = OpaqueRecord::deser_tally(r, (), &mut r_len)?;
            let wrapper = BarChartWrapper::deser_tally(r, ctx, &mut r_len)?;
            return Ok((r_len, Self::BarChart(BarChartSection { preamble, wrapper })));
        }

        let mut records = vec![];
        match (opaque_record_count(kind), extent) {
            (Some(count), _) => {
                for _ in 0..count {
                    records.push(OpaqueRecord::deser_tally(r, (), &mut r_len)?);
                }
            }
            (None, SectionExtent::Remaining(remaining)) => {
                while r_len < remaining {
                    records.push(OpaqueRecord::deser_tally(r, (), &mut r_len)?);
                }
            }
            (None, SectionExtent::Interior { index }) => {
                return Err(FormatError::UnknownSectionLayout {
                    kind,
                    index,
                }
                .into())
            }
        }
        Ok((r_len, Self::Opaque(OpaqueSection { kind, records })))
    }

    pub fn ser<W: Write>(&self, w: &mut W, ctx: ParseContext) -> Result<WriteLen> {
        let mut w_len = 0;
        match self {
            Self::BarChart(bcs) => {
                w_len += *bcs.preamble.ser(w, ())?;
                w_len += *bcs.wrapper.ser(w, ctx)?;
            }
            Self::Opaque(os) => {
                for rec in &os.records {
                    w_len += *rec.ser(w, ())?;
                }
            }
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
