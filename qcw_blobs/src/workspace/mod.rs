//! The workspace graph: a section count, a descriptor per section, and the
//! sections themselves.

mod section;
mod section_container;
mod section_header;
mod section_number;

pub use section::*;
pub use section_container::*;
pub use section_header::*;
pub use section_number::*;

use crate::barchart::BarChart;
use crate::ParseContext;
use anyhow::Result;
use qcw_types::defines::SectionKind;
use qcw_types::error::FormatError;
use qcw_types::serde::{Record, WriteLen};
use std::io::{BufRead, Write};

/// Bar charts inside a workspace always carry their workspace-only fields.
const CTX: ParseContext = ParseContext::Workspace;

#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct Workspace {
    pub section_number: SectionNumber,
    pub section_header: SectionHeader,
    pub container: SectionContainer,
}

impl Workspace {
    /// Builds a consistent workspace from descriptors paired with their sections.
    pub fn from_sections(sections: Vec<(SectionHeaderInfo, Section)>) -> Result<Self> {
        let section_number = SectionNumber::new(sections.len())?;
        let (infos, sections): (Vec<_>, Vec<_>) = sections.into_iter().unzip();
        let moi = Self {
            section_number,
            section_header: SectionHeader { infos },
            container: SectionContainer { sections },
        };
        moi.check_counts()?;
        Ok(moi)
    }

    pub fn sections(&self) -> &[Section] {
        &self.container.sections
    }
    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.container.sections
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.section_header.kinds().collect()
    }

    pub fn charts(&self) -> impl Iterator<Item = &BarChart> {
        self.container.sections.iter().filter_map(|sec| match sec {
            Section::BarChart(bcs) => Some(&bcs.wrapper.chart),
            Section::Opaque(_) => None,
        })
    }
    pub fn charts_mut(&mut self) -> impl Iterator<Item = &mut BarChart> {
        self.container.sections.iter_mut().filter_map(|sec| match sec {
            Section::BarChart(bcs) => Some(&mut bcs.wrapper.chart),
            Section::Opaque(_) => None,
        })
    }

    fn check_counts(&self) -> Result<()> {
        let declared = *self.section_number.count as usize;
        for (what, actual) in [
            ("section header", self.section_header.infos.len()),
            ("section container", self.container.sections.len()),
        ] {
            if actual != declared {
                return Err(FormatError::CountMismatch {
                    what,
                    declared,
                    actual,
                }
                .into());
            }
        }
        for (sec_i, (info, section)) in self
            .section_header
            .infos
            .iter()
            .zip(self.container.sections.iter())
            .enumerate()
        {
            if info.kind != section.kind() {
                return Err(FormatError::SectionKindMismatch {
                    index: sec_i,
                    described: info.kind,
                    actual: section.kind(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.section_number.size(()) + self.section_header.size(()) + self.container.size(CTX)
    }

    pub fn deser<R: BufRead>(r: &mut R) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let section_number = SectionNumber::deser_tally(r, (), &mut r_len)?;
        let section_header = SectionHeader::deser_tally(r, (), &mut r_len)?;
        let declared = *section_number.count as usize;
        if section_header.infos.len() != declared {
            return Err(FormatError::CountMismatch {
                what: "section header",
                declared,
                actual: section_header.infos.len(),
            }
            .into());
        }
        tracing::debug!(sections = declared, "decoding workspace");

        let kinds = section_header.kinds().collect::<Vec<_>>();
        let (delta_r_len, container) = SectionContainer::deser(r, &kinds, CTX)?;
        r_len += delta_r_len;

        let moi = Self {
            section_number,
            section_header,
            container,
        };
        Ok((r_len, moi))
    }

    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen> {
        self.check_counts()?;
        let mut w_len = 0;
        w_len += *self.section_number.ser(w, ())?;
        w_len += *self.section_header.ser(w, ())?;
        w_len += *self.container.ser(w, CTX)?;
        Ok(WriteLen::new_manual(w_len))
    }
}
