//! Decode-then-encode checking of whole workspace files.

use crate::barchart::Line;
use crate::files::WorkspaceFile;
use crate::visit::{walk_section, BarChartVisitor, WorkspaceVisitor};
use crate::workspace::Section;
use crate::ParseContext;
use anyhow::Result;
use itertools::{EitherOrBoth, Itertools};
use qcw_types::defines::SectionKind;
use std::collections::BTreeMap;

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct SectionTally {
    pub count: usize,
    /// Encoded size of the sections, framing excluded.
    pub bytes: usize,
}

#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct VerifyReport {
    /// Re-encoding reproduced the input exactly.
    pub matches: bool,
    pub first_mismatch: Option<usize>,
    pub original_len: usize,
    pub rewritten_len: usize,
    pub sections: BTreeMap<SectionKind, SectionTally>,
    /// Lines of every symbol of every chart.
    pub line_count: usize,
}

/// Decodes `buf` as a workspace file, re-encodes it, and compares.
///
/// Decoding errors are returned as errors, not reported as a mismatch.
pub fn verify_workspace_bytes(buf: &[u8]) -> Result<VerifyReport> {
    let mut r = buf;
    let (r_len, file) = WorkspaceFile::deser(&mut r)?;
    if r_len != buf.len() {
        tracing::warn!(r_len, len = buf.len(), "workspace ends before the input does");
    }

    let mut rewritten = Vec::with_capacity(file.size());
    file.ser(&mut rewritten)?;

    let first_mismatch = buf
        .iter()
        .zip_longest(rewritten.iter())
        .position(|pair| match pair {
            EitherOrBoth::Both(a, b) => a != b,
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => true,
        });

    let mut tally = Tally::default();
    tally.visit_workspace(&file.workspace)?;

    let report = VerifyReport {
        matches: first_mismatch.is_none(),
        first_mismatch,
        original_len: buf.len(),
        rewritten_len: rewritten.len(),
        sections: tally.sections,
        line_count: tally.line_count,
    };
    tracing::debug!(
        matches = report.matches,
        first_mismatch = ?report.first_mismatch,
        "verified workspace"
    );
    Ok(report)
}

#[derive(Default)]
struct Tally {
    sections: BTreeMap<SectionKind, SectionTally>,
    line_count: usize,
}

impl BarChartVisitor for Tally {
    fn visit_line(&mut self, _: &Line) -> Result<()> {
        self.line_count += 1;
        Ok(())
    }
}

impl WorkspaceVisitor for Tally {
    fn visit_section(&mut self, _: usize, section: &Section) -> Result<()> {
        let entry = self.sections.entry(section.kind()).or_default();
        entry.count += 1;
        entry.bytes += section.size(ParseContext::Workspace);
        walk_section(self, section)
    }
}
