use super::fixtures;
use anyhow::Result;
use qcw_blobs::files::WorkspaceFile;
use qcw_blobs::verify::{verify_workspace_bytes, SectionTally};
use qcw_blobs::workspace::Section;
use qcw_blobs::ParseContext;
use qcw_types::defines::SectionKind;

#[test]
fn exact_file_verifies() -> Result<()> {
    let buf = fixtures::workspace_file();
    let report = verify_workspace_bytes(&buf)?;
    assert!(report.matches);
    assert_eq!(report.first_mismatch, None);
    assert_eq!(report.original_len, buf.len());
    assert_eq!(report.rewritten_len, buf.len());
    assert_eq!(report.line_count, 6);

    let (_, file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    let chart_bytes = file
        .workspace
        .sections()
        .iter()
        .filter(|sec| matches!(sec, Section::BarChart(_)))
        .map(|sec| sec.size(ParseContext::Workspace))
        .sum::<usize>();
    assert_eq!(
        report.sections.get(&SectionKind::BarChart),
        Some(&SectionTally {
            count: 2,
            bytes: chart_bytes,
        })
    );
    assert_eq!(report.sections[&SectionKind::QuoteSheet].count, 1);
    assert_eq!(report.sections.len(), 2);
    Ok(())
}

#[test]
fn trailing_bytes_are_reported() -> Result<()> {
    // Bytes after the workspace are not part of it and are not written back.
    let mut buf = fixtures::workspace_file();
    buf.extend_from_slice(&[0xEE; 3]);
    let report = verify_workspace_bytes(&buf)?;
    assert!(!report.matches);
    assert_eq!(report.first_mismatch, Some(buf.len() - 3));
    assert_eq!(report.rewritten_len, buf.len() - 3);
    Ok(())
}
