use super::expect_format_error;
use super::fixtures::{self, Bytes};
use anyhow::Result;
use qcw_blobs::files::{LayoutFile, WorkspaceFile};
use qcw_blobs::ParseContext;
use qcw_types::error::FormatError;

#[test]
fn layout_round_trip() -> Result<()> {
    let buf = fixtures::layout_file();
    let (r_len, file) = LayoutFile::deser(&mut buf.as_slice())?;
    assert_eq!(r_len, buf.len());
    assert_eq!(file.size(), buf.len());

    let chart = &file.wrapper.chart;
    assert_eq!(chart.title(), None);
    assert_eq!(chart.file_name(), None);
    assert_eq!(chart.panes.len(), 2);

    let mut out = vec![];
    file.ser(&mut out)?;
    assert_eq!(out, buf);
    Ok(())
}

#[test]
fn layout_from_workspace_chart() -> Result<()> {
    let buf = fixtures::workspace_file();
    let (_, ws_file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    let (_, layout) = LayoutFile::deser(&mut fixtures::layout_file().as_slice())?;

    // The same chart, stored standalone, drops only the workspace fields.
    let ws_chart = ws_file.workspace.charts().next().unwrap();
    assert_eq!(ws_chart.panes, layout.wrapper.chart.panes);
    let solo = ParseContext::Standalone;
    let ws = ParseContext::Workspace;
    assert!(layout.size_in(ws) > layout.size_in(solo));

    // A chart written in workspace form reads back only in workspace form.
    let mut out = vec![];
    layout.ser_in(&mut out, ws)?;
    assert_eq!(out.len(), layout.size_in(ws));
    let (_, again) = LayoutFile::deser_in(&mut out.as_slice(), ws)?;
    assert_eq!(again, layout);
    assert!(LayoutFile::deser(&mut out.as_slice()).is_err());
    Ok(())
}

#[test]
fn qc61_layout() -> Result<()> {
    let buf = Bytes::new()
        .raw(&fixtures::MAGIC)
        .raw(&fixtures::wrapper(false, true).0)
        .build();
    let (_, file) = LayoutFile::deser(&mut buf.as_slice())?;
    assert!(file.wrapper.chart.is_qc61());
    assert_eq!(*file.wrapper.qc61_trailer, 1);
    let mut out = vec![];
    file.ser(&mut out)?;
    assert_eq!(out, buf);

    // A 6.1 chart without its trailer is one byte pair short.
    let chart = fixtures::chart(false, 0x025B);
    let buf = Bytes::new()
        .raw(&fixtures::MAGIC)
        .record(chart)
        .build();
    assert!(LayoutFile::deser(&mut buf.as_slice()).is_err());
    Ok(())
}

#[test]
fn layout_magic() {
    let mut buf = fixtures::layout_file();
    buf[1] = 0x01;
    let fe = expect_format_error(LayoutFile::deser(&mut buf.as_slice()));
    assert_eq!(
        fe,
        FormatError::BadMagic {
            expected: 0x0001,
            found: 0x0101,
        }
    );
}
