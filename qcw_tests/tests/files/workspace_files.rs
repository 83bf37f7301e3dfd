use super::expect_format_error;
use super::fixtures::{self, Bytes};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use itertools::Itertools;
use qcw_blobs::barchart::{Line, LineTrailer, Study};
use qcw_blobs::files::WorkspaceFile;
use qcw_blobs::workspace::Section;
use qcw_types::defines::{
    ChartType, ChartVersion, LineType, PeriodKind, SectionKind, StudyType, TimePeriod,
};
use qcw_types::error::FormatError;
use qcw_types::qtime::QTimeCodec;
use qcw_types::serde::QDword;
use std::fs;

#[test]
fn decode_workspace() -> Result<()> {
    let buf = fixtures::workspace_file();
    let (r_len, file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    assert_eq!(r_len, buf.len());
    assert_eq!(file.size(), buf.len());

    let ws = &file.workspace;
    assert_eq!(
        ws.section_kinds(),
        vec![SectionKind::BarChart, SectionKind::QuoteSheet, SectionKind::BarChart]
    );
    match &ws.sections()[1] {
        Section::Opaque(os) => assert_eq!(os.records.len(), 3),
        Section::BarChart(_) => panic!("section 1 is a quote sheet"),
    }

    let charts = ws.charts().collect_vec();
    assert_eq!(charts.len(), 2);
    assert_eq!(
        charts.iter().map(|chart| chart.version).collect_vec(),
        vec![ChartVersion::Base, ChartVersion::Qc61]
    );

    let chart = charts[0];
    assert_eq!(chart.chart_type, ChartType::Candle);
    assert_eq!(chart.title_symbol()?, Some("IBM"));
    assert_eq!(
        chart.title_period()?,
        Some(TimePeriod::new(PeriodKind::Minutely(15)))
    );
    assert_eq!(chart.file_name(), Some("C:\\charts\\ibm.qcl"));
    assert_eq!(chart.panes.len(), 2);
    assert_eq!(
        chart.studies().map(|header| header.first_study_type()).collect_vec(),
        vec![Some(StudyType::MovingAverage), Some(StudyType::Volume)]
    );
    match &chart.panes[1].header.studies[0] {
        Study::Volume(vs) => assert!(vs.substudies.is_some()),
        Study::Opaque(_) => panic!("pane 1 shows volume"),
    }

    let price = &chart.panes[0].lines;
    let ibm = price.symbol("IBM").unwrap();
    assert_eq!(
        ibm.lines.iter().map(Line::line_type).collect_vec(),
        vec![LineType::BasicLine, LineType::Note]
    );
    let Line::Drawn(note) = &ibm.lines[1] else {
        panic!("notes are drawn");
    };
    assert_eq!(note.note.as_ref().and_then(|n| n.text()), Some("earnings"));
    assert_eq!(note.line.trailer, LineTrailer::Dword(QDword(3)));
    assert!(price.symbol("MSFT").unwrap().lines.is_empty());
    Ok(())
}

#[test]
fn workspace_round_trip_is_exact() -> Result<()> {
    let buf = fixtures::workspace_file();
    let (_, file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    let mut out = vec![];
    let w_len = file.ser(&mut out)?;
    assert_eq!(*w_len, out.len());
    assert_eq!(out, buf);
    Ok(())
}

#[test]
fn line_times() -> Result<()> {
    let buf = fixtures::workspace_file();
    let (_, file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    let chart = file.workspace.charts().next().unwrap();
    let Line::Drawn(trendline) = &chart.panes[0].lines.symbols()[0].lines[0] else {
        panic!("trendlines are drawn");
    };

    let codec = QTimeCodec::new(Utc)?;
    let start = trendline.line.start(&codec)?;
    let end = trendline.line.end(&codec)?;
    assert_eq!((end - start).num_seconds(), 1800);
    assert_eq!(trendline.line.start_value(), 101.25);

    let epoch = Utc.with_ymd_and_hms(1801, 1, 1, 0, 0, 0).unwrap();
    assert_eq!((start - epoch).num_seconds(), 2_000_000);
    Ok(())
}

#[test]
fn unknown_section_layouts() -> Result<()> {
    // A kind without a known layout takes the rest of the container when last.
    let sections = [
        fixtures::bar_chart_section(false),
        fixtures::opaque_section(6, 4),
    ];
    let buf = fixtures::workspace_file_with(2, &sections);
    let (_, file) = WorkspaceFile::deser(&mut buf.as_slice())?;
    match &file.workspace.sections()[1] {
        Section::Opaque(os) => {
            assert_eq!(os.kind, SectionKind::Browser);
            assert_eq!(os.records.len(), 4);
        }
        Section::BarChart(_) => panic!("section 1 is a browser"),
    }
    let mut out = vec![];
    file.ser(&mut out)?;
    assert_eq!(out, buf);

    // Anywhere else it cannot be delimited.
    let sections = [
        fixtures::opaque_section(6, 4),
        fixtures::bar_chart_section(false),
    ];
    let buf = fixtures::workspace_file_with(2, &sections);
    let fe = expect_format_error(WorkspaceFile::deser(&mut buf.as_slice()));
    assert_eq!(
        fe,
        FormatError::UnknownSectionLayout {
            kind: SectionKind::Browser,
            index: 0,
        }
    );
    Ok(())
}

#[test]
fn malformed_workspaces() {
    let good = fixtures::workspace_file();

    let mut bad_magic = good.clone();
    bad_magic[0] = 0x02;
    let fe = expect_format_error(WorkspaceFile::deser(&mut bad_magic.as_slice()));
    assert_eq!(
        fe,
        FormatError::BadMagic {
            expected: 0x0001,
            found: 0x0002,
        }
    );

    for cut in [1, 10, good.len() - 1] {
        let fe = expect_format_error(WorkspaceFile::deser(&mut &good[..cut]));
        assert!(matches!(fe, FormatError::ShortRead { .. }), "cut at {cut}: {fe:?}");
    }

    let sections = [fixtures::bar_chart_section(false)];
    let buf = fixtures::workspace_file_with(3, &sections);
    let fe = expect_format_error(WorkspaceFile::deser(&mut buf.as_slice()));
    assert_eq!(
        fe,
        FormatError::CountMismatch {
            what: "section header",
            declared: 3,
            actual: 1,
        }
    );

    // An unknown line code deep in a chart.
    let corrupt = Bytes::new().dword(0x80C5).build();
    let pos = good
        .windows(corrupt.len())
        .position(|w| w == corrupt.as_slice())
        .unwrap();
    let mut bad_line = good.clone();
    bad_line[pos + 1] = 0x99;
    let res = WorkspaceFile::deser(&mut bad_line.as_slice());
    let err = res.as_ref().map(|_| ()).unwrap_err();
    assert!(format!("{err:#}").contains("\"IBM\""), "{err:#}");
    assert!(matches!(
        expect_format_error(res),
        FormatError::UnknownCode { code: 0x8099, .. }
    ));
}

#[test]
fn files_on_disk() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("qcw_tests_{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("round_trip.qcw");

    let buf = fixtures::workspace_file();
    fs::write(&path, &buf)?;
    let file = WorkspaceFile::read_from_path(&path)?;

    let copy = dir.join("copy.qcw");
    file.write_to_path(&copy)?;
    assert_eq!(fs::read(&copy)?, buf);

    let missing = WorkspaceFile::read_from_path(dir.join("missing.qcw")).unwrap_err();
    assert!(format!("{missing:#}").contains("missing.qcw"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}
