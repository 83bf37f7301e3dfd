use crate::barchart::{
    BarChart, BarChartWrapper, BasicLine, Line, LineHeader, Note, OpaqueLine, OpaqueStudy, Pane,
    Study, StudyHeader, StudyLayout, StudyLineGroup, SymbolEntry, VolumeStudy,
};
use crate::workspace::{BarChartSection, OpaqueSection, Section, SectionHeaderInfo, Workspace};
use qcw_types::defines::{BasicLineType, LineType, PeriodKind, SectionKind, StudyType, TimePeriod};
use qcw_types::serde::{OpaqueRecord, QByteBuffer, QDword};

pub fn trendline(start_value: f64, end_value: f64) -> Line {
    let mut line = BasicLine::new(BasicLineType::Normal);
    line.set_start_value(start_value);
    line.set_end_value(end_value);
    Line::Drawn(LineHeader {
        note: None,
        unknown1: QDword(0),
        unknown2: QDword(0),
        line,
    })
}

pub fn note(text: &str) -> Line {
    Line::Drawn(LineHeader {
        note: Some(Note::new(QByteBuffer::new(vec![0x41; 4]), Some(text.to_string()))),
        unknown1: QDword(1),
        unknown2: QDword(2),
        line: BasicLine::new(BasicLineType::Note),
    })
}

pub fn fib_line() -> Line {
    Line::Opaque(OpaqueLine {
        line_type: LineType::FibExtension,
        blob: OpaqueRecord::new(vec![0x02, 7, 0, 0, 0]),
    })
}

pub fn line_group(symbols: Vec<SymbolEntry>) -> StudyLineGroup {
    let mut group = StudyLineGroup::default();
    for sym in symbols {
        group.add_symbol_entry(sym).unwrap();
    }
    group
}

/// A pane named by `study_type`. Without one, the pane carries a volume study.
pub fn pane(study_type: Option<StudyType>, symbols: Vec<SymbolEntry>) -> Pane {
    let study = match study_type {
        None | Some(StudyType::Volume) => Study::Volume(VolumeStudy::default()),
        Some(study_type) => Study::Opaque(OpaqueStudy {
            study_type,
            blob: OpaqueRecord::new(vec![0x00, 14]),
        }),
    };
    Pane {
        layout: StudyLayout {
            unknown: QDword(0),
            vertical_pct: QDword(100),
        },
        header: StudyHeader {
            studies: vec![study],
        },
        lines: line_group(symbols),
    }
}

/// A daily chart of `symbol` with a price pane and an RSI pane.
pub fn chart(symbol: &str, price: Vec<SymbolEntry>, rsi: Vec<SymbolEntry>) -> BarChart {
    let mut chart = BarChart::default();
    chart.panes = vec![
        pane(Some(StudyType::MovingAverage), price),
        pane(Some(StudyType::Rsi), rsi),
    ];
    chart.set_title(symbol, TimePeriod::new(PeriodKind::Daily));
    chart.set_file_name(Some(format!("{symbol}.qcl")));
    chart
}

pub fn chart_section(chart: BarChart) -> (SectionHeaderInfo, Section) {
    let info = SectionHeaderInfo {
        kind: SectionKind::BarChart,
        metadata: QByteBuffer::new(vec![1, 2, 3]),
    };
    let section = Section::BarChart(BarChartSection {
        preamble: OpaqueRecord::new(vec![0x01, 0x10, 0x00]),
        wrapper: BarChartWrapper::new(chart),
    });
    (info, section)
}

pub fn quote_sheet_section() -> (SectionHeaderInfo, Section) {
    let info = SectionHeaderInfo {
        kind: SectionKind::QuoteSheet,
        metadata: QByteBuffer::default(),
    };
    let records = (0..3).map(|i| OpaqueRecord::new(vec![0x00, i])).collect();
    let section = Section::Opaque(OpaqueSection {
        kind: SectionKind::QuoteSheet,
        records,
    });
    (info, section)
}

/// Two charts with a quote sheet between them.
pub fn workspace(first: BarChart, second: BarChart) -> Workspace {
    Workspace::from_sections(vec![
        chart_section(first),
        quote_sheet_section(),
        chart_section(second),
    ])
    .unwrap()
}
