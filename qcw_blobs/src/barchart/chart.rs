use crate::barchart::{StudyHeader, StudyLayout, StudyLineGroup};
use crate::ParseContext;
use anyhow::{Context, Result};
use qcw_types::defines::{ChartType, ChartVersion, StudyType, TimePeriod};
use qcw_types::error::FormatError;
use qcw_types::serde::{
    Deser, LengthMode, OpaqueRecord, QByteBuffer, QDword, QString, QWord, Record, RecordHeader,
    Ser, WriteLen,
};
use std::io::{BufRead, Read, Write};

/// One chart sub-window.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct Pane {
    pub layout: StudyLayout,
    pub header: StudyHeader,
    pub lines: StudyLineGroup,
}

/// A chart and all of its panes.
///
/// ```text
/// struct BarChart {
///     version:            QWord,
///     title:              QString (goofy),    // workspace only
///     font:               QByteBuffer,
///     unknown:            [QDword; 3],
///     chart_type:         QWord,
///     style:              [QDword; 8],
///     pane_count:         QDword,
///     unknown12:          QDword,
///     panes:              [{
///         layout:             StudyLayout,
///         header:             StudyHeader,
///         terminator:         QDword(0),      // all but the first pane
///         lines:              StudyLineGroup,
///         terminator:         QDword(0),      // all but the last pane
///     }; pane_count],
///     unknown13:          Record,
///     daily_snapshot:     Record,
///     data_window:        Record,
///     unknown14:          Record,
///     file_name:          QString,            // workspace only
///     workspace_trailing: [QDword; 3],        // workspace only
///     trailing:           [QDword; 2],
/// }
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct BarChart {
    pub version: ChartVersion,
    title: QString,
    pub font: QByteBuffer,
    pub unknown: [QDword; 3],
    pub chart_type: ChartType,
    /// Believed to hold colors.
    pub style: [QDword; 8],
    pub unknown12: QDword,
    /// Pane 0 shows price.
    pub panes: Vec<Pane>,
    pub unknown13: OpaqueRecord,
    pub daily_snapshot: OpaqueRecord,
    pub data_window: OpaqueRecord,
    pub unknown14: OpaqueRecord,
    file_name: QString,
    pub workspace_trailing: [QDword; 3],
    pub trailing: [QDword; 2],
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            version: ChartVersion::Base,
            title: QString::goofy(None),
            font: QByteBuffer::default(),
            unknown: [QDword::default(); 3],
            chart_type: ChartType::Bar,
            style: [QDword::default(); 8],
            unknown12: QDword::default(),
            panes: vec![Pane::default()],
            unknown13: OpaqueRecord::default(),
            daily_snapshot: OpaqueRecord::default(),
            data_window: OpaqueRecord::default(),
            unknown14: OpaqueRecord::default(),
            file_name: QString::normal(None),
            workspace_trailing: [QDword::default(); 3],
            trailing: [QDword::default(); 2],
        }
    }
}

fn deser_dwords<R: Read, const N: usize>(r: &mut R, r_len: &mut usize) -> Result<[QDword; N]> {
    let mut dwords = [QDword::default(); N];
    for dw in dwords.iter_mut() {
        *dw = QDword::deser_tally(r, r_len)?;
    }
    Ok(dwords)
}

fn ser_dwords<W: Write>(dwords: &[QDword], w: &mut W) -> Result<usize> {
    let mut w_len = 0;
    for dw in dwords {
        w_len += *dw.ser(w)?;
    }
    Ok(w_len)
}

impl BarChart {
    pub fn is_qc61(&self) -> bool {
        self.version == ChartVersion::Qc61
    }

    pub fn study_layouts(&self) -> impl Iterator<Item = &StudyLayout> {
        self.panes.iter().map(|pane| &pane.layout)
    }
    pub fn studies(&self) -> impl Iterator<Item = &StudyHeader> {
        self.panes.iter().map(|pane| &pane.header)
    }
    pub fn study_lines(&self) -> impl Iterator<Item = &StudyLineGroup> {
        self.panes.iter().map(|pane| &pane.lines)
    }

    /// The price pane if `include_price`, or else the first pane whose first
    /// study is `study_type`.
    pub fn pane_index_for_study(
        &self,
        study_type: StudyType,
        include_price: bool,
    ) -> Option<usize> {
        self.panes.iter().enumerate().position(|(pane_i, pane)| {
            (pane_i == 0 && include_price) || pane.header.first_study_type() == Some(study_type)
        })
    }

    pub fn line_group_for_study(
        &self,
        study_type: StudyType,
        include_price: bool,
    ) -> Option<&StudyLineGroup> {
        let pane_i = self.pane_index_for_study(study_type, include_price)?;
        Some(&self.panes[pane_i].lines)
    }
    pub fn line_group_for_study_mut(
        &mut self,
        study_type: StudyType,
        include_price: bool,
    ) -> Option<&mut StudyLineGroup> {
        let pane_i = self.pane_index_for_study(study_type, include_price)?;
        Some(&mut self.panes[pane_i].lines)
    }

    /// The raw "SYMBOL,PERIOD" title. Only present in workspace charts.
    pub fn title(&self) -> Option<&str> {
        self.title.value()
    }

    pub fn set_title(&mut self, symbol: &str, period: TimePeriod) {
        self.title.set_value(Some(format!("{symbol},{period}")));
    }

    pub fn set_raw_title(&mut self, title: Option<String>) {
        self.title.set_value(title);
    }

    fn title_pieces(&self) -> Result<Option<(&str, &str)>> {
        match self.title() {
            None => Ok(None),
            Some(title) => title
                .split_once(',')
                .filter(|(_, period)| !period.contains(','))
                .map(Some)
                .ok_or_else(|| FormatError::MalformedTitle(title.to_string()).into()),
        }
    }

    pub fn title_symbol(&self) -> Result<Option<&str>> {
        Ok(self.title_pieces()?.map(|(symbol, _)| symbol))
    }

    pub fn title_period(&self) -> Result<Option<TimePeriod>> {
        match self.title_pieces()? {
            None => Ok(None),
            Some((_, period)) => Ok(Some(period.parse::<TimePeriod>()?)),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.value()
    }
    pub fn set_file_name(&mut self, file_name: Option<String>) {
        self.file_name.set_value(file_name);
    }
}

impl Record for BarChart {
    type Ctx = ParseContext;

    fn payload_size(&self, ctx: ParseContext) -> usize {
        let mut size = QWord::SIZE;
        if ctx.is_workspace() {
            size += self.title.size();
        }
        size += self.font.size();
        size += QDword::SIZE * self.unknown.len();
        size += QWord::SIZE;
        size += QDword::SIZE * self.style.len();
        size += QDword::SIZE + self.unknown12.size();

        let pane_count = self.panes.len();
        for pane in &self.panes {
            size += pane.layout.size(()) + pane.header.size(()) + pane.lines.size(());
        }
        size += QDword::SIZE * 2 * pane_count.saturating_sub(1);

        size += self.unknown13.size(());
        size += self.daily_snapshot.size(());
        size += self.data_window.size(());
        size += self.unknown14.size(());

        if ctx.is_workspace() {
            size += self.file_name.size();
            size += QDword::SIZE * self.workspace_trailing.len();
        }
        size += QDword::SIZE * self.trailing.len();
        size
    }

    fn deser_payload<R: BufRead>(
        r: &mut R,
        _: &RecordHeader,
        ctx: ParseContext,
    ) -> Result<(usize, Self)> {
        let mut r_len = 0;

        let version = ChartVersion::try_from(*QWord::deser_tally(r, &mut r_len)?)?;
        let title = if ctx.is_workspace() {
            let (delta_r_len, title) = QString::deser_with(r, LengthMode::Goofy)?;
            r_len += delta_r_len;
            title
        } else {
            QString::goofy(None)
        };
        let font = QByteBuffer::deser_tally(r, &mut r_len)?;
        let unknown = deser_dwords(r, &mut r_len)?;
        let chart_type = ChartType::try_from(*QWord::deser_tally(r, &mut r_len)?)?;
        let style = deser_dwords(r, &mut r_len)?;
        let pane_count = *QDword::deser_tally(r, &mut r_len)? as usize;
        let unknown12 = QDword::deser_tally(r, &mut r_len)?;
        tracing::debug!(?version, ?chart_type, pane_count, "decoding bar chart");

        let mut panes = vec![];
        for pane_i in 0..pane_count {
            let pane = Self::deser_pane(r, &mut r_len, pane_i, pane_count)
                .with_context(|| format!("pane {pane_i} of {pane_count}"))?;
            panes.push(pane);
        }

        let unknown13 = OpaqueRecord::deser_tally(r, (), &mut r_len)?;
        let daily_snapshot = OpaqueRecord::deser_tally(r, (), &mut r_len)?;
        let data_window = OpaqueRecord::deser_tally(r, (), &mut r_len)?;
        let unknown14 = OpaqueRecord::deser_tally(r, (), &mut r_len)?;

        let mut file_name = QString::normal(None);
        let mut workspace_trailing = [QDword::default(); 3];
        if ctx.is_workspace() {
            let (delta_r_len, qs) = QString::deser_with(r, LengthMode::Normal)?;
            r_len += delta_r_len;
            file_name = qs;
            workspace_trailing = deser_dwords(r, &mut r_len)?;
        }
        let trailing = deser_dwords(r, &mut r_len)?;

        let moi = Self {
            version,
            title,
            font,
            unknown,
            chart_type,
            style,
            unknown12,
            panes,
            unknown13,
            daily_snapshot,
            data_window,
            unknown14,
            file_name,
            workspace_trailing,
            trailing,
        };
        Ok((r_len, moi))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, ctx: ParseContext) -> Result<WriteLen> {
        let mut w_len = 0;

        w_len += *QWord(self.version.into()).ser(w)?;
        if ctx.is_workspace() {
            w_len += *self.title.ser(w)?;
        }
        w_len += *self.font.ser(w)?;
        w_len += ser_dwords(&self.unknown, w)?;
        w_len += *QWord(self.chart_type.into()).ser(w)?;
        w_len += ser_dwords(&self.style, w)?;
        w_len += *QDword(u32::try_from(self.panes.len())?).ser(w)?;
        w_len += *self.unknown12.ser(w)?;

        let pane_count = self.panes.len();
        for (pane_i, pane) in self.panes.iter().enumerate() {
            w_len += *pane.layout.ser(w, ())?;
            w_len += *pane.header.ser(w, ())?;
            if pane_i != 0 {
                w_len += *QDword(0).ser(w)?;
            }
            w_len += *pane.lines.ser(w, ())?;
            if pane_i + 1 != pane_count {
                w_len += *QDword(0).ser(w)?;
            }
        }

        w_len += *self.unknown13.ser(w, ())?;
        w_len += *self.daily_snapshot.ser(w, ())?;
        w_len += *self.data_window.ser(w, ())?;
        w_len += *self.unknown14.ser(w, ())?;

        if ctx.is_workspace() {
            w_len += *self.file_name.ser(w)?;
            w_len += ser_dwords(&self.workspace_trailing, w)?;
        }
        w_len += ser_dwords(&self.trailing, w)?;

        Ok(WriteLen::new_manual(w_len))
    }
}

impl BarChart {
    fn deser_pane<R: BufRead>(
        r: &mut R,
        r_len: &mut usize,
        pane_i: usize,
        pane_count: usize,
    ) -> Result<Pane> {
        let layout = StudyLayout::deser_tally(r, (), r_len)?;
        let header = StudyHeader::deser_tally(r, (), r_len)?;
        if pane_i != 0 {
            *r_len += QDword::deser_terminator(r, "study header")?;
        }
        let lines = StudyLineGroup::deser_tally(r, (), r_len)?;
        if pane_i + 1 != pane_count {
            *r_len += QDword::deser_terminator(r, "pane")?;
        }
        Ok(Pane {
            layout,
            header,
            lines,
        })
    }
}
