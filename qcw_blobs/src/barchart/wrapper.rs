use crate::barchart::BarChart;
use crate::ParseContext;
use anyhow::Result;
use qcw_types::serde::{Deser, QByte, Record, RecordHeader, Ser, WriteLen};
use std::io::{BufRead, Write};

/// The record around a [`BarChart`], both in workspaces and in layout files.
#[derive(PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct BarChartWrapper {
    pub chart: BarChart,
    /// Written after the chart only by the 6.1 format.
    pub qc61_trailer: QByte,
}

impl BarChartWrapper {
    pub fn new(chart: BarChart) -> Self {
        Self {
            chart,
            qc61_trailer: QByte(0),
        }
    }
}

impl Record for BarChartWrapper {
    type Ctx = ParseContext;

    fn payload_size(&self, ctx: ParseContext) -> usize {
        let trailer_size = if self.chart.is_qc61() {
            self.qc61_trailer.size()
        } else {
            0
        };
        self.chart.size(ctx) + trailer_size
    }

    fn deser_payload<R: BufRead>(
        r: &mut R,
        _: &RecordHeader,
        ctx: ParseContext,
    ) -> Result<(usize, Self)> {
        let mut r_len = 0;
        let chart = BarChart::deser_tally(r, ctx, &mut r_len)?;
        let qc61_trailer = if chart.is_qc61() {
            QByte::deser_tally(r, &mut r_len)?
        } else {
            QByte(0)
        };
        Ok((
            r_len,
            Self {
                chart,
                qc61_trailer,
            },
        ))
    }

    fn ser_payload<W: Write>(&self, w: &mut W, ctx: ParseContext) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *self.chart.ser(w, ctx)?;
        if self.chart.is_qc61() {
            w_len += *self.qc61_trailer.ser(w)?;
        }
        Ok(WriteLen::new_manual(w_len))
    }
}
