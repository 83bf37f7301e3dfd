use crate::barchart::{
    BarChart, BarChartWrapper, BasicLine, Line, LineHeader, OpaqueLine, OpaqueStudy, Pane, Study,
    StudyHeader, StudyLayout, StudyLineGroup, SymbolEntry, VolumeStudy,
};
use anyhow::Result;

#[allow(unused_variables)]
pub trait BarChartVisitorMut {
    fn visit_wrapper(&mut self, wrapper: &mut BarChartWrapper) -> Result<()> {
        walk_wrapper_mut(self, wrapper)
    }
    fn visit_chart(&mut self, chart: &mut BarChart) -> Result<()> {
        walk_chart_mut(self, chart)
    }
    fn visit_pane(&mut self, pane_i: usize, pane: &mut Pane) -> Result<()> {
        walk_pane_mut(self, pane)
    }
    fn visit_study_layout(&mut self, layout: &mut StudyLayout) -> Result<()> {
        Ok(())
    }
    fn visit_study_header(&mut self, header: &mut StudyHeader) -> Result<()> {
        walk_study_header_mut(self, header)
    }
    fn visit_study(&mut self, study: &mut Study) -> Result<()> {
        walk_study_mut(self, study)
    }
    fn visit_volume_study(&mut self, study: &mut VolumeStudy) -> Result<()> {
        Ok(())
    }
    fn visit_opaque_study(&mut self, study: &mut OpaqueStudy) -> Result<()> {
        Ok(())
    }
    fn visit_line_group(&mut self, group: &mut StudyLineGroup) -> Result<()> {
        walk_line_group_mut(self, group)
    }
    fn visit_symbol_entry(&mut self, sym: &mut SymbolEntry) -> Result<()> {
        walk_symbol_entry_mut(self, sym)
    }
    fn visit_line(&mut self, line: &mut Line) -> Result<()> {
        walk_line_mut(self, line)
    }
    fn visit_line_header(&mut self, header: &mut LineHeader) -> Result<()> {
        walk_line_header_mut(self, header)
    }
    fn visit_basic_line(&mut self, line: &mut BasicLine) -> Result<()> {
        Ok(())
    }
    fn visit_opaque_line(&mut self, line: &mut OpaqueLine) -> Result<()> {
        Ok(())
    }
}

pub fn walk_wrapper_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    wrapper: &mut BarChartWrapper,
) -> Result<()> {
    v.visit_chart(&mut wrapper.chart)
}

pub fn walk_chart_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    chart: &mut BarChart,
) -> Result<()> {
    for (pane_i, pane) in chart.panes.iter_mut().enumerate() {
        v.visit_pane(pane_i, pane)?;
    }
    Ok(())
}

pub fn walk_pane_mut<V: BarChartVisitorMut + ?Sized>(v: &mut V, pane: &mut Pane) -> Result<()> {
    v.visit_study_layout(&mut pane.layout)?;
    v.visit_study_header(&mut pane.header)?;
    v.visit_line_group(&mut pane.lines)
}

pub fn walk_study_header_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    header: &mut StudyHeader,
) -> Result<()> {
    for study in &mut header.studies {
        v.visit_study(study)?;
    }
    Ok(())
}

pub fn walk_study_mut<V: BarChartVisitorMut + ?Sized>(v: &mut V, study: &mut Study) -> Result<()> {
    match study {
        Study::Volume(vs) => v.visit_volume_study(vs),
        Study::Opaque(os) => v.visit_opaque_study(os),
    }
}

pub fn walk_line_group_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    group: &mut StudyLineGroup,
) -> Result<()> {
    for sym in group.symbols_mut() {
        v.visit_symbol_entry(sym)?;
    }
    Ok(())
}

pub fn walk_symbol_entry_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    sym: &mut SymbolEntry,
) -> Result<()> {
    for line in &mut sym.lines {
        v.visit_line(line)?;
    }
    Ok(())
}

pub fn walk_line_mut<V: BarChartVisitorMut + ?Sized>(v: &mut V, line: &mut Line) -> Result<()> {
    match line {
        Line::Drawn(lh) => v.visit_line_header(lh),
        Line::Opaque(ol) => v.visit_opaque_line(ol),
    }
}

pub fn walk_line_header_mut<V: BarChartVisitorMut + ?Sized>(
    v: &mut V,
    header: &mut LineHeader,
) -> Result<()> {
    v.visit_basic_line(&mut header.line)
}
