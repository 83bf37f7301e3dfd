use crate::barchart::{
    BarChart, BarChartWrapper, BasicLine, Line, LineHeader, OpaqueLine, OpaqueStudy, Pane, Study,
    StudyHeader, StudyLayout, StudyLineGroup, SymbolEntry, VolumeStudy,
};
use anyhow::Result;

#[allow(unused_variables)]
pub trait BarChartVisitor {
    fn visit_wrapper(&mut self, wrapper: &BarChartWrapper) -> Result<()> {
        walk_wrapper(self, wrapper)
    }
    fn visit_chart(&mut self, chart: &BarChart) -> Result<()> {
        walk_chart(self, chart)
    }
    fn visit_pane(&mut self, pane_i: usize, pane: &Pane) -> Result<()> {
        walk_pane(self, pane)
    }
    fn visit_study_layout(&mut self, layout: &StudyLayout) -> Result<()> {
        Ok(())
    }
    fn visit_study_header(&mut self, header: &StudyHeader) -> Result<()> {
        walk_study_header(self, header)
    }
    fn visit_study(&mut self, study: &Study) -> Result<()> {
        walk_study(self, study)
    }
    fn visit_volume_study(&mut self, study: &VolumeStudy) -> Result<()> {
        Ok(())
    }
    fn visit_opaque_study(&mut self, study: &OpaqueStudy) -> Result<()> {
        Ok(())
    }
    fn visit_line_group(&mut self, group: &StudyLineGroup) -> Result<()> {
        walk_line_group(self, group)
    }
    fn visit_symbol_entry(&mut self, sym: &SymbolEntry) -> Result<()> {
        walk_symbol_entry(self, sym)
    }
    fn visit_line(&mut self, line: &Line) -> Result<()> {
        walk_line(self, line)
    }
    fn visit_line_header(&mut self, header: &LineHeader) -> Result<()> {
        walk_line_header(self, header)
    }
    fn visit_basic_line(&mut self, line: &BasicLine) -> Result<()> {
        Ok(())
    }
    fn visit_opaque_line(&mut self, line: &OpaqueLine) -> Result<()> {
        Ok(())
    }
}

pub fn walk_wrapper<V: BarChartVisitor + ?Sized>(
    v: &mut V,
    wrapper: &BarChartWrapper,
) -> Result<()> {
    v.visit_chart(&wrapper.chart)
}

pub fn walk_chart<V: BarChartVisitor + ?Sized>(v: &mut V, chart: &BarChart) -> Result<()> {
    for (pane_i, pane) in chart.panes.iter().enumerate() {
        v.visit_pane(pane_i, pane)?;
    }
    Ok(())
}

pub fn walk_pane<V: BarChartVisitor + ?Sized>(v: &mut V, pane: &Pane) -> Result<()> {
    v.visit_study_layout(&pane.layout)?;
    v.visit_study_header(&pane.header)?;
    v.visit_line_group(&pane.lines)
}

pub fn walk_study_header<V: BarChartVisitor + ?Sized>(
    v: &mut V,
    header: &StudyHeader,
) -> Result<()> {
    for study in &header.studies {
        v.visit_study(study)?;
    }
    Ok(())
}

pub fn walk_study<V: BarChartVisitor + ?Sized>(v: &mut V, study: &Study) -> Result<()> {
    match study {
        Study::Volume(vs) => v.visit_volume_study(vs),
        Study::Opaque(os) => v.visit_opaque_study(os),
    }
}

pub fn walk_line_group<V: BarChartVisitor + ?Sized>(
    v: &mut V,
    group: &StudyLineGroup,
) -> Result<()> {
    for sym in group.symbols() {
        v.visit_symbol_entry(sym)?;
    }
    Ok(())
}

pub fn walk_symbol_entry<V: BarChartVisitor + ?Sized>(v: &mut V, sym: &SymbolEntry) -> Result<()> {
    for line in &sym.lines {
        v.visit_line(line)?;
    }
    Ok(())
}

pub fn walk_line<V: BarChartVisitor + ?Sized>(v: &mut V, line: &Line) -> Result<()> {
    match line {
        Line::Drawn(lh) => v.visit_line_header(lh),
        Line::Opaque(ol) => v.visit_opaque_line(ol),
    }
}

pub fn walk_line_header<V: BarChartVisitor + ?Sized>(v: &mut V, header: &LineHeader) -> Result<()> {
    v.visit_basic_line(&header.line)
}
