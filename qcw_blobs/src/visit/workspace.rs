use super::BarChartVisitor;
use crate::workspace::{
    BarChartSection, OpaqueSection, Section, SectionContainer, SectionHeader, SectionHeaderInfo,
    SectionNumber, Workspace,
};
use anyhow::Result;

#[allow(unused_variables)]
pub trait WorkspaceVisitor: BarChartVisitor {
    fn visit_workspace(&mut self, ws: &Workspace) -> Result<()> {
        walk_workspace(self, ws)
    }
    fn visit_section_number(&mut self, number: &SectionNumber) -> Result<()> {
        Ok(())
    }
    fn visit_section_header(&mut self, header: &SectionHeader) -> Result<()> {
        walk_section_header(self, header)
    }
    fn visit_section_header_info(&mut self, info: &SectionHeaderInfo) -> Result<()> {
        Ok(())
    }
    fn visit_section_container(&mut self, container: &SectionContainer) -> Result<()> {
        walk_section_container(self, container)
    }
    fn visit_section(&mut self, section_i: usize, section: &Section) -> Result<()> {
        walk_section(self, section)
    }
    fn visit_bar_chart_section(&mut self, section: &BarChartSection) -> Result<()> {
        walk_bar_chart_section(self, section)
    }
    fn visit_opaque_section(&mut self, section: &OpaqueSection) -> Result<()> {
        Ok(())
    }
}

pub fn walk_workspace<V: WorkspaceVisitor + ?Sized>(v: &mut V, ws: &Workspace) -> Result<()> {
    v.visit_section_number(&ws.section_number)?;
    v.visit_section_header(&ws.section_header)?;
    v.visit_section_container(&ws.container)
}

pub fn walk_section_header<V: WorkspaceVisitor + ?Sized>(
    v: &mut V,
    header: &SectionHeader,
) -> Result<()> {
    for info in &header.infos {
        v.visit_section_header_info(info)?;
    }
    Ok(())
}

pub fn walk_section_container<V: WorkspaceVisitor + ?Sized>(
    v: &mut V,
    container: &SectionContainer,
) -> Result<()> {
    for (section_i, section) in container.sections.iter().enumerate() {
        v.visit_section(section_i, section)?;
    }
    Ok(())
}

pub fn walk_section<V: WorkspaceVisitor + ?Sized>(v: &mut V, section: &Section) -> Result<()> {
    match section {
        Section::BarChart(bcs) => v.visit_bar_chart_section(bcs),
        Section::Opaque(os) => v.visit_opaque_section(os),
    }
}

pub fn walk_bar_chart_section<V: WorkspaceVisitor + ?Sized>(
    v: &mut V,
    section: &BarChartSection,
) -> Result<()> {
    v.visit_wrapper(&section.wrapper)
}
