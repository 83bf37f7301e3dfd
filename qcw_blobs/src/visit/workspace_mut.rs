use super::BarChartVisitorMut;
use crate::workspace::{
    BarChartSection, OpaqueSection, Section, SectionContainer, SectionHeader, SectionHeaderInfo,
    SectionNumber, Workspace,
};
use anyhow::Result;

#[allow(unused_variables)]
pub trait WorkspaceVisitorMut: BarChartVisitorMut {
    fn visit_workspace(&mut self, ws: &mut Workspace) -> Result<()> {
        walk_workspace_mut(self, ws)
    }
    fn visit_section_number(&mut self, number: &mut SectionNumber) -> Result<()> {
        Ok(())
    }
    fn visit_section_header(&mut self, header: &mut SectionHeader) -> Result<()> {
        walk_section_header_mut(self, header)
    }
    fn visit_section_header_info(&mut self, info: &mut SectionHeaderInfo) -> Result<()> {
        Ok(())
    }
    fn visit_section_container(&mut self, container: &mut SectionContainer) -> Result<()> {
        walk_section_container_mut(self, container)
    }
    fn visit_section(&mut self, section_i: usize, section: &mut Section) -> Result<()> {
        walk_section_mut(self, section)
    }
    fn visit_bar_chart_section(&mut self, section: &mut BarChartSection) -> Result<()> {
        walk_bar_chart_section_mut(self, section)
    }
    fn visit_opaque_section(&mut self, section: &mut OpaqueSection) -> Result<()> {
        Ok(())
    }
}

pub fn walk_workspace_mut<V: WorkspaceVisitorMut + ?Sized>(
    v: &mut V,
    ws: &mut Workspace,
) -> Result<()> {
    v.visit_section_number(&mut ws.section_number)?;
    v.visit_section_header(&mut ws.section_header)?;
    v.visit_section_container(&mut ws.container)
}

pub fn walk_section_header_mut<V: WorkspaceVisitorMut + ?Sized>(
    v: &mut V,
    header: &mut SectionHeader,
) -> Result<()> {
    for info in &mut header.infos {
        v.visit_section_header_info(info)?;
    }
    Ok(())
}

pub fn walk_section_container_mut<V: WorkspaceVisitorMut + ?Sized>(
    v: &mut V,
    container: &mut SectionContainer,
) -> Result<()> {
    for (section_i, section) in container.sections.iter_mut().enumerate() {
        v.visit_section(section_i, section)?;
    }
    Ok(())
}

pub fn walk_section_mut<V: WorkspaceVisitorMut + ?Sized>(
    v: &mut V,
    section: &mut Section,
) -> Result<()> {
    match section {
        Section::BarChart(bcs) => v.visit_bar_chart_section(bcs),
        Section::Opaque(os) => v.visit_opaque_section(os),
    }
}

pub fn walk_bar_chart_section_mut<V: WorkspaceVisitorMut + ?Sized>(
    v: &mut V,
    section: &mut BarChartSection,
) -> Result<()> {
    v.visit_wrapper(&mut section.wrapper)
}
