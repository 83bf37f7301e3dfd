/// Where a bar chart is stored. Decides whether the chart record carries
/// its title, file name and workspace-only trailing fields.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ParseContext {
    /// Embedded in a section of a workspace file.
    Workspace,
    /// A standalone layout file.
    Standalone,
}

impl ParseContext {
    pub fn is_workspace(self) -> bool {
        self == Self::Workspace
    }
}
