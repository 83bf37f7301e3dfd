use super::code_conversions;
use num_derive::FromPrimitive;

/// The magic at the start of a bar chart.
#[repr(u16)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum ChartVersion {
    Base = 0x0190,
    /// Followed by one extra byte after the chart body.
    Qc61 = 0x025B,
}

code_conversions!(ChartVersion, u16, from_u16, "chart version");
