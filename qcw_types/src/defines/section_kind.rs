use super::code_conversions;
use num_derive::FromPrimitive;
use std::fmt;

/// Kind of a workspace section, as listed in the section header.
#[repr(u16)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum SectionKind {
    BarChart = 1,
    TimeAndSales = 2,
    TabularBar = 3,
    QuoteSheet = 4,
    Browser = 6,
    LevelII = 7,
    HotList = 8,
    SingleQuote = 9,
    IslandBook = 10,
    OptionsMontage = 12,
    RagingBull = 13,
}

code_conversions!(SectionKind, u16, from_u16, "section");

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
