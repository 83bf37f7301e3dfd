use super::code_conversions;
use num_derive::FromPrimitive;

#[repr(u16)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum ChartType {
    Bar = 1,
    Line = 2,
    Histogram = 3,
    Candle = 5,
}

code_conversions!(ChartType, u16, from_u16, "chart type");
