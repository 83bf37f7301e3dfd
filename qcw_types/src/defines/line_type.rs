use super::code_conversions;
use num_derive::FromPrimitive;

#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum LineType {
    BasicLine = 0x80C5,
    Note = 0x80F0,

    Retracement = 0x80CD,
    Projection = 0x820F,
    FibExtension = 0x826E,
    FibTimeInterval = 0x8237,
    FibCircles = 0x8226,
    FibTimeCycles = 0x826B,
    TimeCycles = 0x826D,
    Regression = 0x80EC,
    Pitchfork = 0x8217,
    PitchforkModifiedSchiff = 0x821B,
    PitchforkInside = 0x821F,
    Pitchfan = 0x8223,
}

code_conversions!(LineType, u32, from_u32, "line type");

impl LineType {
    /// Whether the payload is decoded field by field rather than kept opaque.
    pub fn is_structured(self) -> bool {
        matches!(self, Self::BasicLine | Self::Note)
    }
}
