use super::code_conversions;
use num_derive::FromPrimitive;

#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum BasicLineType {
    Normal = 0,
    Ray = 1,
    Extended = 2,
    Note = 4,
}

code_conversions!(BasicLineType, u32, from_u32, "basic line type");
