//! Enumerated codes found on the wire, and the chart time period.

/// Implements `TryFrom<$int>` (failing with `UnknownCode`) and `From<Self> for $int`.
macro_rules! code_conversions {
    ($ty:ty, $int:ty, $from_fn:ident, $what:literal) => {
        impl TryFrom<$int> for $ty {
            type Error = anyhow::Error;
            fn try_from(int: $int) -> anyhow::Result<Self> {
                <$ty as num_traits::FromPrimitive>::$from_fn(int).ok_or_else(|| {
                    $crate::error::FormatError::UnknownCode {
                        what: $what,
                        code: int as u32,
                    }
                    .into()
                })
            }
        }

        impl From<$ty> for $int {
            fn from(code: $ty) -> $int {
                code as $int
            }
        }
    };
}
use code_conversions;

mod basic_line_type;
mod chart_type;
mod chart_version;
mod line_type;
mod section_kind;
mod study_type;
mod time_period;

pub use basic_line_type::*;
pub use chart_type::*;
pub use chart_version::*;
pub use line_type::*;
pub use section_kind::*;
pub use study_type::*;
pub use time_period::*;
