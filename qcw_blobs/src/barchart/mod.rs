//! The bar chart subsystem: a chart, its panes, and the studies, symbols and
//! lines inside each pane.

mod basic_line;
mod chart;
mod line;
mod line_group;
mod study;
mod study_layout;
mod wrapper;

pub use basic_line::*;
pub use chart::*;
pub use line::*;
pub use line_group::*;
pub use study::*;
pub use study_layout::*;
pub use wrapper::*;
