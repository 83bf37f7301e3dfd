pub mod defines;
pub mod error;
pub mod io_utils;
pub mod qtime;
pub mod serde;
