pub mod barchart;
mod context;
pub mod edit;
pub mod files;
pub mod verify;
pub mod visit;
pub mod workspace;

pub use context::*;

#[cfg(test)]
mod test_utils;
