#[macro_use]
extern crate log;
extern crate nalgebra as na;

pub mod preprocess;
pub mod analysis;
pub mod elements;
pub mod kernel;
pub mod far_field;
pub mod influence_matrix;
pub mod solve;
pub mod postprocess;
pub mod tools;

pub use analysis::Analysis as Analysis;
pub use elements::RectangularSourcePanel;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by the panel method core
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The augmented system does not have n rows and n + 1 columns
    /// (this includes a system with no panels at all)
    #[error("invalid system shape: {rows} rows and {columns} columns (expected n rows and n + 1 columns, n > 0)")]
    InvalidShape { rows: usize, columns: usize },
}
