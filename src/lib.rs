pub mod core;

pub use core::error::{SorterError, SorterResult};
