pub mod classify;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use classify::{classify, Category};
pub use pipeline::{CancelFlag, ModSorter, SortOptions};
pub use progress::{NullObserver, SortObserver};
pub use report::SortReport;
