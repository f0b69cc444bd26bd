//! Reading records from and writing assignments to tab-separated text
//!
//! Input lines look like `id<TAB>index:weight,index:weight,...`; output lines
//! are `id<TAB>cluster`.

pub mod loader;
pub mod writer;

pub use loader::Dataset;
pub use writer::{write_assignments, write_assignments_to};
