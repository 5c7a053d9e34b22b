pub mod dataset;
pub mod significance;
pub mod result;

pub use dataset::*;
pub use significance::*;
pub use result::*;
