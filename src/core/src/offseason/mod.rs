pub mod driver;
pub mod report;

pub use driver::*;
pub use report::*;
