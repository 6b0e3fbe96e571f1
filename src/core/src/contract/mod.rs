pub mod contract;
pub mod error;
pub mod generator;
pub mod minimum;
pub mod operations;
pub mod summary;

pub use contract::*;
pub use error::*;
pub use generator::*;
pub use minimum::*;
pub use operations::*;
pub use summary::*;
