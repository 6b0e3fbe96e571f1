pub mod cut;
pub mod extension;
pub mod pay_cut;
pub mod restructure;
pub mod tag;

pub use cut::*;
pub use extension::*;
pub use pay_cut::*;
pub use restructure::*;
pub use tag::*;
