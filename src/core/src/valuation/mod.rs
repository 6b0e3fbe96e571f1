pub mod age;
pub mod calculator;
pub mod demand;
pub mod tier;

pub use age::*;
pub use calculator::*;
pub use demand::*;
pub use tier::*;
