pub mod budget;
pub mod evaluation;
pub mod needs;
pub mod roster;
pub mod strategy;

pub use budget::*;
pub use evaluation::*;
pub use needs::*;
pub use roster::*;
pub use strategy::*;
