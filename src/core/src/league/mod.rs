pub mod calendar;
pub mod player;
pub mod position;
pub mod team;

pub use calendar::*;
pub use player::*;
pub use position::*;
pub use team::*;
