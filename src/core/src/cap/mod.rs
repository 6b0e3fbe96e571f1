pub mod penalty;
pub mod projection;
pub mod state;

pub use penalty::*;
pub use projection::*;
pub use state::*;
