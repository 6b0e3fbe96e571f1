pub mod agent;
pub mod bidding;
pub mod budget;
pub mod compensatory;
pub mod error;
pub mod event;
pub mod market;
pub mod negotiation;
pub mod offer;
pub mod phase;
pub mod tender;
pub mod trickle;

pub use agent::*;
pub use bidding::*;
pub use budget::*;
pub use compensatory::*;
pub use error::*;
pub use event::*;
pub use market::*;
pub use negotiation::*;
pub use offer::*;
pub use phase::*;
pub use tender::*;
pub use trickle::*;
