pub mod ai;
pub mod cap;
pub mod config;
pub mod contract;
pub mod free_agency;
pub mod league;
pub mod offseason;
pub mod shared;
pub mod valuation;

pub use config::{MarketRules, OffseasonConfig, PhaseDurations};
pub use league::{LeagueCalendar, Player, Position, PositionGroup, Team};
pub use offseason::{Offseason, OffseasonReport};
pub use shared::Money;
