use crate::league::{Player, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

const CONTENDER_RATING: f64 = 76.0;
const REBUILD_RATING: f64 = 66.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamStrategy {
    WinNow,
    Balanced,
    Rebuild,
}

impl TeamStrategy {
    /// Picks a direction from the quality of the current starters.
    pub fn from_roster(roster: &[&Player]) -> Self {
        let mut starter_ratings = Vec::new();
        for position in Position::ALL {
            let mut ratings: Vec<u8> = roster
                .iter()
                .filter(|p| p.position == position)
                .map(|p| p.rating)
                .collect();
            ratings.sort_unstable_by(|a, b| b.cmp(a));
            starter_ratings.extend(ratings.into_iter().take(position.starters()));
        }

        if starter_ratings.is_empty() {
            return TeamStrategy::Rebuild;
        }

        let average = starter_ratings.iter().map(|r| *r as f64).sum::<f64>() / starter_ratings.len() as f64;
        if average >= CONTENDER_RATING {
            TeamStrategy::WinNow
        } else if average <= REBUILD_RATING {
            TeamStrategy::Rebuild
        } else {
            TeamStrategy::Balanced
        }
    }

    /// Share of cap space held back from free agency for in-season moves.
    pub fn reserve_share(&self) -> f64 {
        match self {
            TeamStrategy::WinNow => 0.10,
            TeamStrategy::Balanced => 0.15,
            TeamStrategy::Rebuild => 0.25,
        }
    }
}

impl fmt::Display for TeamStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamStrategy::WinNow => write!(f, "win now"),
            TeamStrategy::Balanced => write!(f, "balanced"),
            TeamStrategy::Rebuild => write!(f, "rebuild"),
        }
    }
}

/// How a front office behaves in the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPersonality {
    pub strategy: TeamStrategy,
    /// 0.0-1.0, how far past its own valuation the team will chase a player.
    pub risk_tolerance: f64,
    /// Multiplier on asking price for opening offers.
    pub value_premium: f64,
    /// Oldest free agent the team will pursue.
    pub max_age: u8,
}

impl TeamPersonality {
    pub fn for_strategy(strategy: TeamStrategy) -> Self {
        match strategy {
            TeamStrategy::WinNow => TeamPersonality {
                strategy,
                risk_tolerance: 0.8,
                value_premium: 1.05,
                max_age: 33,
            },
            TeamStrategy::Balanced => TeamPersonality {
                strategy,
                risk_tolerance: 0.5,
                value_premium: 1.0,
                max_age: 31,
            },
            TeamStrategy::Rebuild => TeamPersonality {
                strategy,
                risk_tolerance: 0.3,
                value_premium: 0.92,
                max_age: 28,
            },
        }
    }

    pub fn with_risk_tolerance(mut self, risk_tolerance: f64) -> Self {
        self.risk_tolerance = risk_tolerance.clamp(0.0, 1.0);
        self
    }

    /// Highest share of its own valuation the team will pay when other teams compete.
    pub fn escalation_ceiling(&self) -> f64 {
        1.0 + 0.3 * self.risk_tolerance
    }
}
