use crate::league::{Player, Position};
use crate::shared::Money;
use crate::valuation::MarketValuation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeAgentType {
    Unrestricted,
    Restricted,
    ExclusiveRights,
}

impl fmt::Display for FreeAgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeAgentType::Unrestricted => write!(f, "UFA"),
            FreeAgentType::Restricted => write!(f, "RFA"),
            FreeAgentType::ExclusiveRights => write!(f, "ERFA"),
        }
    }
}

/// Free agent class by accrued seasons. Undrafted players who never accrued a season are
/// free to sign anywhere.
pub fn classify_free_agent_type(experience: u8, drafted: bool) -> FreeAgentType {
    match experience {
        0 if !drafted => FreeAgentType::Unrestricted,
        0..=2 => FreeAgentType::ExclusiveRights,
        3 => FreeAgentType::Restricted,
        _ => FreeAgentType::Unrestricted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeAgentStatus {
    Available,
    Negotiating,
    Signed,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInterest {
    pub team_id: u32,
    /// 0.0 to 1.0
    pub level: f64,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgent {
    pub id: u32,
    pub player: Player,
    pub free_agent_type: FreeAgentType,
    pub previous_team_id: Option<u32>,
    pub market_value: MarketValuation,
    pub status: FreeAgentStatus,
    pub offers: Vec<u32>,
    pub interest: Vec<TeamInterest>,
    /// Days the player has been unsigned since the market opened.
    pub days_on_market: u32,
    pub signed_team_id: Option<u32>,
}

impl FreeAgent {
    pub fn new(id: u32, player: Player, previous_team_id: Option<u32>, market_value: MarketValuation) -> Self {
        FreeAgent {
            id,
            free_agent_type: classify_free_agent_type(player.experience, player.drafted),
            player,
            previous_team_id,
            market_value,
            status: FreeAgentStatus::Available,
            offers: Vec::new(),
            interest: Vec::new(),
            days_on_market: 0,
            signed_team_id: None,
        }
    }

    pub fn player_id(&self) -> u32 {
        self.player.id
    }

    pub fn position(&self) -> Position {
        self.player.position
    }

    pub fn market_aav(&self) -> Money {
        self.market_value.aav
    }

    /// Still unsigned and able to take offers.
    pub fn is_on_market(&self) -> bool {
        matches!(self.status, FreeAgentStatus::Available | FreeAgentStatus::Negotiating)
    }

    pub fn record_interest(&mut self, team_id: u32, level: f64, day: u32) {
        let level = level.clamp(0.0, 1.0);
        match self.interest.iter_mut().find(|i| i.team_id == team_id) {
            Some(existing) => {
                existing.level = existing.level.max(level);
                existing.day = day;
            }
            None => self.interest.push(TeamInterest { team_id, level, day }),
        }
    }
}
