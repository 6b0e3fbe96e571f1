use chrono::NaiveDate;
use economy::cap::CapSummary;
use economy::contract::ContractSummary;
use economy::free_agency::{FreeAgencyPhase, FreeAgentStatus, FreeAgentType};
use economy::league::Position;
use economy::offseason::{Offseason, OffseasonReport};
use economy::shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub roster_size: usize,
    pub cap: CapSummary,
    pub contracts: Vec<ContractSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgentSnapshot {
    pub player_id: u32,
    pub name: String,
    pub position: Position,
    pub age: u8,
    pub rating: u8,
    pub free_agent_type: FreeAgentType,
    pub status: FreeAgentStatus,
    pub previous_team_id: Option<u32>,
    pub signed_team_id: Option<u32>,
    pub market_aav: Money,
}

/// Plain view of the league at one point of the offseason, handed to whatever stores game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub year: i32,
    pub date: NaiveDate,
    pub phase: FreeAgencyPhase,
    pub teams: Vec<TeamSnapshot>,
    pub free_agents: Vec<FreeAgentSnapshot>,
}

impl LeagueSnapshot {
    pub fn capture(offseason: &Offseason) -> Self {
        let year = offseason.market.current_year;

        let teams = offseason
            .teams
            .values()
            .map(|entry| TeamSnapshot {
                id: entry.team.id,
                name: entry.team.name.clone(),
                abbreviation: entry.team.abbreviation.clone(),
                roster_size: entry.team.roster.len(),
                cap: CapSummary::new(&entry.cap),
                contracts: entry
                    .cap
                    .active_contracts()
                    .map(|contract| ContractSummary::new(contract, entry.cap.current_year))
                    .collect(),
            })
            .collect();

        let free_agents = offseason
            .market
            .free_agents
            .values()
            .map(|agent| FreeAgentSnapshot {
                player_id: agent.player_id(),
                name: agent.player.name.clone(),
                position: agent.position(),
                age: agent.player.age,
                rating: agent.player.rating,
                free_agent_type: agent.free_agent_type,
                status: agent.status,
                previous_team_id: agent.previous_team_id,
                signed_team_id: agent.signed_team_id,
                market_aav: agent.market_aav(),
            })
            .collect();

        LeagueSnapshot {
            year,
            date: offseason.calendar.date_for_day(offseason.market.day),
            phase: offseason.market.phase,
            teams,
            free_agents,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

pub fn report_to_json(report: &OffseasonReport) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(report)
}
