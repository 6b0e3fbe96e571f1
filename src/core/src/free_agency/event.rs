use crate::free_agency::{DraftCompensation, FreeAgencyPhase, TenderLevel};
use crate::shared::{CurrencyFormatter, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FreeAgencyEventKind {
    PhaseChanged { from: FreeAgencyPhase, to: FreeAgencyPhase },
    OfferSubmitted { offer_id: u32, team_id: u32, free_agent_id: u32, aav: Money },
    OfferRejected { offer_id: u32 },
    OfferWithdrawn { offer_id: u32 },
    OfferExpired { offer_id: u32 },
    VerbalAgreement { team_id: u32, free_agent_id: u32, priority: u32 },
    AgreementDropped { team_id: u32, free_agent_id: u32 },
    PlayerSigned { team_id: u32, free_agent_id: u32, player_id: u32, contract_id: u32, aav: Money },
    BiddingWarStarted { free_agent_id: u32, teams: usize },
    BiddingWarClosed { free_agent_id: u32, winner: Option<u32>, rounds: u32 },
    TenderPlaced { team_id: u32, free_agent_id: u32, level: TenderLevel, salary: Money },
    TenderAccepted { team_id: u32, free_agent_id: u32 },
    OfferSheetSigned { sheet_id: u32, team_id: u32, free_agent_id: u32 },
    OfferSheetMatched { sheet_id: u32, team_id: u32 },
    OfferSheetDeclined { sheet_id: u32, team_id: u32, compensation: DraftCompensation },
    PlayerRetired { free_agent_id: u32, player_id: u32 },
}

/// Something league-visible that happened on a given offseason day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgencyEvent {
    pub day: u32,
    pub phase: FreeAgencyPhase,
    pub kind: FreeAgencyEventKind,
}

impl FreeAgencyEvent {
    pub fn new(day: u32, phase: FreeAgencyPhase, kind: FreeAgencyEventKind) -> Self {
        FreeAgencyEvent { day, phase, kind }
    }

    pub fn description(&self) -> String {
        match &self.kind {
            FreeAgencyEventKind::PhaseChanged { from, to } => format!("Free agency moved from {} to {}", from, to),
            FreeAgencyEventKind::OfferSubmitted {
                team_id,
                free_agent_id,
                aav,
                ..
            } => format!(
                "Team {} offered free agent {} {} per year",
                team_id,
                free_agent_id,
                CurrencyFormatter::format(*aav)
            ),
            FreeAgencyEventKind::OfferRejected { offer_id } => format!("Offer {} was rejected", offer_id),
            FreeAgencyEventKind::OfferWithdrawn { offer_id } => format!("Offer {} was withdrawn", offer_id),
            FreeAgencyEventKind::OfferExpired { offer_id } => format!("Offer {} expired", offer_id),
            FreeAgencyEventKind::VerbalAgreement {
                team_id,
                free_agent_id,
                priority,
            } => format!(
                "Free agent {} agreed to terms with team {} (#{})",
                free_agent_id, team_id, priority
            ),
            FreeAgencyEventKind::AgreementDropped { team_id, free_agent_id } => format!(
                "Agreement between team {} and free agent {} fell through",
                team_id, free_agent_id
            ),
            FreeAgencyEventKind::PlayerSigned {
                team_id, player_id, aav, ..
            } => format!(
                "Player {} signed with team {} for {} per year",
                player_id,
                team_id,
                CurrencyFormatter::format(*aav)
            ),
            FreeAgencyEventKind::BiddingWarStarted { free_agent_id, teams } => {
                format!("{} teams are bidding for free agent {}", teams, free_agent_id)
            }
            FreeAgencyEventKind::BiddingWarClosed {
                free_agent_id,
                winner,
                rounds,
            } => match winner {
                Some(team_id) => format!(
                    "Team {} won the bidding for free agent {} after {} rounds",
                    team_id, free_agent_id, rounds
                ),
                None => format!("Bidding for free agent {} ended without a winner", free_agent_id),
            },
            FreeAgencyEventKind::TenderPlaced {
                team_id,
                free_agent_id,
                level,
                salary,
            } => format!(
                "Team {} placed a {} tender on free agent {} ({})",
                team_id,
                level,
                free_agent_id,
                CurrencyFormatter::format(*salary)
            ),
            FreeAgencyEventKind::TenderAccepted { team_id, free_agent_id } => {
                format!("Free agent {} signed his tender with team {}", free_agent_id, team_id)
            }
            FreeAgencyEventKind::OfferSheetSigned {
                team_id, free_agent_id, ..
            } => format!("Free agent {} signed an offer sheet with team {}", free_agent_id, team_id),
            FreeAgencyEventKind::OfferSheetMatched { sheet_id, team_id } => {
                format!("Team {} matched offer sheet {}", team_id, sheet_id)
            }
            FreeAgencyEventKind::OfferSheetDeclined {
                sheet_id,
                team_id,
                compensation,
            } => format!(
                "Team {} declined to match offer sheet {} and receives {}",
                team_id, sheet_id, compensation
            ),
            FreeAgencyEventKind::PlayerRetired { player_id, .. } => format!("Player {} retired", player_id),
        }
    }
}
