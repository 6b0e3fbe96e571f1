use crate::contract::{ContractOffer, minimum_salary};
use crate::free_agency::{
    FreeAgencyError, FreeAgencyEventKind, FreeAgencyState, FreeAgentStatus, FreeAgentType, SigningSource,
};
use crate::shared::{CurrencyFormatter, Money, round_money};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenderLevel {
    FirstRound,
    SecondRound,
    OriginalRound,
    RightOfFirstRefusal,
    /// Minimum-salary tender that keeps an exclusive rights player off the market.
    ExclusiveRights,
}

/// Draft pick the original team receives when it lets a tendered player go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftCompensation {
    None,
    FirstRound,
    SecondRound,
    Round(u8),
}

impl fmt::Display for DraftCompensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftCompensation::None => write!(f, "no compensation"),
            DraftCompensation::FirstRound => write!(f, "a first round pick"),
            DraftCompensation::SecondRound => write!(f, "a second round pick"),
            DraftCompensation::Round(round) => write!(f, "a round {} pick", round),
        }
    }
}

impl TenderLevel {
    pub fn cap_percentage(&self) -> f64 {
        match self {
            TenderLevel::FirstRound => 0.0245,
            TenderLevel::SecondRound => 0.0178,
            TenderLevel::OriginalRound | TenderLevel::RightOfFirstRefusal => 0.0124,
            TenderLevel::ExclusiveRights => 0.0,
        }
    }

    pub fn is_exclusive(&self) -> bool {
        *self == TenderLevel::ExclusiveRights
    }

    pub fn salary(&self, salary_cap: Money, experience: u8) -> Money {
        let minimum = minimum_salary(experience);
        if self.is_exclusive() {
            return minimum;
        }
        round_money(salary_cap as f64 * self.cap_percentage()).max(minimum)
    }

    pub fn compensation(&self, draft_round: Option<u8>) -> DraftCompensation {
        match self {
            TenderLevel::FirstRound => DraftCompensation::FirstRound,
            TenderLevel::SecondRound => DraftCompensation::SecondRound,
            TenderLevel::OriginalRound => match draft_round {
                Some(round) => DraftCompensation::Round(round),
                None => DraftCompensation::None,
            },
            TenderLevel::RightOfFirstRefusal | TenderLevel::ExclusiveRights => DraftCompensation::None,
        }
    }
}

impl fmt::Display for TenderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TenderLevel::FirstRound => "first round",
            TenderLevel::SecondRound => "second round",
            TenderLevel::OriginalRound => "original round",
            TenderLevel::RightOfFirstRefusal => "right of first refusal",
            TenderLevel::ExclusiveRights => "exclusive rights",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenderStatus {
    Outstanding,
    Accepted,
    Matched,
    LostToOfferSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderOffer {
    pub team_id: u32,
    pub free_agent_id: u32,
    pub player_id: u32,
    pub level: TenderLevel,
    pub salary: Money,
    pub compensation: DraftCompensation,
    pub status: TenderStatus,
    pub year: i32,
}

impl TenderOffer {
    pub fn is_outstanding(&self) -> bool {
        self.status == TenderStatus::Outstanding
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferSheetStatus {
    Pending,
    Matched,
    Declined,
}

/// Another team's offer to a tendered restricted free agent. The original team has until
/// `match_deadline` to match it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSheet {
    pub id: u32,
    pub free_agent_id: u32,
    pub player_id: u32,
    pub original_team_id: u32,
    pub offering_team_id: u32,
    pub offer: ContractOffer,
    pub signed_day: u32,
    pub match_deadline: u32,
    pub compensation: DraftCompensation,
    pub status: OfferSheetStatus,
}

impl OfferSheet {
    pub fn is_pending(&self) -> bool {
        self.status == OfferSheetStatus::Pending
    }
}

impl FreeAgencyState {
    fn apply_tender(&mut self, team_id: u32, free_agent_id: u32, level: TenderLevel) -> Result<Money, FreeAgencyError> {
        if !self.phase.can_tender() {
            return Err(FreeAgencyError::TenderWindowClosed { phase: self.phase });
        }

        let agent = self.agent_on_market(free_agent_id)?;
        let eligible = agent.previous_team_id == Some(team_id)
            && !self.tenders.contains_key(&free_agent_id)
            && match agent.free_agent_type {
                FreeAgentType::ExclusiveRights => level.is_exclusive(),
                FreeAgentType::Restricted => !level.is_exclusive(),
                FreeAgentType::Unrestricted => false,
            };
        if !eligible {
            return Err(FreeAgencyError::TenderNotApplicable { id: free_agent_id });
        }

        let salary = level.salary(self.salary_cap, agent.player.experience);
        let tender = TenderOffer {
            team_id,
            free_agent_id,
            player_id: agent.player_id(),
            level,
            salary,
            compensation: level.compensation(agent.player.draft_round),
            status: TenderStatus::Outstanding,
            year: self.current_year,
        };

        info!(
            "{} tender: team {}, player {}, {}",
            level,
            team_id,
            tender.player_id,
            CurrencyFormatter::format(salary)
        );

        self.tenders.insert(free_agent_id, tender);
        self.push_event(FreeAgencyEventKind::TenderPlaced {
            team_id,
            free_agent_id,
            level,
            salary,
        });

        Ok(salary)
    }

    pub fn place_tender(mut self, team_id: u32, free_agent_id: u32, level: TenderLevel) -> Self {
        if let Err(error) = self.apply_tender(team_id, free_agent_id, level) {
            warn!("tender from team {} on free agent {} ignored: {}", team_id, free_agent_id, error);
        }
        self
    }

    pub fn try_place_tender(&self, team_id: u32, free_agent_id: u32, level: TenderLevel) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_tender(team_id, free_agent_id, level)?;
        Ok(next)
    }

    pub fn pending_offer_sheet(&self, free_agent_id: u32) -> Option<&OfferSheet> {
        self.offer_sheets
            .values()
            .find(|s| s.free_agent_id == free_agent_id && s.is_pending())
    }

    /// Pending offer sheets the team has to decide on.
    pub fn offer_sheets_to_decide(&self, original_team_id: u32) -> Vec<&OfferSheet> {
        self.offer_sheets
            .values()
            .filter(|s| s.original_team_id == original_team_id && s.is_pending())
            .collect()
    }

    fn apply_offer_sheet(
        &mut self,
        offering_team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
    ) -> Result<u32, FreeAgencyError> {
        if !self.phase.can_sign_players() {
            return Err(FreeAgencyError::SigningClosed { phase: self.phase });
        }
        offer.validate()?;
        let player_id = self.agent_on_market(free_agent_id)?.player_id();

        let tender = match self.tenders.get(&free_agent_id) {
            Some(tender) if tender.is_outstanding() => tender,
            _ => return Err(FreeAgencyError::NoTender { id: free_agent_id }),
        };
        if tender.level.is_exclusive() {
            return Err(FreeAgencyError::ExclusiveRightsRetained { id: free_agent_id });
        }
        if tender.team_id == offering_team_id {
            return Err(FreeAgencyError::TenderNotApplicable { id: free_agent_id });
        }
        if self.pending_offer_sheet(free_agent_id).is_some() {
            return Err(FreeAgencyError::OfferSheetPending { id: free_agent_id });
        }
        let (original_team_id, compensation) = (tender.team_id, tender.compensation);
        self.check_budget(offering_team_id, offer.aav())?;

        let id = self.next_sheet_id;
        self.next_sheet_id += 1;

        let sheet = OfferSheet {
            id,
            free_agent_id,
            player_id,
            original_team_id,
            offering_team_id,
            offer: offer.clone(),
            signed_day: self.day,
            match_deadline: self.day + self.rules.offer_sheet_matching_days,
            compensation,
            status: OfferSheetStatus::Pending,
        };

        info!(
            "offer sheet: player {} signs with team {}, team {} has until day {} to match",
            sheet.player_id, offering_team_id, sheet.original_team_id, sheet.match_deadline
        );

        self.offer_sheets.insert(id, sheet);
        if let Some(agent) = self.free_agents.get_mut(&free_agent_id) {
            agent.status = FreeAgentStatus::Negotiating;
        }
        self.push_event(FreeAgencyEventKind::OfferSheetSigned {
            sheet_id: id,
            team_id: offering_team_id,
            free_agent_id,
        });

        Ok(id)
    }

    /// A tendered restricted free agent signs another team's offer sheet. Without a tender
    /// there is nothing to sign and the state is returned as is.
    pub fn sign_offer_sheet(mut self, offering_team_id: u32, free_agent_id: u32, offer: &ContractOffer) -> Self {
        if let Err(error) = self.apply_offer_sheet(offering_team_id, free_agent_id, offer) {
            warn!(
                "offer sheet from team {} for free agent {} ignored: {}",
                offering_team_id, free_agent_id, error
            );
        }
        self
    }

    pub fn try_sign_offer_sheet(
        &self,
        offering_team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
    ) -> Result<(Self, u32), FreeAgencyError> {
        let mut next = self.clone();
        let id = next.apply_offer_sheet(offering_team_id, free_agent_id, offer)?;
        Ok((next, id))
    }

    fn pending_sheet(&self, sheet_id: u32) -> Result<OfferSheet, FreeAgencyError> {
        let sheet = self
            .offer_sheets
            .get(&sheet_id)
            .ok_or(FreeAgencyError::UnknownOfferSheet { id: sheet_id })?;
        if !sheet.is_pending() {
            return Err(FreeAgencyError::OfferSheetResolved { id: sheet_id });
        }
        Ok(sheet.clone())
    }

    fn set_tender_status(&mut self, free_agent_id: u32, status: TenderStatus) {
        if let Some(tender) = self.tenders.get_mut(&free_agent_id) {
            tender.status = status;
        }
    }

    fn apply_match(&mut self, sheet_id: u32) -> Result<(), FreeAgencyError> {
        let sheet = self.pending_sheet(sheet_id)?;

        self.complete_signing(
            sheet.original_team_id,
            sheet.free_agent_id,
            &sheet.offer,
            SigningSource::OfferSheetMatch,
        )?;
        self.set_tender_status(sheet.free_agent_id, TenderStatus::Matched);

        if let Some(matched) = self.offer_sheets.get_mut(&sheet_id) {
            matched.status = OfferSheetStatus::Matched;
        }
        self.push_event(FreeAgencyEventKind::OfferSheetMatched {
            sheet_id,
            team_id: sheet.original_team_id,
        });

        Ok(())
    }

    /// The original team keeps the player on the offer sheet's terms. Resolved sheets are
    /// left alone.
    pub fn match_offer_sheet(mut self, sheet_id: u32) -> Self {
        if let Err(error) = self.apply_match(sheet_id) {
            warn!("offer sheet {} not matched: {}", sheet_id, error);
        }
        self
    }

    pub fn try_match_offer_sheet(&self, sheet_id: u32) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_match(sheet_id)?;
        Ok(next)
    }

    fn apply_decline(&mut self, sheet_id: u32) -> Result<DraftCompensation, FreeAgencyError> {
        let sheet = self.pending_sheet(sheet_id)?;

        self.complete_signing(
            sheet.offering_team_id,
            sheet.free_agent_id,
            &sheet.offer,
            SigningSource::OfferSheet,
        )?;
        self.set_tender_status(sheet.free_agent_id, TenderStatus::LostToOfferSheet);

        if let Some(declined) = self.offer_sheets.get_mut(&sheet_id) {
            declined.status = OfferSheetStatus::Declined;
        }
        self.push_event(FreeAgencyEventKind::OfferSheetDeclined {
            sheet_id,
            team_id: sheet.original_team_id,
            compensation: sheet.compensation,
        });

        Ok(sheet.compensation)
    }

    /// The player leaves for the offering team; the original team is owed the tender's
    /// draft compensation.
    pub fn decline_to_match(mut self, sheet_id: u32) -> Self {
        if let Err(error) = self.apply_decline(sheet_id) {
            warn!("offer sheet {} not declined: {}", sheet_id, error);
        }
        self
    }

    pub fn try_decline_to_match(&self, sheet_id: u32) -> Result<(Self, DraftCompensation), FreeAgencyError> {
        let mut next = self.clone();
        let compensation = next.apply_decline(sheet_id)?;
        Ok((next, compensation))
    }

    pub(crate) fn resolve_offer_sheet_deadlines(&mut self) {
        let lapsed: Vec<u32> = self
            .offer_sheets
            .values()
            .filter(|s| s.is_pending() && s.match_deadline <= self.day)
            .map(|s| s.id)
            .collect();

        for sheet_id in lapsed {
            debug!("offer sheet {} matching window ran out", sheet_id);
            if let Err(error) = self.apply_decline(sheet_id) {
                warn!("offer sheet {} could not be resolved: {}", sheet_id, error);
            }
        }
    }

    pub(crate) fn decline_pending_offer_sheets(&mut self) {
        let pending: Vec<u32> = self.offer_sheets.values().filter(|s| s.is_pending()).map(|s| s.id).collect();
        for sheet_id in pending {
            if let Err(error) = self.apply_decline(sheet_id) {
                warn!("offer sheet {} could not be resolved: {}", sheet_id, error);
            }
        }
    }

    /// Tendered players nobody made an offer sheet for sign their one-year tender.
    pub(crate) fn accept_outstanding_tenders(&mut self) {
        let outstanding: Vec<(u32, u32, Money)> = self
            .tenders
            .values()
            .filter(|t| t.is_outstanding() && self.pending_offer_sheet(t.free_agent_id).is_none())
            .map(|t| (t.free_agent_id, t.team_id, t.salary))
            .collect();

        for (free_agent_id, team_id, salary) in outstanding {
            let offer = ContractOffer::new(1, 0, salary);
            match self.complete_signing(team_id, free_agent_id, &offer, SigningSource::Tender) {
                Ok(_) => {
                    self.set_tender_status(free_agent_id, TenderStatus::Accepted);
                    self.push_event(FreeAgencyEventKind::TenderAccepted { team_id, free_agent_id });
                }
                Err(error) => debug!("tender for free agent {} lapsed: {}", free_agent_id, error),
            }
        }
    }
}
