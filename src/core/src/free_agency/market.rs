use crate::config::MarketRules;
use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType, PlayerContract};
use crate::free_agency::{
    BiddingWar, CompensatoryLedger, CompensatoryTransaction, FreeAgencyError, FreeAgencyEvent,
    FreeAgencyEventKind, FreeAgencyPhase, FreeAgent, FreeAgentOffer, FreeAgentStatus, FreeAgentType, OfferSheet,
    OfferStatus, TamperingBoard, TeamBudget, TenderOffer, acceptance_score, asking_aav,
};
use crate::league::Player;
use crate::shared::{CurrencyFormatter, Money};
use crate::valuation::{MarketConditions, MarketValuation};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unsigned veterans this old retire when the market closes.
pub const RETIREMENT_AGE: u8 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningSource {
    Offer,
    Tampering,
    BiddingWar,
    Tender,
    OfferSheet,
    OfferSheetMatch,
    RosterFiller,
}

/// A completed signing. The contract still has to be booked on the team's cap ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signing {
    pub free_agent_id: u32,
    pub player_id: u32,
    pub team_id: u32,
    pub contract: PlayerContract,
    pub day: u32,
    pub phase: FreeAgencyPhase,
    pub source: SigningSource,
}

/// League-wide free agent market for one offseason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgencyState {
    pub current_year: i32,
    pub phase: FreeAgencyPhase,
    /// Days spent in the current phase.
    pub phase_day: u32,
    /// Offseason day counter, day 0 is the first day of the league year.
    pub day: u32,
    /// League baseline cap, used to price tenders and compensatory picks.
    pub salary_cap: Money,
    pub rules: MarketRules,
    pub free_agents: BTreeMap<u32, FreeAgent>,
    pub offers: BTreeMap<u32, FreeAgentOffer>,
    pub team_budgets: BTreeMap<u32, TeamBudget>,
    pub events: Vec<FreeAgencyEvent>,
    pub signings: Vec<Signing>,
    pub negotiations: TamperingBoard,
    pub bidding_wars: BTreeMap<u32, BiddingWar>,
    pub tenders: BTreeMap<u32, TenderOffer>,
    pub offer_sheets: BTreeMap<u32, OfferSheet>,
    pub compensatory: CompensatoryLedger,
    /// Source of ids for every contract signed on this market.
    pub contract_ids: ContractIdSequence,
    next_free_agent_id: u32,
    next_offer_id: u32,
    pub(crate) next_sheet_id: u32,
}

impl FreeAgencyState {
    pub fn new(current_year: i32, salary_cap: Money, rules: MarketRules) -> Self {
        FreeAgencyState {
            current_year,
            phase: FreeAgencyPhase::PreFreeAgency,
            phase_day: 0,
            day: 0,
            salary_cap,
            rules,
            free_agents: BTreeMap::new(),
            offers: BTreeMap::new(),
            team_budgets: BTreeMap::new(),
            events: Vec::new(),
            signings: Vec::new(),
            negotiations: TamperingBoard::default(),
            bidding_wars: BTreeMap::new(),
            tenders: BTreeMap::new(),
            offer_sheets: BTreeMap::new(),
            compensatory: CompensatoryLedger::default(),
            contract_ids: ContractIdSequence::default(),
            next_free_agent_id: 1,
            next_offer_id: 1,
            next_sheet_id: 1,
        }
    }

    /// Continues an id sequence the league's ledgers already use.
    pub fn with_contract_ids(mut self, contract_ids: ContractIdSequence) -> Self {
        self.contract_ids = contract_ids;
        self
    }

    // ==================== Pool ====================

    pub fn add_free_agent(mut self, player: Player, previous_team_id: Option<u32>, market_value: MarketValuation) -> Self {
        let id = self.next_free_agent_id;
        self.next_free_agent_id += 1;

        debug!(
            "free agent {}: player {} ({}), market value {}",
            id,
            player.id,
            player.position,
            CurrencyFormatter::format(market_value.aav)
        );

        self.free_agents
            .insert(id, FreeAgent::new(id, player, previous_team_id, market_value));
        self
    }

    pub fn with_budget(mut self, budget: TeamBudget) -> Self {
        self.team_budgets.insert(budget.team_id, budget);
        self
    }

    pub fn free_agent(&self, id: u32) -> Option<&FreeAgent> {
        self.free_agents.get(&id)
    }

    pub fn free_agent_by_player(&self, player_id: u32) -> Option<&FreeAgent> {
        self.free_agents.values().find(|a| a.player_id() == player_id)
    }

    pub fn available_free_agents(&self) -> impl Iterator<Item = &FreeAgent> {
        self.free_agents.values().filter(|a| a.is_on_market())
    }

    pub fn pending_offer(&self, team_id: u32, free_agent_id: u32) -> Option<&FreeAgentOffer> {
        self.offers
            .values()
            .find(|o| o.team_id == team_id && o.free_agent_id == free_agent_id && o.is_pending())
    }

    pub fn pending_offers_for(&self, free_agent_id: u32) -> Vec<&FreeAgentOffer> {
        self.offers
            .values()
            .filter(|o| o.free_agent_id == free_agent_id && o.is_pending())
            .collect()
    }

    pub fn budget_remaining(&self, team_id: u32) -> Option<Money> {
        self.team_budgets.get(&team_id).map(|b| b.remaining())
    }

    /// Signings made since the first `from` entries; lets a driver book new contracts.
    pub fn signings_since(&self, from: usize) -> &[Signing] {
        self.signings.get(from..).unwrap_or(&[])
    }

    pub fn can_sign_players(&self) -> bool {
        self.phase.can_sign_players()
    }

    pub(crate) fn push_event(&mut self, kind: FreeAgencyEventKind) {
        self.events.push(FreeAgencyEvent::new(self.day, self.phase, kind));
    }

    pub(crate) fn agent_on_market(&self, free_agent_id: u32) -> Result<&FreeAgent, FreeAgencyError> {
        let agent = self
            .free_agents
            .get(&free_agent_id)
            .ok_or(FreeAgencyError::UnknownFreeAgent { id: free_agent_id })?;

        if !agent.is_on_market() {
            return Err(FreeAgencyError::NotOnMarket { id: free_agent_id });
        }

        Ok(agent)
    }

    /// Tendered players belong to their old team unless another club goes through an offer
    /// sheet. While a sheet is pending nobody, the old team included, signs around it.
    pub(crate) fn check_tender_rights(&self, team_id: u32, free_agent_id: u32) -> Result<(), FreeAgencyError> {
        if self.pending_offer_sheet(free_agent_id).is_some() {
            return Err(FreeAgencyError::OfferSheetPending { id: free_agent_id });
        }

        match self.tenders.get(&free_agent_id) {
            Some(tender) if tender.is_outstanding() && tender.team_id != team_id => {
                if tender.level.is_exclusive() {
                    Err(FreeAgencyError::ExclusiveRightsRetained { id: free_agent_id })
                } else {
                    Err(FreeAgencyError::Tendered { id: free_agent_id })
                }
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn check_budget(&self, team_id: u32, aav: Money) -> Result<(), FreeAgencyError> {
        match self.team_budgets.get(&team_id) {
            Some(budget) if !budget.can_afford(aav) => Err(FreeAgencyError::InsufficientBudget { team_id }),
            _ => Ok(()),
        }
    }

    // ==================== Offers ====================

    fn apply_submit_offer(
        &mut self,
        team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
    ) -> Result<u32, FreeAgencyError> {
        if !self.phase.can_sign_players() {
            return Err(FreeAgencyError::SigningClosed { phase: self.phase });
        }
        offer.validate()?;
        self.agent_on_market(free_agent_id)?;
        self.check_tender_rights(team_id, free_agent_id)?;

        if self.pending_offer(team_id, free_agent_id).is_some() {
            return Err(FreeAgencyError::DuplicateOffer { team_id, free_agent_id });
        }
        self.check_budget(team_id, offer.aav())?;

        let id = self.next_offer_id;
        self.next_offer_id += 1;

        self.offers.insert(
            id,
            FreeAgentOffer::new(id, team_id, free_agent_id, offer, self.day, self.rules.offer_expiry_days),
        );

        let day = self.day;
        if let Some(agent) = self.free_agents.get_mut(&free_agent_id) {
            agent.offers.push(id);
            agent.record_interest(team_id, 1.0, day);
        }

        self.push_event(FreeAgencyEventKind::OfferSubmitted {
            offer_id: id,
            team_id,
            free_agent_id,
            aav: offer.aav(),
        });

        Ok(id)
    }

    /// Puts an offer in front of a free agent. Outside the signing window, or for a player
    /// who cannot take it, nothing changes.
    pub fn submit_offer(mut self, team_id: u32, free_agent_id: u32, offer: &ContractOffer) -> Self {
        if let Err(error) = self.apply_submit_offer(team_id, free_agent_id, offer) {
            warn!("offer from team {} to free agent {} ignored: {}", team_id, free_agent_id, error);
        }
        self
    }

    pub fn try_submit_offer(
        &self,
        team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
    ) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_submit_offer(team_id, free_agent_id, offer)?;
        Ok(next)
    }

    fn apply_accept_offer(&mut self, offer_id: u32) -> Result<u32, FreeAgencyError> {
        if !self.phase.can_sign_players() {
            return Err(FreeAgencyError::SigningClosed { phase: self.phase });
        }

        let offer = self
            .offers
            .get(&offer_id)
            .ok_or(FreeAgencyError::UnknownOffer { id: offer_id })?
            .clone();

        if !offer.is_pending() {
            return Err(FreeAgencyError::OfferNotPending { id: offer_id });
        }
        self.agent_on_market(offer.free_agent_id)?;
        self.check_tender_rights(offer.team_id, offer.free_agent_id)?;
        self.check_budget(offer.team_id, offer.aav())?;

        let contract_id = self.complete_signing(
            offer.team_id,
            offer.free_agent_id,
            &offer.contract_offer(),
            SigningSource::Offer,
        )?;

        if let Some(accepted) = self.offers.get_mut(&offer_id) {
            accepted.status = OfferStatus::Accepted;
        }

        Ok(contract_id)
    }

    pub fn accept_offer(mut self, offer_id: u32) -> Self {
        if let Err(error) = self.apply_accept_offer(offer_id) {
            warn!("offer {} not accepted: {}", offer_id, error);
        }
        self
    }

    pub fn try_accept_offer(&self, offer_id: u32) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_accept_offer(offer_id)?;
        Ok(next)
    }

    fn close_offer(&mut self, offer_id: u32, status: OfferStatus) -> Result<(), FreeAgencyError> {
        let offer = self
            .offers
            .get_mut(&offer_id)
            .ok_or(FreeAgencyError::UnknownOffer { id: offer_id })?;

        if !offer.is_pending() {
            return Err(FreeAgencyError::OfferNotPending { id: offer_id });
        }
        offer.status = status;

        let kind = match status {
            OfferStatus::Withdrawn => FreeAgencyEventKind::OfferWithdrawn { offer_id },
            OfferStatus::Expired => FreeAgencyEventKind::OfferExpired { offer_id },
            _ => FreeAgencyEventKind::OfferRejected { offer_id },
        };
        self.push_event(kind);

        Ok(())
    }

    pub fn reject_offer(mut self, offer_id: u32) -> Self {
        if let Err(error) = self.close_offer(offer_id, OfferStatus::Rejected) {
            warn!("offer {} not rejected: {}", offer_id, error);
        }
        self
    }

    pub fn withdraw_offer(mut self, offer_id: u32) -> Self {
        if let Err(error) = self.close_offer(offer_id, OfferStatus::Withdrawn) {
            warn!("offer {} not withdrawn: {}", offer_id, error);
        }
        self
    }

    pub fn try_withdraw_offer(&self, offer_id: u32) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.close_offer(offer_id, OfferStatus::Withdrawn)?;
        Ok(next)
    }

    // ==================== Signing ====================

    pub(crate) fn apply_direct_signing(
        &mut self,
        team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
        source: SigningSource,
    ) -> Result<u32, FreeAgencyError> {
        if !self.phase.can_sign_players() {
            return Err(FreeAgencyError::SigningClosed { phase: self.phase });
        }
        offer.validate()?;
        self.agent_on_market(free_agent_id)?;
        self.check_tender_rights(team_id, free_agent_id)?;
        self.check_budget(team_id, offer.aav())?;

        self.complete_signing(team_id, free_agent_id, offer, source)
    }

    /// Signs a free agent outright on the given terms.
    pub fn sign_free_agent(mut self, team_id: u32, free_agent_id: u32, offer: &ContractOffer, source: SigningSource) -> Self {
        if let Err(error) = self.apply_direct_signing(team_id, free_agent_id, offer, source) {
            warn!("team {} could not sign free agent {}: {}", team_id, free_agent_id, error);
        }
        self
    }

    pub fn try_sign_free_agent(
        &self,
        team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
        source: SigningSource,
    ) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_direct_signing(team_id, free_agent_id, offer, source)?;
        Ok(next)
    }

    /// Writes a signing once every precondition has been checked by the caller.
    pub(crate) fn complete_signing(
        &mut self,
        team_id: u32,
        free_agent_id: u32,
        offer: &ContractOffer,
        source: SigningSource,
    ) -> Result<u32, FreeAgencyError> {
        let agent = self.agent_on_market(free_agent_id)?.clone();

        let contract = ContractGenerator::create_contract(
            &mut self.contract_ids,
            offer,
            agent.player_id(),
            team_id,
            agent.position(),
            self.current_year,
            ContractType::Veteran,
        )?;
        let contract_id = contract.id;

        let competing: Vec<u32> = self
            .offers
            .values()
            .filter(|o| o.free_agent_id == free_agent_id && o.is_pending() && o.team_id != team_id)
            .map(|o| o.id)
            .collect();
        for offer_id in competing {
            self.close_offer(offer_id, OfferStatus::Rejected)?;
        }

        if let Some(own) = self
            .offers
            .values_mut()
            .find(|o| o.free_agent_id == free_agent_id && o.is_pending() && o.team_id == team_id)
        {
            own.status = OfferStatus::Accepted;
        }

        if let Some(signed) = self.free_agents.get_mut(&free_agent_id) {
            signed.status = FreeAgentStatus::Signed;
            signed.signed_team_id = Some(team_id);
        }

        if let Some(budget) = self.team_budgets.remove(&team_id) {
            self.team_budgets.insert(team_id, budget.commit(offer.aav()));
        }

        if agent.free_agent_type == FreeAgentType::Unrestricted && self.phase < FreeAgencyPhase::TrainingCamp {
            if let Some(previous_team_id) = agent.previous_team_id.filter(|previous| *previous != team_id) {
                self.compensatory.record(CompensatoryTransaction {
                    player_id: agent.player_id(),
                    from_team_id: previous_team_id,
                    to_team_id: team_id,
                    aav: offer.aav(),
                    year: self.current_year,
                });
            }
        }

        info!(
            "signed: player {} ({} {}) with team {}, {} years, {} per year, {:?}",
            agent.player_id(),
            agent.free_agent_type,
            agent.position(),
            team_id,
            offer.years,
            CurrencyFormatter::format(offer.aav()),
            source
        );

        self.push_event(FreeAgencyEventKind::PlayerSigned {
            team_id,
            free_agent_id,
            player_id: agent.player_id(),
            contract_id,
            aav: offer.aav(),
        });

        self.signings.push(Signing {
            free_agent_id,
            player_id: agent.player_id(),
            team_id,
            contract,
            day: self.day,
            phase: self.phase,
            source,
        });

        Ok(contract_id)
    }

    // ==================== Player decisions ====================

    /// Each free agent with pending offers ranks them against his current asking price and
    /// takes the best one that clears the open market threshold. An offer that can no longer
    /// be completed is rejected and the next best one is tried.
    pub fn resolve_offers(mut self, conditions: &MarketConditions) -> Self {
        if !self.phase.can_sign_players() {
            return self;
        }

        let candidates: Vec<u32> = self
            .available_free_agents()
            .filter(|a| !self.bidding_wars.get(&a.id).is_some_and(|w| w.is_active))
            .map(|a| a.id)
            .collect();

        for free_agent_id in candidates {
            let Some(agent) = self.free_agents.get(&free_agent_id) else {
                continue;
            };

            let mut expectation = agent.market_value.clone();
            expectation.aav = asking_aav(agent, conditions);

            let mut ranked: Vec<(u32, f64)> = self
                .pending_offers_for(free_agent_id)
                .into_iter()
                .map(|o| (o.id, acceptance_score(&o.contract_offer(), &expectation)))
                .collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

            for (offer_id, score) in ranked {
                if score < self.rules.open_market_acceptance_threshold {
                    debug!(
                        "free agent {} waits: best offer {} scores {:.2}",
                        free_agent_id, offer_id, score
                    );
                    break;
                }

                match self.apply_accept_offer(offer_id) {
                    Ok(_) => break,
                    Err(error) => {
                        debug!("offer {} could not be completed: {}", offer_id, error);
                        let _ = self.close_offer(offer_id, OfferStatus::Rejected);
                    }
                }
            }
        }

        self
    }

    // ==================== Calendar ====================

    fn apply_advance_phase(&mut self) -> Result<FreeAgencyPhase, FreeAgencyError> {
        let from = self.phase;
        let Some(to) = from.next() else {
            return Err(FreeAgencyError::SigningClosed { phase: from });
        };

        self.phase = to;
        self.phase_day = 0;

        info!("free agency {}: {} -> {} on day {}", self.current_year, from, to, self.day);
        self.push_event(FreeAgencyEventKind::PhaseChanged { from, to });

        match to {
            FreeAgencyPhase::Day1Frenzy => self.convert_verbal_agreements(),
            FreeAgencyPhase::TrainingCamp => self.accept_outstanding_tenders(),
            FreeAgencyPhase::Closed => self.close_market(),
            _ => {}
        }

        Ok(to)
    }

    /// Moves to the next phase. The closed market stays closed.
    pub fn advance_phase(mut self) -> Self {
        if let Err(error) = self.apply_advance_phase() {
            warn!("phase not advanced: {}", error);
        }
        self
    }

    pub fn phase_complete(&self) -> bool {
        self.phase != FreeAgencyPhase::Closed
            && self.phase_day >= self.rules.durations.for_phase(self.phase)
    }

    /// Ends the current day: lapses old offers, resolves offer sheets whose matching
    /// window has run out and moves to the next phase once this one has run its course.
    pub fn advance_day(mut self) -> Self {
        if self.phase == FreeAgencyPhase::Closed {
            return self;
        }

        self.day += 1;
        self.phase_day += 1;

        if self.phase >= FreeAgencyPhase::Day1Frenzy {
            for agent in self.free_agents.values_mut().filter(|a| a.is_on_market()) {
                agent.days_on_market += 1;
            }
        }

        let lapsed: Vec<u32> = self
            .offers
            .values()
            .filter(|o| o.is_pending() && o.expires_day <= self.day)
            .map(|o| o.id)
            .collect();
        for offer_id in lapsed {
            let _ = self.close_offer(offer_id, OfferStatus::Expired);
        }

        self.resolve_offer_sheet_deadlines();

        if self.phase_complete() {
            let _ = self.apply_advance_phase();
        }

        self
    }

    fn close_market(&mut self) {
        let pending: Vec<u32> = self.offers.values().filter(|o| o.is_pending()).map(|o| o.id).collect();
        for offer_id in pending {
            let _ = self.close_offer(offer_id, OfferStatus::Expired);
        }

        self.decline_pending_offer_sheets();

        let retiring: Vec<(u32, u32)> = self
            .free_agents
            .values()
            .filter(|a| a.is_on_market() && a.player.age >= RETIREMENT_AGE)
            .map(|a| (a.id, a.player_id()))
            .collect();

        for (free_agent_id, player_id) in retiring {
            if let Some(agent) = self.free_agents.get_mut(&free_agent_id) {
                agent.status = FreeAgentStatus::Retired;
            }
            info!("retired: player {}", player_id);
            self.push_event(FreeAgencyEventKind::PlayerRetired {
                free_agent_id,
                player_id,
            });
        }

        for agent in self.free_agents.values_mut() {
            if agent.status == FreeAgentStatus::Negotiating {
                agent.status = FreeAgentStatus::Available;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Position;
    use crate::valuation::MarketValueCalculator;

    fn market_with(players: Vec<(Player, Option<u32>)>) -> FreeAgencyState {
        let conditions = MarketConditions::new();
        players
            .into_iter()
            .fold(FreeAgencyState::new(2024, 255_400, MarketRules::default()), |state, (player, team)| {
                let value = MarketValueCalculator::calculate(&player, 2024, &conditions);
                state.add_free_agent(player, team, value)
            })
    }

    fn open_market(mut state: FreeAgencyState) -> FreeAgencyState {
        while state.phase < FreeAgencyPhase::Day1Frenzy {
            state = state.advance_phase();
        }
        state
    }

    fn veteran(id: u32) -> Player {
        Player::new(id, "Veteran", Position::Linebacker, 28, 6, 80)
    }

    #[test]
    fn four_advances_reach_trickle() {
        let mut state = FreeAgencyState::new(2024, 255_400, MarketRules::default());
        assert!(!state.can_sign_players());

        for _ in 0..2 {
            state = state.advance_phase();
            assert!(!state.can_sign_players());
        }
        state = state.advance_phase();
        assert!(state.can_sign_players());
        state = state.advance_phase();

        assert_eq!(state.phase, FreeAgencyPhase::Trickle);
        assert!(state.can_sign_players());
        assert_eq!(state.events.len(), 4);
    }

    #[test]
    fn closed_market_does_not_advance() {
        let mut state = FreeAgencyState::new(2024, 255_400, MarketRules::default());
        for _ in 0..10 {
            state = state.advance_phase();
        }
        assert_eq!(state.phase, FreeAgencyPhase::Closed);
    }

    #[test]
    fn offers_before_the_market_opens_are_ignored() {
        let state = market_with(vec![(veteran(1), Some(5))]);
        let offer = ContractOffer::new(2, 1_000, 5_000);

        let unchanged = state.clone().submit_offer(3, 1, &offer);
        assert_eq!(unchanged, state);

        let error = state.try_submit_offer(3, 1, &offer).unwrap_err();
        assert_eq!(
            error,
            FreeAgencyError::SigningClosed {
                phase: FreeAgencyPhase::PreFreeAgency
            }
        );
    }

    #[test]
    fn accepting_an_offer_signs_the_player() {
        let state = open_market(market_with(vec![(veteran(1), Some(5))]))
            .submit_offer(3, 1, &ContractOffer::new(2, 1_000, 5_000))
            .submit_offer(4, 1, &ContractOffer::new(3, 1_000, 5_000));

        let offer_id = state.pending_offer(3, 1).map(|o| o.id).unwrap();
        let state = state.accept_offer(offer_id);

        assert_eq!(state.free_agents[&1].status, FreeAgentStatus::Signed);
        assert_eq!(state.free_agents[&1].signed_team_id, Some(3));
        assert_eq!(state.signings.len(), 1);
        assert_eq!(state.signings[0].contract.total_value, 12_000);
        assert!(state.pending_offers_for(1).is_empty());
        assert_eq!(state.compensatory.transactions.len(), 1);
    }

    #[test]
    fn budget_limits_offers() {
        let state = open_market(market_with(vec![(veteran(1), None)])).with_budget(TeamBudget::new(3, 4_000, 0));

        let error = state
            .try_submit_offer(3, 1, &ContractOffer::new(2, 1_000, 5_000))
            .unwrap_err();
        assert_eq!(error, FreeAgencyError::InsufficientBudget { team_id: 3 });
    }

    #[test]
    fn offers_lapse_after_three_days() {
        let mut state = open_market(market_with(vec![(veteran(1), None)]))
            .submit_offer(3, 1, &ContractOffer::new(2, 0, 900));
        let offer_id = state.pending_offer(3, 1).map(|o| o.id).unwrap();

        for _ in 0..3 {
            state = state.advance_day();
        }

        assert_eq!(state.offers[&offer_id].status, OfferStatus::Expired);
        assert_eq!(state.free_agents[&1].days_on_market, 3);
    }

    #[test]
    fn player_takes_the_best_offer_above_threshold() {
        let state = open_market(market_with(vec![(veteran(1), None)]));
        let market = state.free_agents[&1].market_value.to_offer();

        let state = state
            .submit_offer(3, 1, &market.scaled(0.5))
            .submit_offer(4, 1, &market)
            .resolve_offers(&MarketConditions::new());

        assert_eq!(state.free_agents[&1].signed_team_id, Some(4));
    }

    #[test]
    fn next_best_offer_is_taken_when_the_best_fails() {
        let state = open_market(market_with(vec![(veteran(1), None)]));
        let market = state.free_agents[&1].market_value.to_offer();

        let state = state
            .submit_offer(3, 1, &market.scaled(0.9))
            .submit_offer(4, 1, &market)
            .with_budget(TeamBudget::new(4, 1_000, 0));
        let best = state.pending_offer(4, 1).map(|o| o.id).unwrap();

        let state = state.resolve_offers(&MarketConditions::new());

        assert_eq!(state.offers[&best].status, OfferStatus::Rejected);
        assert_eq!(state.free_agents[&1].signed_team_id, Some(3));
    }

    #[test]
    fn open_market_threshold_is_its_own_rule() {
        let rules = MarketRules {
            tampering_acceptance_threshold: 0.99,
            ..MarketRules::default()
        };
        let mut state = FreeAgencyState::new(2024, 255_400, rules);
        let player = veteran(1);
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        state = open_market(state.add_free_agent(player, None, value));
        let market = state.free_agents[&1].market_value.to_offer();

        let state = state
            .submit_offer(3, 1, &market.scaled(0.95))
            .resolve_offers(&MarketConditions::new());

        assert_eq!(state.free_agents[&1].signed_team_id, Some(3));
    }

    #[test]
    fn lowball_offers_wait() {
        let state = open_market(market_with(vec![(veteran(1), None)]));
        let market = state.free_agents[&1].market_value.to_offer();

        let state = state
            .submit_offer(3, 1, &market.scaled(0.5))
            .resolve_offers(&MarketConditions::new());

        assert_eq!(state.free_agents[&1].status, FreeAgentStatus::Available);
    }

    #[test]
    fn old_unsigned_veterans_retire_at_close() {
        let old = Player::new(2, "Old", Position::Safety, 34, 12, 70);
        let mut state = market_with(vec![(veteran(1), None), (old, None)]);
        while state.phase != FreeAgencyPhase::Closed {
            state = state.advance_phase();
        }

        assert_eq!(state.free_agents[&1].status, FreeAgentStatus::Available);
        assert_eq!(state.free_agents[&2].status, FreeAgentStatus::Retired);
    }

    #[test]
    fn days_move_the_phase_along() {
        let mut state = FreeAgencyState::new(2024, 255_400, MarketRules::default());
        for _ in 0..12 {
            state = state.advance_day();
        }
        assert_eq!(state.phase, FreeAgencyPhase::Day1Frenzy);
        assert_eq!(state.day, 12);
    }
}
