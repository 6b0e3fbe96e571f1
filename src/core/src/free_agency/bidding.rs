use crate::contract::{ContractOffer, ContractTerms};
use crate::free_agency::{FreeAgencyError, FreeAgencyEventKind, FreeAgencyState, SigningSource};
use crate::shared::{CurrencyFormatter, scale_money};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub team_id: u32,
    pub terms: ContractTerms,
    pub round: u32,
}

/// Competitive bidding for a free agent when the market opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiddingWar {
    pub free_agent_id: u32,
    pub participating_teams: Vec<u32>,
    pub passed_teams: Vec<u32>,
    pub current_high_bid: ContractTerms,
    pub current_high_bidder: u32,
    pub rounds_elapsed: u32,
    pub max_rounds: u32,
    pub escalation_rate: f64,
    pub is_active: bool,
    pub history: Vec<Bid>,
}

/// Raises every dollar figure by `rate`, keeping the shape of the deal.
pub fn escalate_terms(terms: &ContractTerms, rate: f64) -> ContractTerms {
    let factor = 1.0 + rate;
    ContractTerms {
        years: terms.years,
        total_value: scale_money(terms.total_value, factor),
        guaranteed_money: scale_money(terms.guaranteed_money, factor),
        signing_bonus: scale_money(terms.signing_bonus, factor),
        first_year_salary: scale_money(terms.first_year_salary, factor),
    }
}

impl BiddingWar {
    pub fn start(
        free_agent_id: u32,
        participating_teams: Vec<u32>,
        opening_bidder: u32,
        opening_bid: ContractTerms,
        max_rounds: u32,
        escalation_rate: f64,
    ) -> Result<Self, FreeAgencyError> {
        let mut participating_teams = participating_teams;
        if !participating_teams.contains(&opening_bidder) {
            participating_teams.push(opening_bidder);
        }
        participating_teams.sort_unstable();
        participating_teams.dedup();

        if participating_teams.len() < 2 {
            return Err(FreeAgencyError::NotEnoughBidders);
        }

        Ok(BiddingWar {
            free_agent_id,
            participating_teams,
            passed_teams: Vec::new(),
            history: vec![Bid {
                team_id: opening_bidder,
                terms: opening_bid.clone(),
                round: 0,
            }],
            current_high_bid: opening_bid,
            current_high_bidder: opening_bidder,
            rounds_elapsed: 0,
            max_rounds: max_rounds.max(1),
            escalation_rate,
            is_active: true,
        })
    }

    /// What it takes to beat the current high bid.
    pub fn next_bid(&self) -> ContractTerms {
        escalate_terms(&self.current_high_bid, self.escalation_rate)
    }

    /// Teams still in the war other than the current high bidder.
    pub fn challengers(&self) -> Vec<u32> {
        self.participating_teams
            .iter()
            .copied()
            .filter(|t| *t != self.current_high_bidder && !self.passed_teams.contains(t))
            .collect()
    }

    pub fn place_bid(&self, team_id: u32, terms: ContractTerms) -> Result<BiddingWar, FreeAgencyError> {
        if !self.is_active {
            return Err(FreeAgencyError::BiddingClosed { id: self.free_agent_id });
        }
        if !self.challengers().contains(&team_id) {
            return Err(FreeAgencyError::NotBidding { team_id });
        }
        if terms.total_value <= self.current_high_bid.total_value {
            return Err(FreeAgencyError::BidTooLow);
        }

        let mut next = self.clone();
        next.rounds_elapsed += 1;
        next.history.push(Bid {
            team_id,
            terms: terms.clone(),
            round: next.rounds_elapsed,
        });
        next.current_high_bid = terms;
        next.current_high_bidder = team_id;

        if next.rounds_elapsed >= next.max_rounds {
            next.is_active = false;
        }

        Ok(next)
    }

    pub fn pass(&self, team_id: u32) -> BiddingWar {
        let mut next = self.clone();
        if !next.passed_teams.contains(&team_id) && team_id != next.current_high_bidder {
            next.passed_teams.push(team_id);
        }
        if next.challengers().is_empty() {
            next.is_active = false;
        }
        next
    }

    pub fn close(&self) -> BiddingWar {
        let mut next = self.clone();
        next.is_active = false;
        next
    }
}

impl FreeAgencyState {
    fn apply_start_bidding_war(
        &mut self,
        free_agent_id: u32,
        teams: Vec<u32>,
        opening_bidder: u32,
        opening_bid: ContractTerms,
    ) -> Result<(), FreeAgencyError> {
        if !self.phase.can_sign_players() {
            return Err(FreeAgencyError::SigningClosed { phase: self.phase });
        }
        self.agent_on_market(free_agent_id)?;
        for team_id in teams.iter().chain(std::iter::once(&opening_bidder)) {
            self.check_tender_rights(*team_id, free_agent_id)?;
        }

        let war = BiddingWar::start(
            free_agent_id,
            teams,
            opening_bidder,
            opening_bid,
            self.rules.bidding_max_rounds,
            self.rules.bidding_escalation_rate,
        )?;

        info!(
            "bidding war: free agent {}, {} teams, opening {} from team {}",
            free_agent_id,
            war.participating_teams.len(),
            CurrencyFormatter::format(war.current_high_bid.total_value),
            opening_bidder
        );

        self.push_event(FreeAgencyEventKind::BiddingWarStarted {
            free_agent_id,
            teams: war.participating_teams.len(),
        });
        self.bidding_wars.insert(free_agent_id, war);

        Ok(())
    }

    pub fn start_bidding_war(
        mut self,
        free_agent_id: u32,
        teams: Vec<u32>,
        opening_bidder: u32,
        opening_bid: ContractTerms,
    ) -> Self {
        if let Err(error) = self.apply_start_bidding_war(free_agent_id, teams, opening_bidder, opening_bid) {
            warn!("bidding war for free agent {} not started: {}", free_agent_id, error);
        }
        self
    }

    pub fn try_start_bidding_war(
        &self,
        free_agent_id: u32,
        teams: Vec<u32>,
        opening_bidder: u32,
        opening_bid: ContractTerms,
    ) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_start_bidding_war(free_agent_id, teams, opening_bidder, opening_bid)?;
        Ok(next)
    }

    fn active_war(&self, free_agent_id: u32) -> Result<&BiddingWar, FreeAgencyError> {
        let war = self
            .bidding_wars
            .get(&free_agent_id)
            .ok_or(FreeAgencyError::UnknownBiddingWar { id: free_agent_id })?;
        if !war.is_active {
            return Err(FreeAgencyError::BiddingClosed { id: free_agent_id });
        }
        Ok(war)
    }

    fn apply_bid(&mut self, free_agent_id: u32, team_id: u32, terms: ContractTerms) -> Result<(), FreeAgencyError> {
        self.check_budget(team_id, terms.aav())?;
        let war = self.active_war(free_agent_id)?.place_bid(team_id, terms)?;

        debug!(
            "bid: team {} on free agent {}, {} (round {})",
            team_id,
            free_agent_id,
            CurrencyFormatter::format(war.current_high_bid.total_value),
            war.rounds_elapsed
        );

        self.bidding_wars.insert(free_agent_id, war);
        Ok(())
    }

    pub fn place_bid(mut self, free_agent_id: u32, team_id: u32, terms: ContractTerms) -> Self {
        if let Err(error) = self.apply_bid(free_agent_id, team_id, terms) {
            warn!("bid from team {} on free agent {} ignored: {}", team_id, free_agent_id, error);
        }
        self
    }

    pub fn try_place_bid(&self, free_agent_id: u32, team_id: u32, terms: ContractTerms) -> Result<Self, FreeAgencyError> {
        let mut next = self.clone();
        next.apply_bid(free_agent_id, team_id, terms)?;
        Ok(next)
    }

    pub fn pass_bid(mut self, free_agent_id: u32, team_id: u32) -> Self {
        match self.active_war(free_agent_id) {
            Ok(war) => {
                let war = war.pass(team_id);
                self.bidding_wars.insert(free_agent_id, war);
            }
            Err(error) => warn!("pass from team {} ignored: {}", team_id, error),
        }
        self
    }

    fn apply_close_bidding_war(&mut self, free_agent_id: u32) -> Result<Option<u32>, FreeAgencyError> {
        let war = self
            .bidding_wars
            .get(&free_agent_id)
            .ok_or(FreeAgencyError::UnknownBiddingWar { id: free_agent_id })?
            .close();

        let offer = ContractOffer::from_terms(&war.current_high_bid);
        let winner = match self.apply_direct_signing(war.current_high_bidder, free_agent_id, &offer, SigningSource::BiddingWar) {
            Ok(_) => Some(war.current_high_bidder),
            Err(error) => {
                debug!("bidding war for free agent {} ended unsigned: {}", free_agent_id, error);
                None
            }
        };

        self.push_event(FreeAgencyEventKind::BiddingWarClosed {
            free_agent_id,
            winner,
            rounds: war.rounds_elapsed,
        });
        self.bidding_wars.insert(free_agent_id, war);

        Ok(winner)
    }

    /// Ends the war and signs the player with the high bidder.
    pub fn close_bidding_war(mut self, free_agent_id: u32) -> Self {
        if let Err(error) = self.apply_close_bidding_war(free_agent_id) {
            warn!("bidding war for free agent {} not closed: {}", free_agent_id, error);
        }
        self
    }

    pub fn try_close_bidding_war(&self, free_agent_id: u32) -> Result<(Self, Option<u32>), FreeAgencyError> {
        let mut next = self.clone();
        let winner = next.apply_close_bidding_war(free_agent_id)?;
        Ok((next, winner))
    }
}
