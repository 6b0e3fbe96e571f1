use crate::contract::ContractOffer;
use crate::free_agency::{
    FreeAgencyError, FreeAgencyEventKind, FreeAgencyState, FreeAgentStatus, SigningSource, acceptance_score,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegotiationStatus {
    Talking,
    VerbalAgreement,
    Converted,
    Dropped,
}

/// Legal tampering talks between one team and one free agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TamperingNegotiation {
    pub team_id: u32,
    pub free_agent_id: u32,
    pub proposal: ContractOffer,
    pub score: f64,
    pub status: NegotiationStatus,
    /// Order in which verbal agreements were reached, lower is earlier.
    pub priority: Option<u32>,
    pub started_day: u32,
    pub end_day: u32,
}

/// Every tampering negotiation of the offseason, at most one per team and free agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TamperingBoard {
    pub negotiations: Vec<TamperingNegotiation>,
    next_priority: u32,
}

impl TamperingBoard {
    pub fn get(&self, team_id: u32, free_agent_id: u32) -> Option<&TamperingNegotiation> {
        self.negotiations
            .iter()
            .find(|n| n.team_id == team_id && n.free_agent_id == free_agent_id)
    }

    fn get_mut(&mut self, team_id: u32, free_agent_id: u32) -> Option<&mut TamperingNegotiation> {
        self.negotiations
            .iter_mut()
            .find(|n| n.team_id == team_id && n.free_agent_id == free_agent_id)
    }

    pub fn for_free_agent(&self, free_agent_id: u32) -> impl Iterator<Item = &TamperingNegotiation> {
        self.negotiations.iter().filter(move |n| n.free_agent_id == free_agent_id)
    }

    /// Verbal agreements, earliest first.
    pub fn agreements(&self) -> Vec<&TamperingNegotiation> {
        let mut agreements: Vec<&TamperingNegotiation> = self
            .negotiations
            .iter()
            .filter(|n| n.status == NegotiationStatus::VerbalAgreement)
            .collect();
        agreements.sort_by_key(|n| n.priority);
        agreements
    }

    pub fn has_agreement(&self, free_agent_id: u32) -> bool {
        self.for_free_agent(free_agent_id)
            .any(|n| n.status == NegotiationStatus::VerbalAgreement)
    }

    fn take_priority(&mut self) -> u32 {
        self.next_priority += 1;
        self.next_priority
    }
}

impl FreeAgencyState {
    fn apply_negotiation(
        &mut self,
        team_id: u32,
        free_agent_id: u32,
        proposal: &ContractOffer,
    ) -> Result<NegotiationStatus, FreeAgencyError> {
        if !self.phase.can_negotiate() {
            return Err(FreeAgencyError::NegotiationClosed { phase: self.phase });
        }
        proposal.validate()?;
        let agent = self.agent_on_market(free_agent_id)?;
        self.check_tender_rights(team_id, free_agent_id)?;
        self.check_budget(team_id, proposal.aav())?;

        let score = acceptance_score(proposal, &agent.market_value);
        let agreed = score >= self.rules.tampering_acceptance_threshold;

        debug!(
            "tampering: team {} and free agent {}, {} per year scores {:.2}",
            team_id,
            free_agent_id,
            proposal.aav(),
            score
        );

        let day = self.day;
        let end_day = day - self.phase_day + self.rules.durations.legal_tampering;

        if let Some(existing) = self.negotiations.get(team_id, free_agent_id) {
            if existing.status != NegotiationStatus::Talking {
                return Ok(existing.status);
            }
        }

        let priority = agreed.then(|| self.negotiations.take_priority());
        let status = if agreed {
            NegotiationStatus::VerbalAgreement
        } else {
            NegotiationStatus::Talking
        };

        match self.negotiations.get_mut(team_id, free_agent_id) {
            Some(existing) => {
                existing.proposal = proposal.clone();
                existing.score = score;
                existing.status = status;
                existing.priority = priority;
            }
            None => self.negotiations.negotiations.push(TamperingNegotiation {
                team_id,
                free_agent_id,
                proposal: proposal.clone(),
                score,
                status,
                priority,
                started_day: day,
                end_day,
            }),
        }

        if let Some(agent) = self.free_agents.get_mut(&free_agent_id) {
            agent.record_interest(team_id, score.min(1.0), day);
            if agreed {
                agent.status = FreeAgentStatus::Negotiating;
            }
        }

        if let Some(priority) = priority {
            info!(
                "verbal agreement: free agent {} with team {} (#{})",
                free_agent_id, team_id, priority
            );
            self.push_event(FreeAgencyEventKind::VerbalAgreement {
                team_id,
                free_agent_id,
                priority,
            });
        }

        Ok(status)
    }

    /// Talks terms with a free agent during legal tampering. Nothing is binding until the
    /// market opens.
    pub fn negotiate(mut self, team_id: u32, free_agent_id: u32, proposal: &ContractOffer) -> Self {
        if let Err(error) = self.apply_negotiation(team_id, free_agent_id, proposal) {
            warn!("negotiation between team {} and free agent {} ignored: {}", team_id, free_agent_id, error);
        }
        self
    }

    pub fn try_negotiate(
        &self,
        team_id: u32,
        free_agent_id: u32,
        proposal: &ContractOffer,
    ) -> Result<(Self, NegotiationStatus), FreeAgencyError> {
        let mut next = self.clone();
        let status = next.apply_negotiation(team_id, free_agent_id, proposal)?;
        Ok((next, status))
    }

    /// Turns verbal agreements into signings in the order they were reached. A player
    /// signs once; later agreements for him fall through.
    pub(crate) fn convert_verbal_agreements(&mut self) {
        let agreements: Vec<(u32, u32, ContractOffer)> = self
            .negotiations
            .agreements()
            .into_iter()
            .map(|n| (n.team_id, n.free_agent_id, n.proposal.clone()))
            .collect();

        for (team_id, free_agent_id, proposal) in agreements {
            let result = self.apply_direct_signing(team_id, free_agent_id, &proposal, SigningSource::Tampering);

            let status = match result {
                Ok(_) => NegotiationStatus::Converted,
                Err(error) => {
                    debug!(
                        "agreement between team {} and free agent {} dropped: {}",
                        team_id, free_agent_id, error
                    );
                    self.push_event(FreeAgencyEventKind::AgreementDropped { team_id, free_agent_id });
                    NegotiationStatus::Dropped
                }
            };

            if let Some(negotiation) = self.negotiations.get_mut(team_id, free_agent_id) {
                negotiation.status = status;
            }
        }

        for negotiation in self.negotiations.negotiations.iter_mut() {
            if negotiation.status == NegotiationStatus::Talking {
                negotiation.status = NegotiationStatus::Dropped;
            }
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
    use crate::config::MarketRules;
    use crate::free_agency::FreeAgencyPhase;
    use crate::league::{Player, Position};
    use crate::valuation::{MarketConditions, MarketValueCalculator};

    fn tampering_market() -> FreeAgencyState {
        let player = Player::new(10, "Edge", Position::DefensiveLine, 27, 5, 88);
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());

        FreeAgencyState::new(2024, 255_400, MarketRules::default())
            .add_free_agent(player, Some(9), value)
            .advance_phase()
    }

    #[test]
    fn fair_proposal_reaches_agreement() {
        let state = tampering_market();
        let offer = state.free_agents[&1].market_value.to_offer();

        let (state, status) = state.try_negotiate(2, 1, &offer).unwrap();
        assert_eq!(status, NegotiationStatus::VerbalAgreement);
        assert_eq!(state.free_agents[&1].status, FreeAgentStatus::Negotiating);
        assert!(state.negotiations.has_agreement(1));
    }

    #[test]
    fn lowball_keeps_talking() {
        let state = tampering_market();
        let offer = state.free_agents[&1].market_value.to_offer().scaled(0.5);

        let (_, status) = state.try_negotiate(2, 1, &offer).unwrap();
        assert_eq!(status, NegotiationStatus::Talking);
    }

    #[test]
    fn talks_outside_tampering_are_ignored() {
        let state = tampering_market().advance_phase();
        let offer = state.free_agents[&1].market_value.to_offer();

        assert_eq!(
            state.try_negotiate(2, 1, &offer).unwrap_err(),
            FreeAgencyError::NegotiationClosed {
                phase: FreeAgencyPhase::Day1Frenzy
            }
        );
    }

    #[test]
    fn earliest_agreement_wins_when_the_market_opens() {
        let state = tampering_market();
        let offer = state.free_agents[&1].market_value.to_offer();

        let state = state
            .negotiate(4, 1, &offer)
            .negotiate(2, 1, &offer.scaled(1.1))
            .advance_phase();

        assert_eq!(state.phase, FreeAgencyPhase::Day1Frenzy);
        assert_eq!(state.free_agents[&1].signed_team_id, Some(4));
        assert_eq!(state.negotiations.get(4, 1).map(|n| n.status), Some(NegotiationStatus::Converted));
        assert_eq!(state.negotiations.get(2, 1).map(|n| n.status), Some(NegotiationStatus::Dropped));
        assert_eq!(state.signings.len(), 1);
        assert_eq!(state.signings[0].source, SigningSource::Tampering);
    }
}
