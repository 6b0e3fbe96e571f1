use crate::ai::{NeedLevel, TeamNeeds, TeamPersonality, TeamStrategy};
use crate::contract::{ContractOffer, minimum_salary};
use crate::free_agency::{BiddingWar, FreeAgencyState, FreeAgent};
use crate::shared::{Money, RandomSource, round_money};
use crate::valuation::{SkillTier, position_multiplier};
use log::debug;
use serde::{Deserialize, Serialize};

/// Amount a competing offer has to be beaten by.
const OUTBID_MARGIN: f64 = 1.05;

/// A team's decision to pursue one free agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEvaluation {
    pub team_id: u32,
    pub free_agent_id: u32,
    pub need: NeedLevel,
    pub offer: ContractOffer,
    /// What the team thinks the player is worth per year.
    pub valuation_aav: Money,
}

pub fn evaluate_free_agent(
    team_id: u32,
    agent: &FreeAgent,
    asking_aav: Money,
    needs: &TeamNeeds,
    personality: &TeamPersonality,
    budget_remaining: Money,
) -> Option<OfferEvaluation> {
    let need = needs.level(agent.position());
    if need == NeedLevel::None {
        return None;
    }

    if agent.player.age > personality.max_age {
        return None;
    }

    // contenders only pay for depth when the hole is critical
    if personality.strategy == TeamStrategy::WinNow && agent.market_value.tier < SkillTier::Rotational && need < NeedLevel::Critical {
        return None;
    }

    let factor = personality.value_premium * position_multiplier(agent.position()) * need.offer_multiplier();
    let aav = round_money(asking_aav as f64 * factor).max(minimum_salary(agent.player.experience));
    if aav > budget_remaining {
        debug!(
            "team {} passes on free agent {}: {} over budget {}",
            team_id, agent.id, aav, budget_remaining
        );
        return None;
    }

    let bonus_per_year = round_money(aav as f64 * agent.market_value.guarantee_pct).min(aav);
    let offer = ContractOffer::new(agent.market_value.years.max(1), bonus_per_year, aav - bonus_per_year);

    debug!(
        "team {} values free agent {} ({:?} need) at {} per year",
        team_id, agent.id, need, aav
    );

    Some(OfferEvaluation {
        team_id,
        free_agent_id: agent.id,
        need,
        offer,
        valuation_aav: aav,
    })
}

/// Raises `offer` to beat a competing one. Returns `None` when that would take the team
/// past what its risk tolerance allows.
pub fn escalate_offer(
    offer: &ContractOffer,
    competing_aav: Money,
    valuation_aav: Money,
    personality: &TeamPersonality,
) -> Option<ContractOffer> {
    let target = round_money(competing_aav as f64 * OUTBID_MARGIN);
    if target <= offer.aav() {
        return Some(offer.clone());
    }

    let ceiling = round_money(valuation_aav as f64 * personality.escalation_ceiling());
    if target > ceiling || offer.aav() <= 0 {
        return None;
    }

    Some(offer.scaled(target as f64 / offer.aav() as f64))
}

/// One bidding war participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Bidder {
    pub team_id: u32,
    pub valuation_aav: Money,
    pub personality: TeamPersonality,
}

/// Whether `bidder` tops the current high bid. Below its valuation a team always bids; past
/// it the odds fall off toward the risk ceiling.
pub fn should_continue_bidding(
    war: &BiddingWar,
    bidder: &Bidder,
    budget_remaining: Money,
    rng: &mut impl RandomSource,
) -> bool {
    let next_aav = war.next_bid().aav();
    if next_aav > budget_remaining {
        return false;
    }

    let ceiling = round_money(bidder.valuation_aav as f64 * bidder.personality.escalation_ceiling());
    if next_aav > ceiling {
        return false;
    }
    if next_aav <= bidder.valuation_aav {
        return true;
    }

    let headroom = (ceiling - next_aav) as f64 / (ceiling - bidder.valuation_aav) as f64;
    rng.chance(bidder.personality.risk_tolerance * headroom)
}

/// Plays an open bidding war to the end and signs the winner.
pub fn run_bidding_war(
    mut state: FreeAgencyState,
    free_agent_id: u32,
    bidders: &[Bidder],
    rng: &mut impl RandomSource,
) -> FreeAgencyState {
    while let Some(war) = state.bidding_wars.get(&free_agent_id).filter(|w| w.is_active) {
        for team_id in war.challengers() {
            let current = match state.bidding_wars.get(&free_agent_id) {
                Some(current) if current.is_active => current.clone(),
                _ => break,
            };
            if current.current_high_bidder == team_id {
                continue;
            }

            let budget = state.budget_remaining(team_id).unwrap_or(Money::MAX);
            let bids = bidders
                .iter()
                .find(|b| b.team_id == team_id)
                .is_some_and(|b| should_continue_bidding(&current, b, budget, rng));

            state = if bids {
                match state.try_place_bid(free_agent_id, team_id, current.next_bid()) {
                    Ok(next) => next,
                    Err(error) => {
                        debug!("team {} drops out: {}", team_id, error);
                        state.pass_bid(free_agent_id, team_id)
                    }
                }
            } else {
                state.pass_bid(free_agent_id, team_id)
            };
        }
    }

    state.close_bidding_war(free_agent_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::assess_team_needs;
    use crate::cap::SalaryCapState;
    use crate::config::MarketRules;
    use crate::free_agency::{FreeAgencyPhase, SigningSource};
    use crate::league::{Player, Position};
    use crate::shared::FixedRandom;
    use crate::valuation::{MarketConditions, MarketValueCalculator};

    fn agent(age: u8, rating: u8) -> FreeAgent {
        let player = Player::new(1, "Corner", Position::Cornerback, age, 5, rating);
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        FreeAgent::new(1, player, Some(9), value)
    }

    fn empty_team_needs() -> TeamNeeds {
        assess_team_needs(1, &[], &SalaryCapState::new(1, 2024, 255_400))
    }

    #[test]
    fn offer_scales_with_need_and_premium() {
        let agent = agent(26, 84);
        let personality = TeamPersonality::for_strategy(TeamStrategy::Balanced);

        let evaluation = evaluate_free_agent(1, &agent, 10_000, &empty_team_needs(), &personality, 50_000).unwrap();

        assert_eq!(evaluation.need, NeedLevel::Critical);
        assert_eq!(evaluation.offer.aav(), 11_500);
        assert_eq!(evaluation.offer.years, agent.market_value.years);
    }

    #[test]
    fn gates_on_age_and_budget() {
        let personality = TeamPersonality::for_strategy(TeamStrategy::Rebuild);
        let needs = empty_team_needs();

        assert!(evaluate_free_agent(1, &agent(31, 84), 10_000, &needs, &personality, 50_000).is_none());
        assert!(evaluate_free_agent(1, &agent(25, 84), 10_000, &needs, &personality, 5_000).is_none());
    }

    #[test]
    fn escalation_stops_at_risk_ceiling() {
        let offer = ContractOffer::new(3, 4_000, 6_000);
        let cautious = TeamPersonality::for_strategy(TeamStrategy::Rebuild);
        let bold = TeamPersonality::for_strategy(TeamStrategy::WinNow);

        assert!(escalate_offer(&offer, 11_000, 10_000, &cautious).is_none());
        let raised = escalate_offer(&offer, 11_000, 10_000, &bold).unwrap();
        assert_eq!(raised.aav(), 11_550);
        assert_eq!(escalate_offer(&offer, 9_000, 10_000, &cautious), Some(offer));
    }

    #[test]
    fn richer_valuation_wins_the_war() {
        let mut state = FreeAgencyState::new(2024, 255_400, MarketRules::default());
        let player = Player::new(1, "Edge", Position::DefensiveLine, 27, 6, 90);
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        state = state.add_free_agent(player, Some(9), value);
        while state.phase < FreeAgencyPhase::Day1Frenzy {
            state = state.advance_phase();
        }

        let opening = ContractOffer::new(4, 5_000, 5_000).to_terms();
        let state = state.start_bidding_war(1, vec![2, 3], 2, opening);

        let balanced = TeamPersonality::for_strategy(TeamStrategy::Balanced).with_risk_tolerance(0.0);
        let bidders = vec![
            Bidder {
                team_id: 2,
                valuation_aav: 10_600,
                personality: balanced.clone(),
            },
            Bidder {
                team_id: 3,
                valuation_aav: 20_000,
                personality: balanced,
            },
        ];

        let state = run_bidding_war(state, 1, &bidders, &mut FixedRandom(0.5));

        assert_eq!(state.signings.len(), 1);
        assert_eq!(state.signings[0].team_id, 3);
        assert_eq!(state.signings[0].source, SigningSource::BiddingWar);
        assert!(!state.bidding_wars[&1].is_active);
    }
}
