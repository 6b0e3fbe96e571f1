use crate::contract::minimum_salary;
use crate::free_agency::{FreeAgencyState, FreeAgent};
use crate::league::Position;
use crate::shared::{Money, round_money};
use crate::valuation::{MarketConditions, SkillTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asking-price steps by days on the open market: (last day of the step, share of value).
const ASKING_PRICE_STEPS: [(u32, f64); 4] = [(7, 1.0), (21, 0.95), (45, 0.85), (75, 0.75)];
const STALE_ASKING_PRICE: f64 = 0.60;

const VETERAN_DISCOUNT_AGE: u8 = 32;
const LONG_TENURE_DAYS: u32 = 21;
const SATURATION_RATIO: f64 = 1.5;

pub fn asking_price_multiplier(days_on_market: u32) -> f64 {
    ASKING_PRICE_STEPS
        .iter()
        .find(|(last_day, _)| days_on_market <= *last_day)
        .map(|(_, share)| *share)
        .unwrap_or(STALE_ASKING_PRICE)
}

/// Why a player lowers his ask beyond the days-on-market decay. Only the first reason
/// that applies is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountReason {
    Age,
    MarketTenure,
    DepthTier,
    Saturation,
}

impl DiscountReason {
    pub fn multiplier(&self) -> f64 {
        match self {
            DiscountReason::Age => 0.85,
            DiscountReason::MarketTenure => 0.90,
            DiscountReason::DepthTier => 0.92,
            DiscountReason::Saturation => 0.95,
        }
    }
}

impl fmt::Display for DiscountReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DiscountReason::Age => "veteran wants a job",
            DiscountReason::MarketTenure => "long time on the market",
            DiscountReason::DepthTier => "depth player",
            DiscountReason::Saturation => "crowded position",
        };
        write!(f, "{}", reason)
    }
}

fn is_saturated(position: Position, conditions: &MarketConditions) -> bool {
    match (conditions.supply.get(&position), conditions.demand.get(&position)) {
        (Some(supply), Some(demand)) if *demand > 0 => *supply as f64 / *demand as f64 >= SATURATION_RATIO,
        _ => false,
    }
}

pub fn discount_reason(agent: &FreeAgent, conditions: &MarketConditions) -> Option<DiscountReason> {
    if agent.player.age >= VETERAN_DISCOUNT_AGE {
        Some(DiscountReason::Age)
    } else if agent.days_on_market > LONG_TENURE_DAYS {
        Some(DiscountReason::MarketTenure)
    } else if agent.market_value.tier <= SkillTier::Depth {
        Some(DiscountReason::DepthTier)
    } else if is_saturated(agent.position(), conditions) {
        Some(DiscountReason::Saturation)
    } else {
        None
    }
}

/// Current yearly ask: market value decayed by time on the market and by the first
/// discount reason, never below the player's minimum salary.
pub fn asking_aav(agent: &FreeAgent, conditions: &MarketConditions) -> Money {
    let reason = discount_reason(agent, conditions).map_or(1.0, |r| r.multiplier());
    let asking = agent.market_aav() as f64 * asking_price_multiplier(agent.days_on_market) * reason;

    round_money(asking).max(minimum_salary(agent.player.experience))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bargain {
    pub free_agent_id: u32,
    pub player_id: u32,
    pub position: Position,
    pub market_aav: Money,
    pub asking_aav: Money,
    /// Share of market value the player has come down, 0.0 to 1.0.
    pub discount: f64,
    pub reason: Option<DiscountReason>,
}

/// Available players whose ask has dropped at least `min_discount` below market value,
/// deepest discount first.
pub fn find_bargains(state: &FreeAgencyState, conditions: &MarketConditions, min_discount: f64) -> Vec<Bargain> {
    let mut bargains: Vec<Bargain> = state
        .available_free_agents()
        .filter(|a| a.market_aav() > 0)
        .map(|agent| {
            let asking = asking_aav(agent, conditions);
            Bargain {
                free_agent_id: agent.id,
                player_id: agent.player_id(),
                position: agent.position(),
                market_aav: agent.market_aav(),
                asking_aav: asking,
                discount: 1.0 - asking as f64 / agent.market_aav() as f64,
                reason: discount_reason(agent, conditions),
            }
        })
        .filter(|b| b.discount >= min_discount)
        .collect();

    bargains.sort_by(|a, b| {
        b.discount
            .total_cmp(&a.discount)
            .then(a.free_agent_id.cmp(&b.free_agent_id))
    });
    bargains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketRules;
    use crate::league::Player;
    use crate::valuation::MarketValueCalculator;

    fn agent(age: u8, rating: u8, days: u32) -> FreeAgent {
        let player = Player::new(1, "Agent", Position::WideReceiver, age, 6, rating);
        let value = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        let mut agent = FreeAgent::new(1, player, Some(3), value);
        agent.days_on_market = days;
        agent
    }

    #[test]
    fn asking_price_steps_down() {
        assert_eq!(asking_price_multiplier(0), 1.0);
        assert_eq!(asking_price_multiplier(7), 1.0);
        assert_eq!(asking_price_multiplier(8), 0.95);
        assert_eq!(asking_price_multiplier(21), 0.95);
        assert_eq!(asking_price_multiplier(45), 0.85);
        assert_eq!(asking_price_multiplier(75), 0.75);
        assert_eq!(asking_price_multiplier(76), 0.60);
    }

    #[test]
    fn age_discount_wins_over_tenure() {
        let conditions = MarketConditions::new();
        assert_eq!(discount_reason(&agent(33, 85, 40), &conditions), Some(DiscountReason::Age));
        assert_eq!(
            discount_reason(&agent(27, 85, 40), &conditions),
            Some(DiscountReason::MarketTenure)
        );
        assert_eq!(discount_reason(&agent(27, 85, 3), &conditions), None);
    }

    #[test]
    fn crowded_position_discount() {
        let conditions = MarketConditions::new()
            .with_supply(Position::WideReceiver, 9)
            .with_demand(Position::WideReceiver, 4);
        assert_eq!(
            discount_reason(&agent(27, 85, 3), &conditions),
            Some(DiscountReason::Saturation)
        );
    }

    #[test]
    fn asking_price_never_below_minimum() {
        let stale = agent(34, 45, 120);
        assert_eq!(asking_aav(&stale, &MarketConditions::new()), minimum_salary(6));
    }

    #[test]
    fn bargains_sorted_by_discount() {
        let conditions = MarketConditions::new();
        let mut state = FreeAgencyState::new(2024, 255_400, MarketRules::default());
        for (id, age) in [(1, 27), (2, 33), (3, 28)] {
            let player = Player::new(id, "Agent", Position::Linebacker, age, 6, 84);
            let value = MarketValueCalculator::calculate(&player, 2024, &conditions);
            state = state.add_free_agent(player, Some(3), value);
        }

        let bargains = find_bargains(&state, &conditions, 0.10);
        assert_eq!(bargains.len(), 1);
        assert_eq!(bargains[0].player_id, 2);
        assert_eq!(bargains[0].reason, Some(DiscountReason::Age));
    }
}
