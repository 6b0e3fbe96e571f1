use crate::contract::{ContractOffer, FranchiseTagger, minimum_salary};
use crate::league::{Player, Position};
use crate::shared::{Money, round_money};
use crate::valuation::{AgeCurve, MarketConditions, SkillTier};
use log::debug;
use serde::{Deserialize, Serialize};

/// Projected contract a free agent can expect on the open market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketValuation {
    pub player_id: u32,
    pub position: Position,
    pub tier: SkillTier,
    pub aav: Money,
    pub years: u8,
    pub guarantee_pct: f64,
    pub total_value: Money,
    pub guaranteed_money: Money,
}

impl MarketValuation {
    /// Canonical offer shape at exactly market value.
    pub fn to_offer(&self) -> ContractOffer {
        let bonus_per_year = round_money(self.aav as f64 * self.guarantee_pct).min(self.aav);
        ContractOffer::new(self.years.max(1), bonus_per_year, self.aav - bonus_per_year)
    }
}

pub struct MarketValueCalculator;

impl MarketValueCalculator {
    pub fn calculate(player: &Player, year: i32, conditions: &MarketConditions) -> MarketValuation {
        let tier = SkillTier::from_rating(player.rating);
        let curve = AgeCurve::for_group(player.position.group());

        let tag_value = FranchiseTagger::franchise_tag_value(player.position, year) as f64;
        let base_value = tag_value * position_multiplier(player.position) * tier.tag_share(player.rating);

        let value = base_value * curve.multiplier(player.age) * conditions.multiplier(player.position);
        let aav = round_money(value).max(minimum_salary(player.experience));

        let years = tier.contract_years(player.age, curve.peak_age);
        let guarantee_pct = tier.guarantee_pct(player.age, curve.peak_age);
        let total_value = aav * years as Money;

        debug!(
            "market value: player {} ({}, {}, age {}), aav {}, {} years",
            player.id, player.position, tier, player.age, aav, years
        );

        MarketValuation {
            player_id: player.id,
            position: player.position,
            tier,
            aav,
            years,
            guarantee_pct,
            total_value,
            guaranteed_money: round_money(total_value as f64 * guarantee_pct),
        }
    }
}

/// Premium the open market pays over the tag share at each position.
pub fn position_multiplier(position: Position) -> f64 {
    match position {
        Position::Quarterback => 1.05,
        Position::RunningBack => 0.90,
        Position::TightEnd => 0.95,
        Position::Kicker | Position::Punter => 0.85,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value(position: Position, age: u8, rating: u8) -> Money {
        let player = Player::new(1, "Test", position, age, 5, rating);
        MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new()).aav
    }

    #[test]
    fn elite_quarterback_outearns_elite_back() {
        assert!(value(Position::Quarterback, 27, 95) > value(Position::RunningBack, 25, 95));
    }

    #[test]
    fn replacement_players_get_the_minimum() {
        assert_eq!(value(Position::Safety, 28, 10), minimum_salary(5));
    }

    #[test]
    fn offer_matches_valuation() {
        let player = Player::new(4, "Edge", Position::DefensiveLine, 27, 5, 86);
        let valuation = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        let offer = valuation.to_offer();

        assert_eq!(offer.aav(), valuation.aav);
        assert_eq!(offer.years, valuation.years);
        assert_eq!(offer.total_value(), valuation.total_value);
    }

    #[test]
    fn scarcity_raises_value() {
        let player = Player::new(4, "Corner", Position::Cornerback, 26, 4, 82);
        let neutral = MarketValueCalculator::calculate(&player, 2024, &MarketConditions::new());
        let scarce = MarketValueCalculator::calculate(
            &player,
            2024,
            &MarketConditions::new()
                .with_supply(Position::Cornerback, 1)
                .with_demand(Position::Cornerback, 3),
        );
        assert!(scarce.aav > neutral.aav);
    }

    proptest! {
        #[test]
        fn value_never_drops_as_rating_rises(
            index in 0usize..Position::ALL.len(),
            age in 21u8..38,
            rating in 0u8..100,
            bump in 1u8..20,
        ) {
            let position = Position::ALL[index];
            let higher = rating.saturating_add(bump).min(100);
            prop_assert!(value(position, age, higher) >= value(position, age, rating));
        }

        #[test]
        fn value_never_rises_with_age_past_peak(
            index in 0usize..Position::ALL.len(),
            years_past_peak in 0u8..8,
            older_by in 1u8..6,
            rating in 40u8..=100,
        ) {
            let position = Position::ALL[index];
            let age = AgeCurve::for_group(position.group()).peak_age + years_past_peak;
            prop_assert!(value(position, age + older_by, rating) <= value(position, age, rating));
        }
    }
}
