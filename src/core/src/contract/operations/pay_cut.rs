use crate::contract::{ContractError, ContractIdSequence, ContractStatus, PlayerContract, minimum_salary};
use crate::league::Player;
use crate::shared::{Money, RandomSource, scale_money};
use log::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct PayCutOutcome {
    pub contract: PlayerContract,
    pub superseded: PlayerContract,
    pub old_salary: Money,
    pub new_salary: Money,
    pub ratio: f64,
    pub years_affected: Vec<i32>,
    pub total_savings: Money,
}

pub struct PayCutNegotiator;

impl PayCutNegotiator {
    /// Probability the player signs off on keeping `ratio` of his salary. Veterans near the
    /// end accept more readily; deep cuts are refused more often.
    pub fn willingness(player: &Player, ratio: f64) -> f64 {
        let age_factor = (player.age as f64 - 26.0).clamp(0.0, 8.0) * 0.05;
        let depth_factor = (ratio.clamp(0.0, 1.0) - 0.5) * 0.6;

        (0.35 + age_factor + depth_factor).clamp(0.05, 0.95)
    }

    /// Asks the player to take `new_salary` this year; future seasons scale by the same ratio.
    pub fn request(
        ids: &mut ContractIdSequence,
        contract: &PlayerContract,
        player: &Player,
        year: i32,
        new_salary: Money,
        rng: &mut impl RandomSource,
    ) -> Result<PayCutOutcome, ContractError> {
        let outcome = Self::apply(ids, contract, year, new_salary, player.experience)?;

        let willingness = Self::willingness(player, outcome.ratio);
        if !rng.chance(willingness) {
            debug!(
                "pay cut refused: player {}, ratio {:.2}, willingness {:.2}",
                player.id, outcome.ratio, willingness
            );
            return Err(ContractError::PayCutRefused);
        }

        Ok(outcome)
    }

    pub fn apply(
        ids: &mut ContractIdSequence,
        contract: &PlayerContract,
        year: i32,
        new_salary: Money,
        player_experience: u8,
    ) -> Result<PayCutOutcome, ContractError> {
        if !contract.is_active() {
            return Err(ContractError::NotActive);
        }
        if contract.years_remaining == 0 {
            return Err(ContractError::NoYearsRemaining);
        }
        if year < contract.current_year() || year > contract.nominal_end_year() {
            return Err(ContractError::YearOutsideContract { year });
        }

        let old_salary = contract.cap_savings(year);
        if new_salary >= old_salary {
            return Err(ContractError::PayCutNotLower { current: old_salary });
        }

        let minimum = minimum_salary(player_experience);
        if new_salary < minimum {
            return Err(ContractError::BelowMinimumSalary { minimum });
        }

        let ratio = new_salary as f64 / old_salary as f64;

        let mut cut = contract.clone();
        cut.id = ids.next_id();
        cut.original_contract_id = Some(contract.id);

        let mut years_affected = Vec::new();
        let mut total_savings = 0;

        for season in cut.yearly_breakdown.iter_mut().filter(|y| !y.is_void_year && y.year >= year) {
            let reduced = if season.year == year {
                new_salary
            } else if season.salary <= minimum {
                continue;
            } else {
                scale_money(season.salary, ratio).clamp(minimum, season.salary)
            };

            total_savings += season.salary - reduced;
            season.salary = reduced;
            season.recompute();
            years_affected.push(season.year);
        }

        cut.total_value -= total_savings;

        let mut superseded = contract.clone();
        superseded.status = ContractStatus::Restructured;

        info!(
            "pay cut: player {}, salary {} -> {} ({:.0}%)",
            contract.player_id,
            old_salary,
            new_salary,
            ratio * 100.0
        );

        Ok(PayCutOutcome {
            contract: cut,
            superseded,
            old_salary,
            new_salary,
            ratio,
            years_affected,
            total_savings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType};
    use crate::league::Position;
    use crate::shared::FixedRandom;

    fn contract() -> PlayerContract {
        let offer = ContractOffer::new(3, 1_000, 10_000);
        let mut ids = ContractIdSequence::default();
        ContractGenerator::create_contract(&mut ids, &offer, 8, 4, Position::WideReceiver, 2024, ContractType::Veteran)
            .unwrap()
    }

    fn veteran() -> Player {
        Player::new(8, "Veteran", Position::WideReceiver, 31, 9, 74)
    }

    #[test]
    fn scales_current_and_future_salary() {
        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = PayCutNegotiator::apply(&mut ids, &contract(), 2024, 8_000, 9).unwrap();

        assert_eq!(outcome.ratio, 0.8);
        assert_eq!(outcome.years_affected, vec![2024, 2025, 2026]);
        assert_eq!(outcome.contract.cap_savings(2025), 8_000);
        assert_eq!(outcome.total_savings, 6_000);
        assert_eq!(outcome.contract.total_value, 27_000);
        assert_eq!(outcome.contract.guaranteed_money, 3_000);
        assert!(outcome.contract.check_invariants());
    }

    #[test]
    fn seasons_near_the_minimum_never_go_up() {
        let mut uneven = contract();
        for season in uneven.yearly_breakdown.iter_mut() {
            season.salary = match season.year {
                2025 => 1_400,
                2026 => 1_000,
                _ => season.salary,
            };
            season.recompute();
        }
        uneven.total_value -= 8_600 + 9_000;

        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = PayCutNegotiator::apply(&mut ids, &uneven, 2024, 8_000, 9).unwrap();

        assert_eq!(outcome.years_affected, vec![2024, 2025]);
        assert_eq!(outcome.contract.cap_savings(2025), 1_210);
        assert_eq!(outcome.contract.cap_savings(2026), 1_000);
        assert_eq!(outcome.total_savings, 2_000 + 190);
        assert_eq!(outcome.contract.total_value, uneven.total_value - 2_190);
    }

    #[test]
    fn raise_is_not_a_pay_cut() {
        let mut ids = ContractIdSequence::starting_at(100);
        let result = PayCutNegotiator::apply(&mut ids, &contract(), 2024, 12_000, 9);
        assert_eq!(result.unwrap_err(), ContractError::PayCutNotLower { current: 10_000 });
    }

    #[test]
    fn cannot_cut_below_minimum() {
        let mut ids = ContractIdSequence::starting_at(100);
        let result = PayCutNegotiator::apply(&mut ids, &contract(), 2024, 500, 9);
        assert_eq!(result.unwrap_err(), ContractError::BelowMinimumSalary { minimum: 1_210 });
    }

    #[test]
    fn willingness_rises_with_age_and_falls_with_depth() {
        let young = Player::new(1, "Young", Position::Cornerback, 25, 3, 70);
        let old = veteran();
        assert!(PayCutNegotiator::willingness(&old, 0.8) > PayCutNegotiator::willingness(&young, 0.8));
        assert!(PayCutNegotiator::willingness(&old, 0.9) > PayCutNegotiator::willingness(&old, 0.5));
    }

    #[test]
    fn refusal_is_drawn_from_the_random_source() {
        let mut ids = ContractIdSequence::starting_at(100);
        let accepted = PayCutNegotiator::request(&mut ids, &contract(), &veteran(), 2024, 8_000, &mut FixedRandom(0.0));
        assert!(accepted.is_ok());

        let refused = PayCutNegotiator::request(&mut ids, &contract(), &veteran(), 2024, 8_000, &mut FixedRandom(1.0));
        assert_eq!(refused.unwrap_err(), ContractError::PayCutRefused);
    }
}
