use crate::contract::{
    ContractError, ContractIdSequence, ContractStatus, ContractType, ContractYear, PlayerContract, prorate,
};
use crate::shared::{CurrencyFormatter, Money};
use log::info;
use serde::{Deserialize, Serialize};

pub const MAX_EXTENSION_YEARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionTerms {
    pub new_years: u8,
    /// New guaranteed dollars, prorated over the remaining and added seasons.
    pub signing_bonus: Money,
    pub salary_per_year: Money,
    pub no_trade_clause: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionOutcome {
    pub contract: PlayerContract,
    pub superseded: PlayerContract,
    pub new_money: Money,
    pub bonus_proration: Money,
    pub current_year_cap_change: Money,
    pub new_years_aav: Money,
}

pub struct ContractExtender;

impl ContractExtender {
    pub fn extend(
        ids: &mut ContractIdSequence,
        contract: &PlayerContract,
        year: i32,
        terms: &ExtensionTerms,
    ) -> Result<ExtensionOutcome, ContractError> {
        if !contract.is_active() {
            return Err(ContractError::NotActive);
        }
        if contract.years_remaining == 0 {
            return Err(ContractError::NoYearsRemaining);
        }
        if terms.new_years == 0 || terms.new_years > MAX_EXTENSION_YEARS {
            return Err(ContractError::InvalidExtensionLength {
                max: MAX_EXTENSION_YEARS,
            });
        }
        if terms.signing_bonus < 0 || terms.salary_per_year <= 0 {
            return Err(ContractError::NonPositiveAmount);
        }
        if year < contract.current_year() || year > contract.nominal_end_year() {
            return Err(ContractError::YearOutsideContract { year });
        }

        let remaining_seasons: Vec<i32> = contract
            .yearly_breakdown
            .iter()
            .filter(|y| !y.is_void_year && y.year >= year)
            .map(|y| y.year)
            .collect();

        let shares = prorate(terms.signing_bonus, remaining_seasons.len() + terms.new_years as usize);
        let nominal_end = contract.nominal_end_year();

        let mut extended = contract.clone();
        extended.id = ids.next_id();
        extended.original_contract_id = Some(contract.id);
        extended.contract_type = ContractType::Extension;
        extended.has_no_trade_clause |= terms.no_trade_clause;

        for (season_year, share) in remaining_seasons.iter().zip(shares.iter()) {
            if let Some(season) = extended.yearly_breakdown.iter_mut().find(|y| y.year == *season_year) {
                season.bonus += share;
                season.recompute();
            }
        }

        for (offset, share) in shares[remaining_seasons.len()..].iter().enumerate() {
            let season_year = nominal_end + 1 + offset as i32;

            // A void year already sitting on this season becomes a real one.
            match extended.yearly_breakdown.iter_mut().find(|y| y.year == season_year) {
                Some(season) => {
                    season.is_void_year = false;
                    season.bonus += share;
                    season.salary = terms.salary_per_year;
                    season.recompute();
                }
                None => extended
                    .yearly_breakdown
                    .push(ContractYear::new(season_year, *share, terms.salary_per_year)),
            }
        }

        extended.total_years += terms.new_years;
        extended.years_remaining += terms.new_years;
        extended.total_value += terms.signing_bonus + terms.salary_per_year * terms.new_years as Money;
        extended.guaranteed_money += terms.signing_bonus;
        extended.sort_breakdown();

        let mut superseded = contract.clone();
        superseded.status = ContractStatus::Restructured;

        let new_money = terms.signing_bonus + terms.salary_per_year * terms.new_years as Money;
        let current_year_cap_change = shares.first().copied().unwrap_or(0);

        info!(
            "extension: player {}, +{} years, new money {}",
            contract.player_id,
            terms.new_years,
            CurrencyFormatter::format(new_money)
        );

        Ok(ExtensionOutcome {
            contract: extended,
            superseded,
            new_money,
            bonus_proration: current_year_cap_change,
            current_year_cap_change,
            new_years_aav: new_money / terms.new_years as Money,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::operations::{ContractRestructurer, RestructureRequest};
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer};
    use crate::league::Position;

    fn contract() -> PlayerContract {
        let offer = ContractOffer::new(2, 3_000, 9_000);
        let mut ids = ContractIdSequence::default();
        ContractGenerator::create_contract(&mut ids, &offer, 3, 6, Position::Cornerback, 2024, ContractType::Veteran)
            .unwrap()
    }

    fn terms(new_years: u8) -> ExtensionTerms {
        ExtensionTerms {
            new_years,
            signing_bonus: 20_000,
            salary_per_year: 12_000,
            no_trade_clause: false,
        }
    }

    #[test]
    fn appends_years_after_nominal_end() {
        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = ContractExtender::extend(&mut ids, &contract(), 2024, &terms(3)).unwrap();
        let extended = &outcome.contract;

        assert_eq!(extended.total_years, 5);
        assert_eq!(extended.years_remaining, 5);
        assert_eq!(extended.nominal_end_year(), 2028);
        assert_eq!(extended.year(2026).unwrap().salary, 12_000);
        assert_eq!(extended.year(2026).unwrap().bonus, 4_000);
        assert_eq!(outcome.current_year_cap_change, 4_000);
        assert_eq!(extended.cap_hit_for_year(2024), 16_000);
        assert_eq!(extended.guaranteed_money, 26_000);
        assert_eq!(extended.total_value, 24_000 + 20_000 + 36_000);
        assert_eq!(extended.contract_type, ContractType::Extension);
        assert!(extended.check_invariants());
    }

    #[test]
    fn void_years_inside_the_new_term_become_real() {
        let mut ids = ContractIdSequence::starting_at(100);
        let restructured = ContractRestructurer::restructure(
            &mut ids,
            &contract(),
            &RestructureRequest {
                year: 2024,
                amount: 3_000,
                void_years: 1,
                player_experience: 6,
            },
        )
        .unwrap()
        .contract;
        assert_eq!(restructured.void_years, 1);

        let outcome = ContractExtender::extend(&mut ids, &restructured, 2024, &terms(2)).unwrap();
        let extended = &outcome.contract;

        assert_eq!(extended.void_years, 0);
        assert_eq!(extended.yearly_breakdown.len(), 4);
        assert!(!extended.year(2026).unwrap().is_void_year);
        assert!(extended.check_invariants());
    }

    #[test]
    fn rejects_out_of_range_length() {
        let mut ids = ContractIdSequence::starting_at(100);
        assert_eq!(
            ContractExtender::extend(&mut ids, &contract(), 2024, &terms(0)).unwrap_err(),
            ContractError::InvalidExtensionLength { max: 5 }
        );
        assert_eq!(
            ContractExtender::extend(&mut ids, &contract(), 2024, &terms(6)).unwrap_err(),
            ContractError::InvalidExtensionLength { max: 5 }
        );
    }
}
