use crate::contract::{
    ContractError, ContractIdSequence, ContractStatus, ContractYear, PlayerContract, minimum_salary, prorate,
};
use crate::shared::{CurrencyFormatter, Money};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestructureRequest {
    pub year: i32,
    pub amount: Money,
    pub void_years: u8,
    pub player_experience: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestructureOutcome {
    pub contract: PlayerContract,
    pub superseded: PlayerContract,
    pub amount_converted: Money,
    pub first_year_proration: Money,
    pub current_year_savings: Money,
    pub void_years_added: u8,
    /// Dollars newly exposed as future dead money.
    pub dead_money_risk: Money,
}

pub struct ContractRestructurer;

impl ContractRestructurer {
    /// Salary above the player's minimum that can be turned into bonus in `year`.
    pub fn max_amount(contract: &PlayerContract, year: i32, player_experience: u8) -> Money {
        match contract.year(year) {
            Some(season) if !season.is_void_year => (season.salary - minimum_salary(player_experience)).max(0),
            _ => 0,
        }
    }

    /// Converts salary into bonus and spreads it over the remaining seasons plus any
    /// added void years.
    pub fn restructure(
        ids: &mut ContractIdSequence,
        contract: &PlayerContract,
        request: &RestructureRequest,
    ) -> Result<RestructureOutcome, ContractError> {
        if !contract.is_active() {
            return Err(ContractError::NotActive);
        }
        if contract.years_remaining == 0 {
            return Err(ContractError::NoYearsRemaining);
        }
        if request.amount <= 0 {
            return Err(ContractError::NonPositiveAmount);
        }

        let year = request.year;
        if year < contract.current_year() || year > contract.nominal_end_year() {
            return Err(ContractError::YearOutsideContract { year });
        }

        let max = Self::max_amount(contract, year, request.player_experience);
        if request.amount > max {
            return Err(ContractError::ExceedsRestructureMaximum { max });
        }

        let remaining_seasons: Vec<i32> = contract
            .yearly_breakdown
            .iter()
            .filter(|y| !y.is_void_year && y.year >= year)
            .map(|y| y.year)
            .collect();

        let shares = prorate(request.amount, remaining_seasons.len() + request.void_years as usize);
        let first_year_proration = shares[0];

        let mut restructured = contract.clone();
        restructured.id = ids.next_id();
        restructured.original_contract_id = Some(contract.id);

        for (season_year, share) in remaining_seasons.iter().zip(shares.iter()) {
            if let Some(season) = restructured.yearly_breakdown.iter_mut().find(|y| y.year == *season_year) {
                season.bonus += share;
                if season.year == year {
                    season.salary -= request.amount;
                }
                season.recompute();
            }
        }

        let last_year = contract.yearly_breakdown.iter().map(|y| y.year).max().unwrap_or(year);
        for (offset, share) in shares[remaining_seasons.len()..].iter().enumerate() {
            restructured
                .yearly_breakdown
                .push(ContractYear::void(last_year + 1 + offset as i32, *share));
        }

        restructured.guaranteed_money += request.amount;
        restructured.sort_breakdown();

        let mut superseded = contract.clone();
        superseded.status = ContractStatus::Restructured;

        let current_year_savings = request.amount - first_year_proration;

        info!(
            "restructure: player {}, converted {}, saves {} in {}, {} void years",
            contract.player_id,
            CurrencyFormatter::format(request.amount),
            CurrencyFormatter::format(current_year_savings),
            year,
            request.void_years
        );

        Ok(RestructureOutcome {
            contract: restructured,
            superseded,
            amount_converted: request.amount,
            first_year_proration,
            current_year_savings,
            void_years_added: request.void_years,
            dead_money_risk: request.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType};
    use crate::league::Position;

    fn contract() -> PlayerContract {
        let offer = ContractOffer::new(4, 2_000, 15_000);
        let mut ids = ContractIdSequence::default();
        ContractGenerator::create_contract(&mut ids, &offer, 4, 9, Position::DefensiveLine, 2024, ContractType::Veteran)
            .unwrap()
    }

    fn request(amount: Money, void_years: u8) -> RestructureRequest {
        RestructureRequest {
            year: 2024,
            amount,
            void_years,
            player_experience: 8,
        }
    }

    #[test]
    fn converts_evenly_over_remaining_years() {
        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = ContractRestructurer::restructure(&mut ids, &contract(), &request(10_000, 0)).unwrap();

        assert_eq!(outcome.first_year_proration, 2_500);
        assert_eq!(outcome.current_year_savings, 7_500);
        assert_eq!(outcome.contract.cap_hit_for_year(2024), 17_000 - 7_500);
        assert_eq!(outcome.contract.cap_hit_for_year(2025), 17_000 + 2_500);
        assert_eq!(outcome.contract.guaranteed_money, 18_000);
        assert_eq!(outcome.contract.total_value, contract().total_value);
        assert_eq!(outcome.dead_money_risk, 10_000);
        assert!(outcome.contract.check_invariants());
    }

    #[test]
    fn void_years_extend_the_window_not_the_term() {
        let original = contract();
        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = ContractRestructurer::restructure(&mut ids, &original, &request(12_000, 2)).unwrap();
        let restructured = &outcome.contract;

        assert_eq!(outcome.first_year_proration, 2_000);
        assert_eq!(outcome.current_year_savings, 10_000);
        assert_eq!(restructured.void_years, 2);
        assert_eq!(restructured.total_years, 4);
        assert_eq!(restructured.years_remaining, 4);
        assert_eq!(restructured.nominal_end_year(), 2027);
        assert_eq!(restructured.yearly_breakdown.len(), 6);

        let void_year = restructured.year(2029).unwrap();
        assert!(void_year.is_void_year);
        assert_eq!(void_year.salary, 0);
        assert_eq!(void_year.bonus, 2_000);
        assert!(restructured.dead_money(2028) > 0);
        assert!(restructured.check_invariants());
    }

    #[test]
    fn superseded_contract_is_marked() {
        let original = contract();
        let mut ids = ContractIdSequence::starting_at(100);
        let outcome = ContractRestructurer::restructure(&mut ids, &original, &request(5_000, 0)).unwrap();
        assert_eq!(outcome.superseded.status, ContractStatus::Restructured);
        assert_eq!(outcome.contract.original_contract_id, Some(original.id));
        assert_ne!(outcome.contract.id, original.id);
    }

    #[test]
    fn amount_above_maximum_is_refused() {
        let mut ids = ContractIdSequence::starting_at(100);
        let result = ContractRestructurer::restructure(&mut ids, &contract(), &request(14_000, 0));
        let error = result.unwrap_err();
        assert_eq!(error, ContractError::ExceedsRestructureMaximum { max: 13_790 });
        assert_eq!(error.to_string(), "Maximum restructure amount is $13.8M");
    }

    #[test]
    fn non_positive_amount_is_refused() {
        let mut ids = ContractIdSequence::starting_at(100);
        let result = ContractRestructurer::restructure(&mut ids, &contract(), &request(0, 0));
        assert_eq!(result.unwrap_err(), ContractError::NonPositiveAmount);
    }
}
