use crate::contract::{ContractCutter, CutType, PlayerContract};
use crate::shared::{CurrencyFormatter, Money};
use serde::{Deserialize, Serialize};

/// Presentation view of a contract in a given league year. The `*_display` strings are
/// rendered verbatim by the front-office screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub contract_id: u32,
    pub player_id: u32,
    pub year: i32,
    pub years_remaining: u8,
    pub aav: Money,
    pub total_value: Money,
    pub guaranteed_money: Money,
    pub current_cap_hit: Money,
    pub dead_money_if_cut: Money,
    pub savings_if_cut: Money,
    pub aav_display: String,
    pub total_value_display: String,
    pub guaranteed_display: String,
    pub cap_hit_display: String,
    pub dead_money_display: String,
    pub savings_display: String,
    pub recommendation: String,
}

impl ContractSummary {
    pub fn new(contract: &PlayerContract, year: i32) -> Self {
        let aav = contract.aav();
        let current_cap_hit = contract.cap_hit_for_year(year);
        let dead_money_if_cut = contract.dead_money(year);
        let savings_if_cut = current_cap_hit - dead_money_if_cut;

        ContractSummary {
            contract_id: contract.id,
            player_id: contract.player_id,
            year,
            years_remaining: contract.years_remaining,
            aav,
            total_value: contract.total_value,
            guaranteed_money: contract.guaranteed_money,
            current_cap_hit,
            dead_money_if_cut,
            savings_if_cut,
            aav_display: CurrencyFormatter::format(aav),
            total_value_display: CurrencyFormatter::format(contract.total_value),
            guaranteed_display: CurrencyFormatter::format(contract.guaranteed_money),
            cap_hit_display: CurrencyFormatter::format(current_cap_hit),
            dead_money_display: CurrencyFormatter::format(dead_money_if_cut),
            savings_display: CurrencyFormatter::format_signed(savings_if_cut),
            recommendation: Self::recommendation(contract, year),
        }
    }

    fn recommendation(contract: &PlayerContract, year: i32) -> String {
        if !contract.is_active() {
            return "Contract is no longer active".to_string();
        }

        let cut = ContractCutter::recommend(contract, year);
        let best = match cut.cut_type {
            CutType::Standard => &cut.standard,
            _ => &cut.post_june_1,
        };

        if contract.dead_money(year) == 0 && best.net_cap_change > 0 {
            format!(
                "No guaranteed money left; releasing clears {}",
                CurrencyFormatter::format(best.net_cap_change)
            )
        } else if best.total_cap_savings <= 0 {
            if contract.years_remaining == 1 {
                "Final year; extend or let walk".to_string()
            } else {
                format!(
                    "Keep; releasing would add {} in dead money",
                    CurrencyFormatter::format(contract.dead_money(year))
                )
            }
        } else {
            cut.reason
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType};
    use crate::league::Position;

    #[test]
    fn summary_formats_money() {
        let offer = ContractOffer::new(4, 12_500, 7_500);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 1, 10, Position::Quarterback, 2024, ContractType::Veteran)
                .unwrap();
        let summary = ContractSummary::new(&contract, 2024);

        assert_eq!(summary.aav_display, "$20.0M");
        assert_eq!(summary.guaranteed_display, "$50.0M");
        assert_eq!(summary.dead_money_display, "$50.0M");
        assert_eq!(summary.savings_if_cut, -30_000);
        assert_eq!(summary.savings_display, "-$30.0M");
        assert!(summary.recommendation.starts_with("Keep"));
    }

    #[test]
    fn salary_only_deal_is_a_release_candidate() {
        let offer = ContractOffer::new(2, 0, 4_000);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 2, 10, Position::Linebacker, 2024, ContractType::Veteran)
                .unwrap();
        let summary = ContractSummary::new(&contract, 2024);

        assert_eq!(summary.savings_display, "+$4.0M");
        assert!(summary.recommendation.starts_with("No guaranteed money left"));
    }
}
