use crate::cap::SalaryCapState;
use crate::shared::{CurrencyFormatter, Money, round_money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapProjection {
    pub year: i32,
    pub salary_cap: Money,
    pub committed: Money,
    pub dead_money: Money,
    pub cap_space: Money,
    pub contracts: usize,
}

pub struct CapProjector;

impl CapProjector {
    /// Projects `years` league years starting with the current one. Future caps grow from
    /// the baseline at `growth_rate`; rollover is only known for the current year.
    pub fn project(state: &SalaryCapState, years: u8, growth_rate: f64) -> Vec<CapProjection> {
        (0..years as i32)
            .map(|offset| {
                let year = state.current_year + offset;
                let salary_cap = if offset == 0 {
                    state.salary_cap
                } else {
                    round_money(state.baseline_cap as f64 * (1.0 + growth_rate).powi(offset))
                };

                let committed = state.committed(year);
                let dead_money = state.dead_money(year);

                CapProjection {
                    year,
                    salary_cap,
                    committed,
                    dead_money,
                    cap_space: salary_cap - committed - dead_money,
                    contracts: state.active_contracts().filter(|c| c.cap_hit_for_year(year) > 0).count(),
                }
            })
            .collect()
    }
}

/// Presentation view of a team's cap sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapSummary {
    pub team_id: u32,
    pub year: i32,
    pub salary_cap: Money,
    pub cap_usage: Money,
    pub top51_usage: Money,
    pub dead_money: Money,
    pub cap_space: Money,
    pub rollover: Money,
    pub contracts: usize,
    pub salary_cap_display: String,
    pub cap_usage_display: String,
    pub dead_money_display: String,
    pub cap_space_display: String,
}

impl CapSummary {
    pub fn new(state: &SalaryCapState) -> Self {
        let year = state.current_year;
        let cap_usage = state.cap_usage(year);
        let dead_money = state.dead_money(year);
        let cap_space = state.salary_cap - cap_usage;

        CapSummary {
            team_id: state.team_id,
            year,
            salary_cap: state.salary_cap,
            cap_usage,
            top51_usage: state.offseason_cap_usage(),
            dead_money,
            cap_space,
            rollover: state.rollover,
            contracts: state.active_contracts().count(),
            salary_cap_display: CurrencyFormatter::format(state.salary_cap),
            cap_usage_display: CurrencyFormatter::format(cap_usage),
            dead_money_display: CurrencyFormatter::format(dead_money),
            cap_space_display: CurrencyFormatter::format_signed(cap_space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::{CapPenalty, PenaltyReason};
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType};
    use crate::league::Position;

    fn state() -> SalaryCapState {
        let offer = ContractOffer::new(3, 5_000, 15_000);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 1, 4, Position::Cornerback, 2024, ContractType::Veteran)
                .unwrap();

        SalaryCapState::new(4, 2024, 200_000)
            .with_rollover(10_000)
            .sign_contract(contract)
            .add_penalty(CapPenalty::new(7, PenaltyReason::Cut, 2_000, 2025, 2024))
    }

    #[test]
    fn projection_grows_the_baseline() {
        let projection = CapProjector::project(&state(), 4, 0.07);

        assert_eq!(projection.len(), 4);
        assert_eq!(projection[0].salary_cap, 210_000);
        assert_eq!(projection[1].salary_cap, 214_000);
        assert_eq!(projection[1].dead_money, 2_000);
        assert_eq!(projection[1].cap_space, 214_000 - 20_000 - 2_000);
        assert_eq!(projection[3].committed, 0);
        assert_eq!(projection[3].contracts, 0);
    }

    #[test]
    fn summary_formats_space() {
        let summary = CapSummary::new(&state());
        assert_eq!(summary.cap_usage, 20_000);
        assert_eq!(summary.cap_space_display, "+$190.0M");
        assert_eq!(summary.salary_cap_display, "$210.0M");
    }
}
