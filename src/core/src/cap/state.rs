use crate::cap::{CapPenalty, PenaltyReason};
use crate::contract::{CutOutcome, CutType, PlayerContract};
use crate::shared::{CurrencyFormatter, Money};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cap hits counted during the offseason.
pub const OFFSEASON_ACCOUNTING_SLOTS: usize = 51;

/// One team's cap ledger for a league year. `salary_cap` is always `baseline_cap + rollover`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryCapState {
    pub team_id: u32,
    pub current_year: i32,
    pub salary_cap: Money,
    pub baseline_cap: Money,
    pub rollover: Money,
    pub contracts: BTreeMap<u32, PlayerContract>,
    pub penalties: Vec<CapPenalty>,
    pub designated_post_june_1_used: u8,
}

/// Result of closing a league year.
#[derive(Debug, Clone, PartialEq)]
pub struct CapYearAdvance {
    pub state: SalaryCapState,
    pub expired: Vec<PlayerContract>,
    pub accelerated: Vec<CapPenalty>,
}

impl SalaryCapState {
    pub fn new(team_id: u32, year: i32, baseline_cap: Money) -> Self {
        SalaryCapState {
            team_id,
            current_year: year,
            salary_cap: baseline_cap,
            baseline_cap,
            rollover: 0,
            contracts: BTreeMap::new(),
            penalties: Vec::new(),
            designated_post_june_1_used: 0,
        }
    }

    pub fn with_rollover(mut self, rollover: Money) -> Self {
        self.rollover = rollover.max(0);
        self.salary_cap = self.baseline_cap + self.rollover;
        self
    }

    pub fn sign_contract(mut self, contract: PlayerContract) -> Self {
        debug!(
            "cap ledger {}: add contract {} for player {}",
            self.team_id, contract.id, contract.player_id
        );
        self.contracts.insert(contract.id, contract);
        self
    }

    /// Swaps a contract for its restructured, extended or pay-cut successor.
    pub fn replace_contract(mut self, old_id: u32, contract: PlayerContract) -> Self {
        self.contracts.remove(&old_id);
        self.contracts.insert(contract.id, contract);
        self
    }

    pub fn remove_contract(mut self, contract_id: u32) -> Self {
        self.contracts.remove(&contract_id);
        self
    }

    /// Books a release: drops the contract and charges its dead money.
    pub fn release(mut self, outcome: &CutOutcome) -> Self {
        self.contracts.remove(&outcome.contract.id);
        self.penalties.extend(outcome.penalties.iter().cloned());

        if outcome.analysis.cut_type == CutType::DesignatedPostJune1 {
            self.designated_post_june_1_used += 1;
        }

        self
    }

    pub fn add_penalty(mut self, penalty: CapPenalty) -> Self {
        self.penalties.push(penalty);
        self
    }

    pub fn contract_for_player(&self, player_id: u32) -> Option<&PlayerContract> {
        self.contracts.values().find(|c| c.player_id == player_id && c.is_active())
    }

    pub fn active_contracts(&self) -> impl Iterator<Item = &PlayerContract> {
        self.contracts.values().filter(|c| c.is_active())
    }

    /// Cap hits of live contracts in `year`.
    pub fn committed(&self, year: i32) -> Money {
        self.active_contracts().map(|c| c.cap_hit_for_year(year)).sum()
    }

    /// Penalties charged to `year`.
    pub fn dead_money(&self, year: i32) -> Money {
        self.penalties.iter().filter(|p| p.year == year).map(|p| p.amount).sum()
    }

    pub fn cap_usage(&self, year: i32) -> Money {
        self.committed(year) + self.dead_money(year)
    }

    /// Sum of the largest individual cap hits in `year`.
    pub fn top51(&self, year: i32) -> Money {
        let mut hits: Vec<Money> = self.active_contracts().map(|c| c.cap_hit_for_year(year)).collect();
        hits.sort_unstable_by(|a, b| b.cmp(a));
        hits.iter().take(OFFSEASON_ACCOUNTING_SLOTS).sum()
    }

    pub fn offseason_cap_usage(&self) -> Money {
        self.top51(self.current_year) + self.dead_money(self.current_year)
    }

    pub fn cap_space(&self) -> Money {
        self.salary_cap - self.cap_usage(self.current_year)
    }

    pub fn offseason_cap_space(&self) -> Money {
        self.salary_cap - self.offseason_cap_usage()
    }

    pub fn can_afford(&self, cap_hit: Money) -> bool {
        self.offseason_cap_space() >= cap_hit
    }

    pub fn rollover_amount(&self) -> Money {
        (self.salary_cap - self.cap_usage(self.current_year)).max(0)
    }

    /// Closes the league year. Every contract moves forward a year and expired ones
    /// leave the ledger; bonus still parked in void years of an expired deal accelerates
    /// into the new year.
    pub fn advance_year(self, new_baseline: Money) -> CapYearAdvance {
        let rollover = self.rollover_amount();
        let next_year = self.current_year + 1;

        let mut contracts = BTreeMap::new();
        let mut expired = Vec::new();
        let mut accelerated = Vec::new();

        for (id, contract) in self.contracts {
            if !contract.is_active() {
                continue;
            }

            let advanced = contract.advance_year();
            if advanced.is_expired() {
                let void_bonus = contract.remaining_void_bonus(self.current_year);
                if void_bonus > 0 {
                    accelerated.push(CapPenalty::new(
                        contract.player_id,
                        PenaltyReason::Restructure,
                        void_bonus,
                        next_year,
                        next_year,
                    ));
                }
                expired.push(advanced);
            } else {
                contracts.insert(id, advanced);
            }
        }

        let mut penalties: Vec<CapPenalty> = self
            .penalties
            .into_iter()
            .filter_map(|mut p| {
                p.years_remaining = p.years_remaining.saturating_sub(1);
                (p.years_remaining > 0).then_some(p)
            })
            .collect();
        penalties.extend(accelerated.iter().cloned());

        info!(
            "cap ledger {}: {} -> {}, rollover {}, {} contracts expired",
            self.team_id,
            self.current_year,
            next_year,
            CurrencyFormatter::format(rollover),
            expired.len()
        );

        let state = SalaryCapState {
            team_id: self.team_id,
            current_year: next_year,
            salary_cap: new_baseline + rollover,
            baseline_cap: new_baseline,
            rollover,
            contracts,
            penalties,
            designated_post_june_1_used: 0,
        };

        CapYearAdvance {
            state,
            expired,
            accelerated,
        }
    }
}
