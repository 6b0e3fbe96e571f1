use crate::contract::ContractError;
use crate::league::Position;
use crate::shared::{Money, round_money, scale_money};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Expired,
    Voided,
    /// Superseded by a restructured, extended or pay-cut successor.
    Restructured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    Rookie,
    Veteran,
    Extension,
    FranchiseTag,
    TransitionTag,
}

/// One season of a contract. `bonus` is guaranteed proration and stays on the cap as
/// dead money if the player is released in or before this year; `salary` is not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractYear {
    pub year: i32,
    pub bonus: Money,
    pub salary: Money,
    pub cap_hit: Money,
    pub is_void_year: bool,
}

impl ContractYear {
    pub fn new(year: i32, bonus: Money, salary: Money) -> Self {
        ContractYear {
            year,
            bonus,
            salary,
            cap_hit: bonus + salary,
            is_void_year: false,
        }
    }

    pub fn void(year: i32, bonus: Money) -> Self {
        ContractYear {
            year,
            bonus,
            salary: 0,
            cap_hit: bonus,
            is_void_year: true,
        }
    }

    pub(crate) fn recompute(&mut self) {
        self.cap_hit = self.bonus + self.salary;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerContract {
    pub id: u32,
    pub player_id: u32,
    pub team_id: u32,
    pub position: Position,
    pub status: ContractStatus,
    pub contract_type: ContractType,
    pub signed_year: i32,
    pub total_years: u8,
    pub years_remaining: u8,
    pub total_value: Money,
    pub guaranteed_money: Money,
    pub yearly_breakdown: Vec<ContractYear>,
    pub void_years: u8,
    pub has_no_trade_clause: bool,
    pub original_contract_id: Option<u32>,
}

/// Dead money of a post-June-1 release: `year1` stays in the release year, `year2`
/// moves to the following cap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadMoneySplit {
    pub year1: Money,
    pub year2: Money,
}

impl DeadMoneySplit {
    pub fn total(&self) -> Money {
        self.year1 + self.year2
    }
}

impl PlayerContract {
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }

    pub fn aav(&self) -> Money {
        if self.total_years == 0 {
            return 0;
        }
        round_money(self.total_value as f64 / self.total_years as f64)
    }

    pub fn year(&self, year: i32) -> Option<&ContractYear> {
        self.yearly_breakdown.iter().find(|y| y.year == year)
    }

    /// Last season the player is actually under contract; void years are not counted.
    pub fn nominal_end_year(&self) -> i32 {
        self.yearly_breakdown
            .iter()
            .filter(|y| !y.is_void_year)
            .map(|y| y.year)
            .max()
            .unwrap_or(self.signed_year + self.total_years as i32 - 1)
    }

    /// League year the contract currently sits in.
    pub fn current_year(&self) -> i32 {
        self.nominal_end_year() - self.years_remaining as i32 + 1
    }

    pub fn cap_hit_for_year(&self, year: i32) -> Money {
        self.year(year).map(|y| y.cap_hit).unwrap_or(0)
    }

    /// Guaranteed proration still to be charged from `year` onwards.
    pub fn dead_money(&self, year: i32) -> Money {
        self.yearly_breakdown
            .iter()
            .filter(|y| y.year >= year)
            .unique_by(|y| y.year)
            .map(|y| y.bonus)
            .sum()
    }

    /// Non-guaranteed salary a team avoids by releasing the player in `year`.
    pub fn cap_savings(&self, year: i32) -> Money {
        self.year(year).map(|y| y.salary).unwrap_or(0)
    }

    pub fn post_june_1_dead_money(&self, year: i32) -> DeadMoneySplit {
        let year1 = self.year(year).map(|y| y.bonus).unwrap_or(0);

        DeadMoneySplit {
            year1,
            year2: self.dead_money(year + 1),
        }
    }

    /// Bonus still parked in void years after `year`.
    pub fn remaining_void_bonus(&self, year: i32) -> Money {
        self.yearly_breakdown
            .iter()
            .filter(|y| y.is_void_year && y.year > year)
            .map(|y| y.bonus)
            .sum()
    }

    pub fn total_bonus(&self) -> Money {
        self.yearly_breakdown.iter().map(|y| y.bonus).sum()
    }

    /// Moves the contract one league year forward. The result is never absent: a
    /// contract that runs out comes back with `status == Expired`.
    pub fn advance_year(&self) -> PlayerContract {
        let mut next = self.clone();
        next.years_remaining = next.years_remaining.saturating_sub(1);

        if next.years_remaining == 0 && next.status == ContractStatus::Active {
            next.status = ContractStatus::Expired;
        }

        next
    }

    pub fn is_expired(&self) -> bool {
        self.status == ContractStatus::Expired
    }

    /// Checks the ledger invariants every contract must hold.
    pub fn check_invariants(&self) -> bool {
        self.guaranteed_money <= self.total_value
            && self.yearly_breakdown.len() >= self.total_years as usize
            && self.yearly_breakdown.iter().all(|y| y.cap_hit == y.bonus + y.salary)
            && self.years_remaining <= self.total_years
            && self.total_bonus() == self.guaranteed_money
    }

    pub(crate) fn sort_breakdown(&mut self) {
        self.yearly_breakdown.sort_by_key(|y| (y.year, y.is_void_year));
        self.void_years = self.yearly_breakdown.iter().filter(|y| y.is_void_year).count() as u8;
    }
}

/// Splits `amount` into `periods` even shares. Every share but the last is the rounded
/// quotient; the last absorbs the remainder so the shares sum to `amount`.
pub fn prorate(amount: Money, periods: usize) -> Vec<Money> {
    if periods == 0 {
        return Vec::new();
    }
    if periods == 1 {
        return vec![amount];
    }

    let n = periods as Money;
    let mut share = round_money(amount as f64 / periods as f64);
    if share * (n - 1) > amount {
        share = amount / n;
    }

    let mut shares = vec![share; periods - 1];
    shares.push(amount - share * (n - 1));
    shares
}

/// Canonical contract offer: equal bonus and salary every year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractOffer {
    pub years: u8,
    pub bonus_per_year: Money,
    pub salary_per_year: Money,
    pub no_trade_clause: bool,
}

/// Lump-sum view of an offer, the shape bidding rounds escalate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub years: u8,
    pub total_value: Money,
    pub guaranteed_money: Money,
    pub signing_bonus: Money,
    pub first_year_salary: Money,
}

impl ContractOffer {
    pub fn new(years: u8, bonus_per_year: Money, salary_per_year: Money) -> Self {
        ContractOffer {
            years,
            bonus_per_year,
            salary_per_year,
            no_trade_clause: false,
        }
    }

    pub fn with_no_trade_clause(mut self) -> Self {
        self.no_trade_clause = true;
        self
    }

    pub fn aav(&self) -> Money {
        self.bonus_per_year + self.salary_per_year
    }

    pub fn total_value(&self) -> Money {
        self.aav() * self.years as Money
    }

    pub fn guaranteed_money(&self) -> Money {
        self.bonus_per_year * self.years as Money
    }

    pub fn guarantee_ratio(&self) -> f64 {
        let total = self.total_value();
        if total <= 0 {
            return 0.0;
        }
        self.guaranteed_money() as f64 / total as f64
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.years == 0 {
            return Err(ContractError::InvalidYears);
        }
        if self.bonus_per_year < 0 || self.salary_per_year < 0 || self.aav() <= 0 {
            return Err(ContractError::NonPositiveAmount);
        }
        Ok(())
    }

    /// Same shape scaled by `factor`; used when a team bumps or a player lowers an ask.
    pub fn scaled(&self, factor: f64) -> ContractOffer {
        ContractOffer {
            years: self.years,
            bonus_per_year: scale_money(self.bonus_per_year, factor),
            salary_per_year: scale_money(self.salary_per_year, factor),
            no_trade_clause: self.no_trade_clause,
        }
    }

    pub fn to_terms(&self) -> ContractTerms {
        ContractTerms {
            years: self.years,
            total_value: self.total_value(),
            guaranteed_money: self.guaranteed_money(),
            signing_bonus: self.guaranteed_money(),
            first_year_salary: self.salary_per_year,
        }
    }

    /// Converts lump-sum terms back into per-year bonus and salary.
    pub fn from_terms(terms: &ContractTerms) -> ContractOffer {
        let years = terms.years.max(1);
        let guaranteed = terms.guaranteed_money.min(terms.total_value);

        ContractOffer {
            years,
            bonus_per_year: round_money(guaranteed as f64 / years as f64),
            salary_per_year: round_money((terms.total_value - guaranteed) as f64 / years as f64),
            no_trade_clause: false,
        }
    }
}

impl ContractTerms {
    pub fn aav(&self) -> Money {
        if self.years == 0 {
            return 0;
        }
        round_money(self.total_value as f64 / self.years as f64)
    }
}
