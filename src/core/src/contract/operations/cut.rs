use crate::cap::{CapPenalty, PenaltyReason};
use crate::contract::{ContractError, ContractStatus, PlayerContract};
use crate::league::LeagueCalendar;
use crate::shared::{CurrencyFormatter, Money};
use chrono::{Datelike, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};

pub const DESIGNATED_POST_JUNE_1_LIMIT: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutType {
    Standard,
    PostJune1,
    /// Post-June-1 accounting for a release made before June 1.
    DesignatedPostJune1,
}

impl CutType {
    fn splits_dead_money(&self) -> bool {
        !matches!(self, CutType::Standard)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutAnalysis {
    pub cut_type: CutType,
    pub year: i32,
    pub dead_money_current_year: Money,
    pub dead_money_next_year: Money,
    /// Non-guaranteed salary removed from the release year.
    pub cap_savings: Money,
    /// Cap hit removed minus dead money charged in the release year.
    pub net_cap_change: Money,
    /// Net relief across the release year and the one after.
    pub total_cap_savings: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CutRequest {
    pub cut_type: CutType,
    pub date: NaiveDate,
    /// Designated post-June-1 releases the team has already made this league year.
    pub designated_used: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CutOutcome {
    pub contract: PlayerContract,
    pub analysis: CutAnalysis,
    pub penalties: Vec<CapPenalty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CutRecommendation {
    pub cut_type: CutType,
    pub reason: String,
    pub standard: CutAnalysis,
    pub post_june_1: CutAnalysis,
}

pub struct ContractCutter;

impl ContractCutter {
    pub fn analyze(contract: &PlayerContract, year: i32, cut_type: CutType) -> CutAnalysis {
        let cap_hit = contract.cap_hit_for_year(year);
        let next_cap_hit = contract.cap_hit_for_year(year + 1);
        let cap_savings = contract.cap_savings(year);

        let (dead_money_current_year, dead_money_next_year) = if cut_type.splits_dead_money() {
            let split = contract.post_june_1_dead_money(year);
            (split.year1, split.year2)
        } else {
            (contract.dead_money(year), 0)
        };

        let net_cap_change = cap_hit - dead_money_current_year;

        CutAnalysis {
            cut_type,
            year,
            dead_money_current_year,
            dead_money_next_year,
            cap_savings,
            net_cap_change,
            total_cap_savings: net_cap_change + next_cap_hit - dead_money_next_year,
        }
    }

    /// Picks the release type for `year`. Standard wins unless the post-June-1 split frees
    /// more than half as much again this year, or beats it over two years.
    pub fn recommend(contract: &PlayerContract, year: i32) -> CutRecommendation {
        let standard = Self::analyze(contract, year, CutType::Standard);
        let post_june_1 = Self::analyze(contract, year, CutType::PostJune1);

        let current_gain = post_june_1.net_cap_change - standard.net_cap_change;
        let exceeds_by_half = current_gain > 0 && current_gain * 2 > standard.net_cap_change.abs();
        let better_over_two_years = post_june_1.total_cap_savings > standard.total_cap_savings;

        let (cut_type, reason) = if exceeds_by_half {
            (
                CutType::PostJune1,
                format!(
                    "Post-June 1 release saves {} this year instead of {}",
                    CurrencyFormatter::format(post_june_1.net_cap_change),
                    CurrencyFormatter::format(standard.net_cap_change)
                ),
            )
        } else if better_over_two_years {
            (
                CutType::PostJune1,
                format!(
                    "Post-June 1 release saves {} over two years",
                    CurrencyFormatter::format(post_june_1.total_cap_savings)
                ),
            )
        } else {
            (
                CutType::Standard,
                format!(
                    "Standard release clears {} of dead money now",
                    CurrencyFormatter::format(standard.dead_money_current_year)
                ),
            )
        };

        CutRecommendation {
            cut_type,
            reason,
            standard,
            post_june_1,
        }
    }

    pub fn cut(
        contract: &PlayerContract,
        request: &CutRequest,
        calendar: &LeagueCalendar,
    ) -> Result<CutOutcome, ContractError> {
        if !contract.is_active() {
            return Err(ContractError::NotActive);
        }
        if contract.years_remaining == 0 {
            return Err(ContractError::NoYearsRemaining);
        }

        let year = request.date.year();
        if year < contract.current_year() || year > contract.nominal_end_year() {
            return Err(ContractError::YearOutsideContract { year });
        }

        match request.cut_type {
            CutType::PostJune1 if !calendar.is_post_june_1(request.date) => {
                return Err(ContractError::PostJune1Unavailable);
            }
            CutType::DesignatedPostJune1 if request.designated_used >= DESIGNATED_POST_JUNE_1_LIMIT => {
                return Err(ContractError::DesignatedLimitReached {
                    limit: DESIGNATED_POST_JUNE_1_LIMIT,
                });
            }
            _ => {}
        }

        let analysis = Self::analyze(contract, year, request.cut_type);

        let mut penalties = Vec::new();
        if analysis.dead_money_current_year > 0 {
            penalties.push(CapPenalty::new(
                contract.player_id,
                PenaltyReason::Cut,
                analysis.dead_money_current_year,
                year,
                year,
            ));
        }
        if analysis.dead_money_next_year > 0 {
            penalties.push(CapPenalty::new(
                contract.player_id,
                PenaltyReason::Cut,
                analysis.dead_money_next_year,
                year + 1,
                year,
            ));
        }

        let mut released = contract.clone();
        released.status = ContractStatus::Voided;
        released.years_remaining = 0;

        info!(
            "release: player {}, team {}, {:?}, dead money {} now / {} next year",
            contract.player_id,
            contract.team_id,
            request.cut_type,
            CurrencyFormatter::format(analysis.dead_money_current_year),
            CurrencyFormatter::format(analysis.dead_money_next_year)
        );

        Ok(CutOutcome {
            contract: released,
            analysis,
            penalties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractGenerator, ContractIdSequence, ContractOffer, ContractType};
    use crate::league::Position;

    fn qb_contract() -> PlayerContract {
        let offer = ContractOffer::new(4, 12_500, 7_500);
        let mut ids = ContractIdSequence::default();
        ContractGenerator::create_contract(&mut ids, &offer, 1, 10, Position::Quarterback, 2024, ContractType::Veteran)
            .unwrap()
    }

    fn request(cut_type: CutType, month: u32, day: u32) -> CutRequest {
        CutRequest {
            cut_type,
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            designated_used: 0,
        }
    }

    #[test]
    fn standard_cut_scenario() {
        let contract = qb_contract();
        let outcome = ContractCutter::cut(&contract, &request(CutType::Standard, 3, 20), &LeagueCalendar::new(2024))
            .unwrap();

        assert_eq!(outcome.analysis.cap_savings, 7_500);
        assert_eq!(outcome.analysis.dead_money_current_year, 50_000);
        assert_eq!(outcome.analysis.dead_money_next_year, 0);
        assert_eq!(outcome.contract.status, ContractStatus::Voided);
        assert_eq!(outcome.penalties.len(), 1);
        assert_eq!(outcome.penalties[0].amount, 50_000);
        assert_eq!(outcome.penalties[0].year, 2024);
    }

    #[test]
    fn post_june_1_cut_splits_penalties() {
        let contract = qb_contract();
        let outcome = ContractCutter::cut(&contract, &request(CutType::PostJune1, 6, 2), &LeagueCalendar::new(2024))
            .unwrap();

        assert_eq!(outcome.penalties.len(), 2);
        assert_eq!(outcome.penalties[0].amount, 12_500);
        assert_eq!(outcome.penalties[1].amount, 37_500);
        assert_eq!(outcome.penalties[1].year, 2025);
        assert_eq!(outcome.penalties[1].years_remaining, 2);
    }

    #[test]
    fn post_june_1_cut_needs_june() {
        let contract = qb_contract();
        let result = ContractCutter::cut(&contract, &request(CutType::PostJune1, 3, 20), &LeagueCalendar::new(2024));
        assert_eq!(result, Err(ContractError::PostJune1Unavailable));
    }

    #[test]
    fn designated_cut_is_limited() {
        let contract = qb_contract();
        let mut req = request(CutType::DesignatedPostJune1, 3, 20);
        assert!(ContractCutter::cut(&contract, &req, &LeagueCalendar::new(2024)).is_ok());

        req.designated_used = DESIGNATED_POST_JUNE_1_LIMIT;
        let result = ContractCutter::cut(&contract, &req, &LeagueCalendar::new(2024));
        assert_eq!(result, Err(ContractError::DesignatedLimitReached { limit: 2 }));
    }

    #[test]
    fn voided_contract_cannot_be_cut_again() {
        let contract = qb_contract();
        let calendar = LeagueCalendar::new(2024);
        let outcome = ContractCutter::cut(&contract, &request(CutType::Standard, 3, 20), &calendar).unwrap();
        let again = ContractCutter::cut(&outcome.contract, &request(CutType::Standard, 3, 20), &calendar);
        assert_eq!(again, Err(ContractError::NotActive));
    }

    #[test]
    fn recommendation_prefers_split_when_dead_money_dominates() {
        let contract = qb_contract();
        let recommendation = ContractCutter::recommend(&contract, 2024);
        assert_eq!(recommendation.cut_type, CutType::PostJune1);
        assert_eq!(recommendation.standard.net_cap_change, -30_000);
        assert_eq!(recommendation.post_june_1.net_cap_change, 7_500);
    }

    #[test]
    fn recommendation_keeps_standard_in_final_year() {
        let contract = qb_contract();
        let recommendation = ContractCutter::recommend(&contract, 2027);
        assert_eq!(recommendation.cut_type, CutType::Standard);
        assert_eq!(recommendation.standard.dead_money_current_year, 12_500);
    }

    #[test]
    fn recommendation_keeps_standard_for_salary_only_deals() {
        let offer = ContractOffer::new(3, 0, 4_000);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 2, 10, Position::Linebacker, 2024, ContractType::Veteran)
                .unwrap();
        assert_eq!(ContractCutter::recommend(&contract, 2024).cut_type, CutType::Standard);
    }
}
