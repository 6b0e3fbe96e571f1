use crate::free_agency::FreeAgencyPhase;
use crate::shared::Money;
use serde::{Deserialize, Serialize};
use std::env;

/// Length of each free agency phase in offseason days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub pre_free_agency: u32,
    pub legal_tampering: u32,
    pub day1_frenzy: u32,
    pub day2_frenzy: u32,
    pub trickle: u32,
    pub training_camp: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        PhaseDurations {
            pre_free_agency: 10,
            legal_tampering: 2,
            day1_frenzy: 1,
            day2_frenzy: 1,
            trickle: 30,
            training_camp: 21,
        }
    }
}

impl PhaseDurations {
    pub fn for_phase(&self, phase: FreeAgencyPhase) -> u32 {
        match phase {
            FreeAgencyPhase::PreFreeAgency => self.pre_free_agency,
            FreeAgencyPhase::LegalTampering => self.legal_tampering,
            FreeAgencyPhase::Day1Frenzy => self.day1_frenzy,
            FreeAgencyPhase::Day2Frenzy => self.day2_frenzy,
            FreeAgencyPhase::Trickle => self.trickle,
            FreeAgencyPhase::TrainingCamp => self.training_camp,
            FreeAgencyPhase::Closed => 0,
        }
    }

    /// Offseason days from the first phase until the market closes.
    pub fn total(&self) -> u32 {
        FreeAgencyPhase::ORDER.iter().map(|p| self.for_phase(*p)).sum()
    }
}

/// Rules of the free agent market itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRules {
    pub durations: PhaseDurations,
    /// Days a formal offer stays open before it lapses.
    pub offer_expiry_days: u32,
    /// Score a verbal agreement has to reach during legal tampering.
    pub tampering_acceptance_threshold: f64,
    /// Score a formal offer has to reach once players can sign.
    pub open_market_acceptance_threshold: f64,
    pub bidding_max_rounds: u32,
    pub bidding_escalation_rate: f64,
    pub offer_sheet_matching_days: u32,
    pub compensatory_picks_per_team: usize,
    /// Minimum AAV, as a share of the cap, for a departure to count toward compensatory picks.
    pub compensatory_qualifying_share: f64,
    pub roster_limit: usize,
}

impl Default for MarketRules {
    fn default() -> Self {
        MarketRules {
            durations: PhaseDurations::default(),
            offer_expiry_days: 3,
            tampering_acceptance_threshold: 0.85,
            open_market_acceptance_threshold: 0.80,
            bidding_max_rounds: 5,
            bidding_escalation_rate: 0.05,
            offer_sheet_matching_days: 5,
            compensatory_picks_per_team: 4,
            compensatory_qualifying_share: 0.01,
            roster_limit: 53,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffseasonConfig {
    pub year: i32,
    pub base_salary_cap: Money,
    pub cap_growth_rate: f64,
    pub seed: u64,
    pub teams: u32,
    pub market: MarketRules,
}

impl Default for OffseasonConfig {
    fn default() -> Self {
        OffseasonConfig {
            year: 2024,
            base_salary_cap: 255_400,
            cap_growth_rate: 0.07,
            seed: 2024,
            teams: 32,
            market: MarketRules::default(),
        }
    }
}

impl OffseasonConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults with `OFFSEASON_SEED` and `OFFSEASON_TEAMS` applied when set and parseable.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = env::var("OFFSEASON_SEED").ok().and_then(|v| v.parse().ok()) {
            self.seed = seed;
        }
        if let Some(teams) = env::var("OFFSEASON_TEAMS").ok().and_then(|v| v.parse().ok()) {
            self.teams = teams;
        }
        self
    }

    /// Baseline cap for `year`, grown from the configured base year.
    pub fn baseline_cap(&self, year: i32) -> Money {
        let growth = (1.0 + self.cap_growth_rate).powi(year - self.year);
        crate::shared::round_money(self.base_salary_cap as f64 * growth)
    }
}
