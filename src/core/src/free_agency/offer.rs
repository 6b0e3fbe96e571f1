use crate::contract::ContractOffer;
use crate::shared::Money;
use crate::valuation::MarketValuation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
    Withdrawn,
}

/// A formal offer from a team to a free agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgentOffer {
    pub id: u32,
    pub team_id: u32,
    pub free_agent_id: u32,
    pub years: u8,
    pub bonus_per_year: Money,
    pub salary_per_year: Money,
    pub no_trade_clause: bool,
    pub status: OfferStatus,
    pub submitted_day: u32,
    /// First offseason day on which the offer has lapsed.
    pub expires_day: u32,
}

impl FreeAgentOffer {
    pub fn new(id: u32, team_id: u32, free_agent_id: u32, offer: &ContractOffer, day: u32, expiry_days: u32) -> Self {
        FreeAgentOffer {
            id,
            team_id,
            free_agent_id,
            years: offer.years,
            bonus_per_year: offer.bonus_per_year,
            salary_per_year: offer.salary_per_year,
            no_trade_clause: offer.no_trade_clause,
            status: OfferStatus::Pending,
            submitted_day: day,
            expires_day: day + expiry_days.max(1),
        }
    }

    pub fn contract_offer(&self) -> ContractOffer {
        ContractOffer {
            years: self.years,
            bonus_per_year: self.bonus_per_year,
            salary_per_year: self.salary_per_year,
            no_trade_clause: self.no_trade_clause,
        }
    }

    pub fn aav(&self) -> Money {
        self.bonus_per_year + self.salary_per_year
    }

    pub fn is_pending(&self) -> bool {
        self.status == OfferStatus::Pending
    }
}

/// How attractive an offer is to the player relative to his market value.
/// `0.5 × AAV ratio (capped at 1.2) + 0.3 × guarantee ratio (capped at 1) + 0.2 × years adequacy`.
pub fn acceptance_score(offer: &ContractOffer, market: &MarketValuation) -> f64 {
    let aav_ratio = if market.aav > 0 {
        offer.aav() as f64 / market.aav as f64
    } else {
        1.0
    };

    let guarantee_ratio = if market.guarantee_pct > 0.0 {
        offer.guarantee_ratio() / market.guarantee_pct
    } else {
        1.0
    };

    let wanted_years = market.years.max(1) as f64;
    let years_adequacy = (1.0 - (offer.years as f64 - wanted_years).abs() / wanted_years).clamp(0.0, 1.0);

    0.5 * aav_ratio.min(1.2) + 0.3 * guarantee_ratio.min(1.0) + 0.2 * years_adequacy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Position;
    use crate::valuation::SkillTier;

    fn market() -> MarketValuation {
        MarketValuation {
            player_id: 1,
            position: Position::Linebacker,
            tier: SkillTier::Starter,
            aav: 10_000,
            years: 3,
            guarantee_pct: 0.30,
            total_value: 30_000,
            guaranteed_money: 9_000,
        }
    }

    #[test]
    fn market_offer_scores_one() {
        let offer = ContractOffer::new(3, 3_000, 7_000);
        assert!((acceptance_score(&offer, &market()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lowball_falls_below_threshold() {
        let offer = ContractOffer::new(1, 0, 7_000);
        assert!(acceptance_score(&offer, &market()) < 0.85);
    }

    #[test]
    fn overpay_is_capped() {
        let offer = ContractOffer::new(3, 6_000, 14_000);
        assert!((acceptance_score(&offer, &market()) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn offer_expires_after_window() {
        let offer = FreeAgentOffer::new(1, 2, 3, &ContractOffer::new(2, 0, 1_000), 12, 3);
        assert_eq!(offer.expires_day, 15);
        assert_eq!(offer.aav(), 1_000);
    }
}
