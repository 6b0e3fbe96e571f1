use crate::contract::{
    ContractError, ContractOffer, ContractStatus, ContractType, ContractYear, PlayerContract,
    minimum_salary,
};
use crate::league::{Player, Position};
use crate::shared::{Money, round_money};
use crate::valuation::MarketValuation;
use log::debug;
use serde::{Deserialize, Serialize};

/// Hands out contract ids. Every ledger that can receive a contract draws from the same
/// sequence so ids never collide within a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractIdSequence {
    next: u32,
}

impl Default for ContractIdSequence {
    fn default() -> Self {
        ContractIdSequence { next: 1 }
    }
}

impl ContractIdSequence {
    /// Continues after the highest id in `contracts`.
    pub fn after<'a>(contracts: impl IntoIterator<Item = &'a PlayerContract>) -> Self {
        let last = contracts.into_iter().map(|c| c.id).max().unwrap_or(0);
        ContractIdSequence { next: last + 1 }
    }

    pub fn starting_at(next: u32) -> Self {
        ContractIdSequence { next: next.max(1) }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

const ROOKIE_CONTRACT_YEARS: u8 = 4;
const TEAMS_PER_ROUND: u16 = 32;

pub struct ContractGenerator;

impl ContractGenerator {
    /// Builds a contract from an offer, one equal bonus share per contract year.
    pub fn create_contract(
        ids: &mut ContractIdSequence,
        offer: &ContractOffer,
        player_id: u32,
        team_id: u32,
        position: Position,
        signed_year: i32,
        contract_type: ContractType,
    ) -> Result<PlayerContract, ContractError> {
        offer.validate()?;

        let yearly_breakdown = (0..offer.years)
            .map(|i| ContractYear::new(signed_year + i as i32, offer.bonus_per_year, offer.salary_per_year))
            .collect();

        Ok(PlayerContract {
            id: ids.next_id(),
            player_id,
            team_id,
            position,
            status: ContractStatus::Active,
            contract_type,
            signed_year,
            total_years: offer.years,
            years_remaining: offer.years,
            total_value: offer.total_value(),
            guaranteed_money: offer.guaranteed_money(),
            yearly_breakdown,
            void_years: 0,
            has_no_trade_clause: offer.no_trade_clause,
            original_contract_id: None,
        })
    }

    pub fn veteran_contract(
        ids: &mut ContractIdSequence,
        player: &Player,
        team_id: u32,
        valuation: &MarketValuation,
        signed_year: i32,
    ) -> Result<PlayerContract, ContractError> {
        Self::create_contract(
            ids,
            &valuation.to_offer(),
            player.id,
            team_id,
            player.position,
            signed_year,
            ContractType::Veteran,
        )
    }

    /// Slotted four-year deal for the `overall_pick`-th selection (1-based).
    pub fn rookie_contract(
        ids: &mut ContractIdSequence,
        player: &Player,
        team_id: u32,
        overall_pick: u16,
        signed_year: i32,
    ) -> Result<PlayerContract, ContractError> {
        let offer = rookie_scale_offer(overall_pick);

        debug!(
            "rookie contract: player {}, pick {}, value {}",
            player.id,
            overall_pick,
            offer.total_value()
        );

        Self::create_contract(ids, &offer, player.id, team_id, player.position, signed_year, ContractType::Rookie)
    }

    /// Three-year minimum deal for an undrafted player.
    pub fn undrafted_contract(
        ids: &mut ContractIdSequence,
        player: &Player,
        team_id: u32,
        signed_year: i32,
    ) -> Result<PlayerContract, ContractError> {
        let offer = ContractOffer::new(3, 0, minimum_salary(player.experience));
        Self::create_contract(ids, &offer, player.id, team_id, player.position, signed_year, ContractType::Rookie)
    }
}

pub fn rookie_scale_offer(overall_pick: u16) -> ContractOffer {
    let pick = overall_pick.max(1);
    let round = (pick - 1) / TEAMS_PER_ROUND + 1;

    let total_value: Money = if round == 1 {
        41_000 - round_money((pick - 1) as f64 * 28_500.0 / 31.0)
    } else {
        round_money(7_000.0 * 0.995f64.powi((pick - TEAMS_PER_ROUND - 1) as i32))
    };

    let floor: Money = (0..ROOKIE_CONTRACT_YEARS).map(minimum_salary).sum();
    let total_value = total_value.max(floor);

    let bonus_share = match round {
        1 => 0.62,
        2 => 0.40,
        3 => 0.25,
        _ => 0.12,
    };

    let years = ROOKIE_CONTRACT_YEARS as Money;
    let bonus_per_year = round_money(total_value as f64 * bonus_share / years as f64);
    let salary_per_year = (total_value / years - bonus_per_year).max(0);

    ContractOffer::new(ROOKIE_CONTRACT_YEARS, bonus_per_year, salary_per_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qb_offer_scenario() {
        let offer = ContractOffer::new(4, 12_500, 7_500);
        let mut ids = ContractIdSequence::default();
        let contract =
            ContractGenerator::create_contract(&mut ids, &offer, 7, 3, Position::Quarterback, 2024, ContractType::Veteran)
                .unwrap();

        assert_eq!(contract.total_value, 80_000);
        assert_eq!(contract.guaranteed_money, 50_000);
        assert_eq!(contract.yearly_breakdown[0].year, 2024);
        assert_eq!(contract.yearly_breakdown[3].year, 2027);
        assert_eq!(contract.years_remaining, 4);
        assert!(contract.check_invariants());
    }

    #[test]
    fn zero_year_offer_fails() {
        let offer = ContractOffer::new(0, 100, 100);
        let mut ids = ContractIdSequence::default();
        let result =
            ContractGenerator::create_contract(&mut ids, &offer, 1, 1, Position::Kicker, 2024, ContractType::Veteran);
        assert_eq!(result, Err(ContractError::InvalidYears));
    }

    #[test]
    fn contract_ids_are_unique() {
        let offer = ContractOffer::new(1, 0, 900);
        let mut ids = ContractIdSequence::default();
        let a = ContractGenerator::create_contract(&mut ids, &offer, 1, 1, Position::Kicker, 2024, ContractType::Veteran)
            .unwrap();
        let b = ContractGenerator::create_contract(&mut ids, &offer, 1, 1, Position::Kicker, 2024, ContractType::Veteran)
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn separate_sequences_hand_out_the_same_ids() {
        let offer = ContractOffer::new(2, 100, 900);
        let mut first = ContractIdSequence::default();
        let mut second = ContractIdSequence::default();
        let a = ContractGenerator::create_contract(&mut first, &offer, 4, 2, Position::Safety, 2024, ContractType::Veteran)
            .unwrap();
        let b =
            ContractGenerator::create_contract(&mut second, &offer, 4, 2, Position::Safety, 2024, ContractType::Veteran)
                .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sequence_continues_after_existing_contracts() {
        let offer = ContractOffer::new(1, 0, 900);
        let mut ids = ContractIdSequence::default();
        let existing: Vec<PlayerContract> = (0..3)
            .map(|i| {
                ContractGenerator::create_contract(&mut ids, &offer, i, 1, Position::Kicker, 2024, ContractType::Veteran)
                    .unwrap()
            })
            .collect();

        let mut after = ContractIdSequence::after(&existing);
        assert_eq!(after.next_id(), 4);
        assert_eq!(ContractIdSequence::after(Vec::<PlayerContract>::new().iter()).next_id(), 1);
    }

    #[test]
    fn rookie_scale_descends_with_pick() {
        let first = rookie_scale_offer(1).total_value();
        let last_first_round = rookie_scale_offer(32).total_value();
        let second_round = rookie_scale_offer(33).total_value();
        let seventh_round = rookie_scale_offer(224).total_value();

        assert!(first > last_first_round);
        assert!(last_first_round > second_round);
        assert!(second_round >= seventh_round);
        assert!(seventh_round >= 3_700);
    }

    #[test]
    fn rookie_contract_keeps_invariants() {
        let player = Player::new(5, "Rookie", Position::WideReceiver, 22, 0, 68).with_draft(Some(1));
        let contract = ContractGenerator::rookie_contract(&mut ContractIdSequence::default(), &player, 2, 10, 2025).unwrap();
        assert_eq!(contract.contract_type, ContractType::Rookie);
        assert_eq!(contract.total_years, 4);
        assert!(contract.check_invariants());
    }
}
