use crate::contract::{ContractError, ContractStatus, ContractType, ContractYear, ContractIdSequence, PlayerContract};
use crate::league::{Player, Position};
use crate::shared::{CurrencyFormatter, Money, round_money};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_BASE_YEAR: i32 = 2024;
const TAG_ANNUAL_GROWTH: f64 = 1.08;
const SECOND_TAG_ESCALATOR: f64 = 1.20;
const THIRD_TAG_ESCALATOR: f64 = 1.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    Franchise,
    Transition,
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagType::Franchise => write!(f, "franchise"),
            TagType::Transition => write!(f, "transition"),
        }
    }
}

impl TagType {
    fn contract_type(&self) -> ContractType {
        match self {
            TagType::Franchise => ContractType::FranchiseTag,
            TagType::Transition => ContractType::TransitionTag,
        }
    }

    /// League-set tag amounts for the 2024 league year.
    fn base_value(&self, position: Position) -> Money {
        match self {
            TagType::Franchise => match position {
                Position::Quarterback => 38_300,
                Position::RunningBack => 11_951,
                Position::WideReceiver => 21_816,
                Position::TightEnd => 12_693,
                Position::OffensiveLine => 20_985,
                Position::DefensiveLine => 21_700,
                Position::Linebacker => 24_007,
                Position::Cornerback => 19_802,
                Position::Safety => 17_123,
                Position::Kicker | Position::Punter => 5_984,
            },
            TagType::Transition => match position {
                Position::Quarterback => 34_060,
                Position::RunningBack => 9_990,
                Position::WideReceiver => 19_200,
                Position::TightEnd => 11_300,
                Position::OffensiveLine => 18_250,
                Position::DefensiveLine => 19_500,
                Position::Linebacker => 20_600,
                Position::Cornerback => 17_200,
                Position::Safety => 14_500,
                Position::Kicker | Position::Punter => 5_200,
            },
        }
    }
}

/// Which players a team has tagged in a league year. One of each kind at most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTagStatus {
    pub team_id: u32,
    pub year: i32,
    pub franchise_player: Option<u32>,
    pub transition_player: Option<u32>,
}

impl TeamTagStatus {
    pub fn new(team_id: u32, year: i32) -> Self {
        TeamTagStatus {
            team_id,
            year,
            franchise_player: None,
            transition_player: None,
        }
    }

    pub fn is_used(&self, tag_type: TagType) -> bool {
        match tag_type {
            TagType::Franchise => self.franchise_player.is_some(),
            TagType::Transition => self.transition_player.is_some(),
        }
    }

    fn with_tag(mut self, tag_type: TagType, player_id: u32) -> Self {
        match tag_type {
            TagType::Franchise => self.franchise_player = Some(player_id),
            TagType::Transition => self.transition_player = Some(player_id),
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagOutcome {
    pub contract: PlayerContract,
    pub status: TeamTagStatus,
    pub tag_type: TagType,
    pub value: Money,
}

pub struct FranchiseTagger;

impl FranchiseTagger {
    /// One-year tag value. `tag_count` is how many consecutive times the player has been
    /// tagged including this one.
    pub fn tag_value(position: Position, tag_type: TagType, tag_count: u8, year: i32) -> Money {
        let growth = TAG_ANNUAL_GROWTH.powi(year - TAG_BASE_YEAR);
        let first = round_money(tag_type.base_value(position) as f64 * growth);

        match tag_count {
            0 | 1 => first,
            2 => round_money(first as f64 * SECOND_TAG_ESCALATOR),
            _ => round_money(first as f64 * THIRD_TAG_ESCALATOR),
        }
    }

    pub fn franchise_tag_value(position: Position, year: i32) -> Money {
        Self::tag_value(position, TagType::Franchise, 1, year)
    }

    /// Tags `player` for `status.year`. The whole value is guaranteed, so it is carried as bonus.
    pub fn apply(
        ids: &mut ContractIdSequence,
        player: &Player,
        status: &TeamTagStatus,
        tag_type: TagType,
        tag_count: u8,
    ) -> Result<TagOutcome, ContractError> {
        if status.is_used(tag_type) {
            return Err(ContractError::TagAlreadyUsed {
                tag_type,
                year: status.year,
            });
        }

        let value = Self::tag_value(player.position, tag_type, tag_count, status.year);

        let contract = PlayerContract {
            id: ids.next_id(),
            player_id: player.id,
            team_id: status.team_id,
            position: player.position,
            status: ContractStatus::Active,
            contract_type: tag_type.contract_type(),
            signed_year: status.year,
            total_years: 1,
            years_remaining: 1,
            total_value: value,
            guaranteed_money: value,
            yearly_breakdown: vec![ContractYear::new(status.year, value, 0)],
            void_years: 0,
            has_no_trade_clause: false,
            original_contract_id: None,
        };

        info!(
            "{} tag: team {}, player {} ({}), {}",
            tag_type,
            status.team_id,
            player.id,
            player.position,
            CurrencyFormatter::format(value)
        );

        Ok(TagOutcome {
            contract,
            status: status.clone().with_tag(tag_type, player.id),
            tag_type,
            value,
        })
    }
}
